use liquisim::liquidity::{
    BestPrice, CompetitionAware, LimitOrderPartialFill, MarketHours, OneTickSlippage,
    Probabilistic, SizeAware, ThreeTier, TwoTier, VolumeSensitive,
};
use liquisim::{
    BookSide, FillModel, FillModelConfig, Instrument, LiquidityModel, Order, OrderSide, Price,
    Quantity, SyntheticOrderBook,
};
use proptest::prelude::*;

fn make_instrument() -> Instrument {
    Instrument::new("ESZ4.GLBX", Price::new(0.25, 2), Quantity::from_int(1, 0)).unwrap()
}

fn synthesize<L: LiquidityModel>(liquidity: L, qty: u64) -> SyntheticOrderBook {
    let instrument = make_instrument();
    let order = Order::new(OrderSide::Buy, Quantity::from_int(qty, 0));
    let mut model = FillModel::with_liquidity(1.0, 1.0, 0.0, Some(42), liquidity).unwrap();
    model
        .synthesize_liquidity(
            &instrument,
            &order,
            Price::new(4500.00, 2),
            Price::new(4500.25, 2),
        )
        .unwrap()
        .unwrap()
}

/// Bids at or below best bid and strictly falling, asks at or above best ask
/// and strictly rising, sequence ids 1..=n, no zero sizes.
fn assert_well_formed(book: &SyntheticOrderBook) {
    let best_bid = Price::new(4500.00, 2);
    let best_ask = Price::new(4500.25, 2);

    let bids: Vec<Price> = book.bids().map(|l| l.price).collect();
    let asks: Vec<Price> = book.asks().map(|l| l.price).collect();
    assert!(bids.iter().all(|p| *p <= best_bid));
    assert!(asks.iter().all(|p| *p >= best_ask));
    assert!(bids.windows(2).all(|w| w[0] > w[1]));
    assert!(asks.windows(2).all(|w| w[0] < w[1]));

    let ids: Vec<u64> = book.levels().iter().map(|l| l.sequence_id).collect();
    let expected: Vec<u64> = (1..=book.len() as u64).collect();
    assert_eq!(ids, expected);
    assert!(book.levels().iter().all(|l| !l.size.is_zero()));
}

#[test]
fn test_all_models_produce_well_formed_books() {
    let books = vec![
        synthesize(BestPrice, 10),
        synthesize(OneTickSlippage, 10),
        synthesize(TwoTier, 10),
        synthesize(Probabilistic, 10),
        synthesize(SizeAware, 10),
        synthesize(SizeAware, 40),
        synthesize(LimitOrderPartialFill, 10),
        synthesize(ThreeTier, 10),
        synthesize(MarketHours::new(true), 10),
        synthesize(MarketHours::new(false), 10),
        synthesize(VolumeSensitive::default(), 10),
        synthesize(CompetitionAware::default(), 10),
    ];
    for book in &books {
        assert_well_formed(book);
    }
}

#[test]
fn test_best_price_levels_exactly_at_quotes() {
    let book = synthesize(BestPrice, 10);
    assert_eq!(book.len(), 2);
    assert_eq!(book.best_bid().unwrap().price, Price::new(4500.00, 2));
    assert_eq!(book.best_ask().unwrap().price, Price::new(4500.25, 2));
}

#[test]
fn test_one_tick_slippage_uses_instrument_tick() {
    let book = synthesize(OneTickSlippage, 10);
    assert_eq!(book.best_bid().unwrap().price.to_string(), "4499.75");
    assert_eq!(book.best_ask().unwrap().price.to_string(), "4500.50");
}

#[test]
fn test_three_tier_book() {
    let instrument =
        Instrument::new("TEST.SIM", Price::from_int(1, 0), Quantity::from_int(1, 0)).unwrap();
    let order = Order::new(OrderSide::Sell, Quantity::from_int(1, 0));
    let mut model = FillModel::with_liquidity(1.0, 1.0, 0.0, None, ThreeTier).unwrap();
    let book = model
        .synthesize_liquidity(&instrument, &order, Price::from_int(100, 0), Price::from_int(101, 0))
        .unwrap()
        .unwrap();

    let side = |side: BookSide| -> Vec<(i64, u64)> {
        book.levels()
            .iter()
            .filter(|l| l.side == side)
            .map(|l| (l.price.raw(), l.size.raw()))
            .collect()
    };
    assert_eq!(side(BookSide::Bid), vec![(100, 50), (99, 30), (98, 20)]);
    assert_eq!(side(BookSide::Ask), vec![(101, 50), (102, 30), (103, 20)]);
}

#[test]
fn test_stateful_models_through_fill_model() {
    let instrument = make_instrument();
    let order = Order::new(OrderSide::Buy, Quantity::from_int(10, 0));
    let bid = Price::new(4500.00, 2);
    let ask = Price::new(4500.25, 2);

    let mut model =
        FillModel::with_liquidity(1.0, 1.0, 0.0, None, VolumeSensitive::default()).unwrap();
    model.liquidity_mut().set_recent_volume(2.0);
    let book = model.synthesize_liquidity(&instrument, &order, bid, ask).unwrap().unwrap();
    assert_eq!(book.best_bid().unwrap().size, Quantity::from_int(1, 0));

    model.liquidity_mut().set_recent_volume(1000.0);
    let book = model.synthesize_liquidity(&instrument, &order, bid, ask).unwrap().unwrap();
    assert_eq!(book.best_bid().unwrap().size, Quantity::from_int(250, 0));

    let mut model =
        FillModel::with_liquidity(1.0, 1.0, 0.0, None, MarketHours::default()).unwrap();
    model.liquidity_mut().set_low_liquidity_period(true);
    let book = model.synthesize_liquidity(&instrument, &order, bid, ask).unwrap().unwrap();
    assert_eq!(book.best_ask().unwrap().price.to_string(), "4500.50");
}

#[test]
fn test_gates_and_synthesis_from_json_config() {
    let config = FillModelConfig::from_json_str(
        r#"{"prob_fill_on_limit": 0.0, "prob_slippage": 1.0, "random_seed": 7, "model": "two_tier"}"#,
    )
    .unwrap();
    let mut model = FillModel::from_config(&config).unwrap();
    for _ in 0..1000 {
        assert!(!model.is_limit_filled());
        assert!(model.is_slipped());
    }

    let instrument = make_instrument();
    let order = Order::new(OrderSide::Buy, Quantity::from_int(3, 0));
    let book = model
        .synthesize_liquidity(&instrument, &order, Price::new(4500.00, 2), Price::new(4500.25, 2))
        .unwrap()
        .unwrap();
    assert_eq!(book.len(), 4);
}

#[test]
fn test_seeded_models_agree() {
    let run = |seed| {
        let config = FillModelConfig {
            prob_fill_on_limit: 0.4,
            prob_slippage: 0.2,
            random_seed: Some(seed),
            model: "probabilistic".to_string(),
            ..FillModelConfig::default()
        };
        let mut model = FillModel::from_config(&config).unwrap();
        let instrument = make_instrument();
        let order = Order::new(OrderSide::Buy, Quantity::from_int(1, 0));
        (0..100)
            .map(|_| {
                let book = model
                    .synthesize_liquidity(
                        &instrument,
                        &order,
                        Price::new(4500.00, 2),
                        Price::new(4500.25, 2),
                    )
                    .unwrap()
                    .unwrap();
                (
                    model.is_limit_filled(),
                    model.is_slipped(),
                    book.best_bid().unwrap().price.raw(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(2024), run(2024));
}

proptest! {
    #[test]
    fn prop_volume_sensitive_never_zero(volume in prop_oneof![
        Just(0.0),
        0.0f64..4.0,
        0.0f64..1e12,
        -1e6f64..0.0,
    ]) {
        let mut liquidity = VolumeSensitive::default();
        liquidity.set_recent_volume(volume);
        let book = synthesize(liquidity, 10);
        prop_assert!(book.levels().iter().all(|l| !l.size.is_zero()));
        let expected = (volume * 0.25).floor().max(1.0) as u64;
        prop_assert_eq!(book.best_bid().unwrap().size, Quantity::from_int(expected, 0));
    }

    #[test]
    fn prop_competition_aware_never_zero(
        factor in 1e-9f64..=1.0,
        typical in prop_oneof![Just(0.0), 0.0f64..1e9],
    ) {
        let liquidity = CompetitionAware::with_typical_volume(factor, typical).unwrap();
        let book = synthesize(liquidity, 10);
        prop_assert_eq!(book.len(), 2);
        prop_assert!(book.levels().iter().all(|l| !l.size.is_zero()));
        prop_assert_eq!(book.best_bid().unwrap().size, book.best_ask().unwrap().size);
    }

    #[test]
    fn prop_size_aware_splits_conserve_quantity(qty in 11u64..100_000) {
        let book = synthesize(SizeAware, qty);
        prop_assert_eq!(book.depth(BookSide::Bid), Some(Quantity::from_int(qty, 0)));
        prop_assert_eq!(book.depth(BookSide::Ask), Some(Quantity::from_int(qty, 0)));
    }
}
