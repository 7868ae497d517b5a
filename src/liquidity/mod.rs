//! Liquidity models: policies that build a synthetic order book around the
//! current best bid/ask so the matching engine can compute partial fills,
//! price impact and queue effects without real depth data.
//!
//! Every model lays out tiers the same way: bid tiers start at the best bid
//! and step down one tick per tier, ask tiers start at the best ask and step
//! up. Each tier adds its bid level, then its ask level.

pub mod best_price;
pub mod competition_aware;
pub mod market_hours;
pub mod one_tick_slippage;
pub mod partial_fill;
pub mod probabilistic;
pub mod size_aware;
pub mod three_tier;
pub mod two_tier;
pub mod volume_sensitive;

pub use best_price::BestPrice;
pub use competition_aware::CompetitionAware;
pub use market_hours::MarketHours;
pub use one_tick_slippage::OneTickSlippage;
pub use partial_fill::LimitOrderPartialFill;
pub use probabilistic::Probabilistic;
pub use size_aware::SizeAware;
pub use three_tier::ThreeTier;
pub use two_tier::TwoTier;
pub use volume_sensitive::VolumeSensitive;

use crate::book::SyntheticOrderBook;
use crate::error::{BookError, ConfigError};
use crate::fill::{DecisionSource, LiquidityParams};
use crate::types::{BookSide, BookType, Instrument, Order, Price, Quantity};

/// Size used for "unlimited" levels, in whole units.
pub const UNLIMITED: u64 = 1_000_000;

/// A policy for synthesizing liquidity around the best quotes.
///
/// Models are pure functions of the market context and, for the stateful
/// ones, their own fields. The only shared mutable input is the fill
/// model's decision source.
pub trait LiquidityModel: Send {
    fn name(&self) -> &str;

    /// Build a book for this attempt, or `Ok(None)` to let the matching
    /// engine use its own logic.
    fn synthesize(
        &self,
        _ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        Ok(None)
    }
}

impl LiquidityModel for Box<dyn LiquidityModel> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        (**self).synthesize(ctx, source)
    }
}

/// Default model: never synthesizes, the matching engine falls back to its
/// intrinsic fill logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynthesis;

impl LiquidityModel for NoSynthesis {
    fn name(&self) -> &str {
        "default"
    }
}

/// Inputs for one synthesis call.
#[derive(Debug, Clone, Copy)]
pub struct MarketContext<'a> {
    pub instrument: &'a Instrument,
    pub order: &'a Order,
    pub best_bid: Price,
    pub best_ask: Price,
}

/// One tier: distance from the best quote in ticks and the size per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub ticks: u32,
    pub bid_size: Quantity,
    pub ask_size: Quantity,
}

impl Tier {
    /// Same size on both sides.
    pub fn both(ticks: u32, size: Quantity) -> Self {
        Self {
            ticks,
            bid_size: size,
            ask_size: size,
        }
    }
}

impl<'a> MarketContext<'a> {
    pub fn new(
        instrument: &'a Instrument,
        order: &'a Order,
        best_bid: Price,
        best_ask: Price,
    ) -> Self {
        Self {
            instrument,
            order,
            best_bid,
            best_ask,
        }
    }

    /// Bid price `ticks` below the best bid.
    pub fn bid_at(&self, ticks: u32) -> Price {
        self.best_bid
            .sub_ticks(self.instrument.price_increment(), ticks)
    }

    /// Ask price `ticks` above the best ask.
    pub fn ask_at(&self, ticks: u32) -> Price {
        self.best_ask
            .add_ticks(self.instrument.price_increment(), ticks)
    }

    /// Whole units at the instrument's size precision.
    pub fn units(&self, units: u64) -> Quantity {
        Quantity::from_int(units, self.instrument.size_precision())
    }

    pub fn unlimited(&self) -> Quantity {
        self.units(UNLIMITED)
    }

    /// `max(1, floor(value))` whole units. NaN, zero and negative inputs
    /// all give one unit.
    ///
    /// The floor is one whole unit, not the instrument's size increment: a
    /// lot size above one unit is not enforced here.
    pub fn floored_units(&self, value: f64) -> Quantity {
        let units = value.floor().max(1.0);
        self.units(units as u64)
    }

    pub fn empty_book(&self) -> SyntheticOrderBook {
        SyntheticOrderBook::new(self.instrument.id().clone(), BookType::L2Mbp)
    }

    /// Build a book with one bid and one ask level per tier, in tier order.
    pub fn build(&self, tiers: &[Tier]) -> Result<SyntheticOrderBook, BookError> {
        let mut book = self.empty_book();
        for tier in tiers {
            book.push_level(BookSide::Bid, self.bid_at(tier.ticks), tier.bid_size)?;
            book.push_level(BookSide::Ask, self.ask_at(tier.ticks), tier.ask_size)?;
        }
        Ok(book)
    }
}

/// Create a liquidity model by name.
///
/// Returns `Ok(None)` for unknown names and an error when `params` are out
/// of range for the named model.
pub fn create_liquidity_model(
    name: &str,
    params: &LiquidityParams,
) -> Result<Option<Box<dyn LiquidityModel>>, ConfigError> {
    let model: Box<dyn LiquidityModel> = match name {
        "default" => Box::new(NoSynthesis),
        "best_price" => Box::new(BestPrice),
        "one_tick_slippage" => Box::new(OneTickSlippage),
        "two_tier" => Box::new(TwoTier),
        "probabilistic" => Box::new(Probabilistic),
        "size_aware" => Box::new(SizeAware),
        "limit_order_partial_fill" => Box::new(LimitOrderPartialFill),
        "three_tier" => Box::new(ThreeTier),
        "market_hours" => {
            let mut model = MarketHours::default();
            model.set_low_liquidity_period(params.low_liquidity);
            Box::new(model)
        }
        "volume_sensitive" => {
            let mut model = VolumeSensitive::default();
            model.set_recent_volume(params.recent_volume);
            Box::new(model)
        }
        "competition_aware" => Box::new(CompetitionAware::with_typical_volume(
            params.liquidity_factor,
            params.typical_volume,
        )?),
        _ => return Ok(None),
    };
    Ok(Some(model))
}

/// List all liquidity model names and descriptions.
pub fn list_liquidity_models() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default", "No synthetic book: the matching engine uses its own fill logic"),
        ("best_price", "Unlimited liquidity at the best bid and ask"),
        ("one_tick_slippage", "Nothing at best; unlimited one tick away, every fill slips a tick"),
        ("two_tier", "10 at best, unlimited one tick away"),
        ("probabilistic", "Coin flip per attempt between best_price and one_tick_slippage"),
        ("size_aware", "Small orders (<= 10) get 50 at best; larger ones 10 at best and the rest one tick away"),
        ("limit_order_partial_fill", "5 at best (queue position cap), unlimited one tick away"),
        ("three_tier", "50 at best, 30 one tick away, 20 two ticks away"),
        ("market_hours", "500 at best, or one tick away during low-liquidity periods"),
        ("volume_sensitive", "25% of recent volume at best, unlimited one tick away"),
        ("competition_aware", "Liquidity factor share of typical volume at best"),
    ]
}

/// Check if a liquidity model name is valid.
pub fn is_known_liquidity_model(name: &str) -> bool {
    list_liquidity_models().iter().any(|(n, _)| *n == name)
}
