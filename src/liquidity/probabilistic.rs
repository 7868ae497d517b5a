use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{BestPrice, LiquidityModel, MarketContext, OneTickSlippage};

/// Probability of filling at the best quotes rather than one tick away.
const BEST_PRICE_PROBABILITY: f64 = 0.5;

/// Per attempt, behave like [`BestPrice`] half the time and like
/// [`OneTickSlippage`] otherwise.
///
/// Takes one draw from the fill model's decision source per call, separate
/// from the draws made by the fill and slippage gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Probabilistic;

impl LiquidityModel for Probabilistic {
    fn name(&self) -> &str {
        "probabilistic"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        let book = if source.next_uniform() < BEST_PRICE_PROBABILITY {
            BestPrice::build(ctx)?
        } else {
            OneTickSlippage::build(ctx)?
        };
        Ok(Some(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::test_support::*;

    fn best_bid_price(source: &mut DecisionSource) -> i64 {
        let instrument = make_instrument();
        let order = make_order(10);
        let ctx = MarketContext::new(&instrument, &order, px(100), px(101));
        let book = Probabilistic.synthesize(&ctx, source).unwrap().unwrap();
        assert_eq!(book.len(), 2);
        book.best_bid().unwrap().price.raw()
    }

    #[test]
    fn test_both_outcomes_occur() {
        let mut source = DecisionSource::new(Some(123));
        let bids: Vec<i64> = (0..200).map(|_| best_bid_price(&mut source)).collect();
        assert!(bids.iter().all(|b| *b == 100 || *b == 99));
        let at_best = bids.iter().filter(|b| **b == 100).count();
        assert!(at_best > 60 && at_best < 140, "at_best = {}", at_best);
    }

    #[test]
    fn test_seeded_sequence_is_reproducible() {
        let run = || {
            let mut source = DecisionSource::new(Some(9));
            (0..50).map(|_| best_bid_price(&mut source)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
