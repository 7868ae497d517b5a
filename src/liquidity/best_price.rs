use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// Unlimited liquidity at the best bid and ask: every order fills in full at
/// the top of book.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestPrice;

impl BestPrice {
    pub(crate) fn build(ctx: &MarketContext<'_>) -> Result<SyntheticOrderBook, BookError> {
        ctx.build(&[Tier::both(0, ctx.unlimited())])
    }
}

impl LiquidityModel for BestPrice {
    fn name(&self) -> &str {
        "best_price"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        Self::build(ctx).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::test_support::*;
    use crate::liquidity::UNLIMITED;
    use crate::types::BookSide;

    #[test]
    fn test_one_level_per_side_at_best() {
        let book = synth(&BestPrice, 10).unwrap();
        assert_eq!(
            shape(&book),
            vec![
                (BookSide::Bid, 100, UNLIMITED),
                (BookSide::Ask, 101, UNLIMITED),
            ]
        );
        assert_eq!(book.instrument_id().as_str(), "TEST.SIM");
    }

    #[test]
    fn test_unlimited_covers_large_orders() {
        let book = synth(&BestPrice, 500_000).unwrap();
        assert!(book.depth(BookSide::Ask).unwrap() >= qty(500_000));
    }
}
