use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// Size resting at the best quotes.
const TOP_SIZE: u64 = 10;

/// 10 units at the best quotes, unlimited one tick away.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoTier;

impl LiquidityModel for TwoTier {
    fn name(&self) -> &str {
        "two_tier"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        ctx.build(&[
            Tier::both(0, ctx.units(TOP_SIZE)),
            Tier::both(1, ctx.unlimited()),
        ])
        .map(Some)
    }
}
