use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// No liquidity at the best quotes; unlimited one tick away, so every fill
/// slips by exactly one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneTickSlippage;

impl OneTickSlippage {
    pub(crate) fn build(ctx: &MarketContext<'_>) -> Result<SyntheticOrderBook, BookError> {
        ctx.build(&[Tier::both(1, ctx.unlimited())])
    }
}

impl LiquidityModel for OneTickSlippage {
    fn name(&self) -> &str {
        "one_tick_slippage"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        Self::build(ctx).map(Some)
    }
}
