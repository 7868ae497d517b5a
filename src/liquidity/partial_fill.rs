use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// Size we can take at best before the queue ahead of us is exhausted.
const QUEUE_CAP: u64 = 5;

/// Queue-position cap of 5 units at best, with unlimited liquidity one tick
/// away so excess demand slips instead of filling at best.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitOrderPartialFill;

impl LiquidityModel for LimitOrderPartialFill {
    fn name(&self) -> &str {
        "limit_order_partial_fill"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        ctx.build(&[
            Tier::both(0, ctx.units(QUEUE_CAP)),
            Tier::both(1, ctx.unlimited()),
        ])
        .map(Some)
    }
}
