use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// (ticks from best, size) per tier.
const TIERS: [(u32, u64); 3] = [(0, 50), (1, 30), (2, 20)];

/// 50 at best, 30 one tick away, 20 two ticks away.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeTier;

impl LiquidityModel for ThreeTier {
    fn name(&self) -> &str {
        "three_tier"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        let tiers: Vec<Tier> = TIERS
            .iter()
            .map(|&(ticks, size)| Tier::both(ticks, ctx.units(size)))
            .collect();
        ctx.build(&tiers).map(Some)
    }
}
