use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// Size offered per side in either regime.
const SESSION_SIZE: u64 = 500;

/// Time-of-day liquidity: 500 units at best during normal hours, pushed one
/// tick out (a wider effective spread) during low-liquidity periods.
///
/// The period flag is only changed through
/// [`MarketHours::set_low_liquidity_period`].
#[derive(Debug, Clone, Default)]
pub struct MarketHours {
    is_low_liquidity: bool,
}

impl MarketHours {
    pub fn new(is_low_liquidity: bool) -> Self {
        Self { is_low_liquidity }
    }

    pub fn set_low_liquidity_period(&mut self, is_low_liquidity: bool) {
        self.is_low_liquidity = is_low_liquidity;
    }

    pub fn is_low_liquidity_period(&self) -> bool {
        self.is_low_liquidity
    }
}

impl LiquidityModel for MarketHours {
    fn name(&self) -> &str {
        "market_hours"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        let ticks = if self.is_low_liquidity { 1 } else { 0 };
        ctx.build(&[Tier::both(ticks, ctx.units(SESSION_SIZE))])
            .map(Some)
    }
}
