use tracing::warn;

use crate::book::SyntheticOrderBook;
use crate::error::BookError;
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

/// Recent volume assumed until [`VolumeSensitive::set_recent_volume`] is called.
pub const DEFAULT_RECENT_VOLUME: f64 = 1000.0;
/// Share of recent volume available at best.
const PARTICIPATION: f64 = 0.25;

/// Volume-scaled depth: `max(1, floor(recent_volume * 0.25))` at best,
/// unlimited one tick away.
#[derive(Debug, Clone)]
pub struct VolumeSensitive {
    recent_volume: f64,
}

impl Default for VolumeSensitive {
    fn default() -> Self {
        Self {
            recent_volume: DEFAULT_RECENT_VOLUME,
        }
    }
}

impl VolumeSensitive {
    /// Update the recent traded volume estimate.
    ///
    /// Any value is accepted; non-finite or negative volumes still yield a
    /// one-unit top level.
    pub fn set_recent_volume(&mut self, volume: f64) {
        if !volume.is_finite() || volume < 0.0 {
            warn!(volume, "recent volume is not a finite non-negative number");
        }
        self.recent_volume = volume;
    }

    pub fn recent_volume(&self) -> f64 {
        self.recent_volume
    }
}

impl LiquidityModel for VolumeSensitive {
    fn name(&self) -> &str {
        "volume_sensitive"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        let available = ctx.floored_units(self.recent_volume * PARTICIPATION);
        ctx.build(&[Tier::both(0, available), Tier::both(1, ctx.unlimited())])
            .map(Some)
    }
}
