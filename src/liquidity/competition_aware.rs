use crate::book::SyntheticOrderBook;
use crate::error::{BookError, ConfigError};
use crate::fill::config::{check_baseline, check_liquidity_factor};
use crate::fill::DecisionSource;
use crate::liquidity::{LiquidityModel, MarketContext, Tier};

pub const DEFAULT_LIQUIDITY_FACTOR: f64 = 0.3;
/// Per-side volume baseline used when none is configured.
pub const DEFAULT_TYPICAL_VOLUME: f64 = 1000.0;

/// Competition-discounted depth: only `liquidity_factor` of the typical
/// per-side volume is available to us, all at the best quotes.
#[derive(Debug, Clone)]
pub struct CompetitionAware {
    liquidity_factor: f64,
    typical_volume: f64,
}

impl CompetitionAware {
    /// `liquidity_factor` must be in `(0, 1]`.
    pub fn new(liquidity_factor: f64) -> Result<Self, ConfigError> {
        Self::with_typical_volume(liquidity_factor, DEFAULT_TYPICAL_VOLUME)
    }

    /// As [`Self::new`] with an explicit typical volume baseline, which must
    /// be finite and non-negative.
    pub fn with_typical_volume(
        liquidity_factor: f64,
        typical_volume: f64,
    ) -> Result<Self, ConfigError> {
        check_liquidity_factor(liquidity_factor)?;
        check_baseline(typical_volume, "typical_volume")?;
        Ok(Self {
            liquidity_factor,
            typical_volume,
        })
    }

    pub fn liquidity_factor(&self) -> f64 {
        self.liquidity_factor
    }

    pub fn typical_volume(&self) -> f64 {
        self.typical_volume
    }
}

impl Default for CompetitionAware {
    fn default() -> Self {
        Self {
            liquidity_factor: DEFAULT_LIQUIDITY_FACTOR,
            typical_volume: DEFAULT_TYPICAL_VOLUME,
        }
    }
}

impl LiquidityModel for CompetitionAware {
    fn name(&self) -> &str {
        "competition_aware"
    }

    fn synthesize(
        &self,
        ctx: &MarketContext<'_>,
        _source: &mut DecisionSource,
    ) -> Result<Option<SyntheticOrderBook>, BookError> {
        // Both sides share one baseline but are sized independently.
        let bid_size = ctx.floored_units(self.typical_volume * self.liquidity_factor);
        let ask_size = ctx.floored_units(self.typical_volume * self.liquidity_factor);
        ctx.build(&[Tier {
            ticks: 0,
            bid_size,
            ask_size,
        }])
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::test_support::*;
    use crate::types::BookSide;

    #[test]
    fn test_default_factor() {
        let book = synth(&CompetitionAware::default(), 10).unwrap();
        assert_eq!(
            shape(&book),
            vec![(BookSide::Bid, 100, 300), (BookSide::Ask, 101, 300)]
        );
    }

    #[test]
    fn test_full_factor_gets_all_volume() {
        let model = CompetitionAware::new(1.0).unwrap();
        let book = synth(&model, 10).unwrap();
        assert_eq!(book.best_ask().unwrap().size, qty(1000));
    }

    #[test]
    fn test_tiny_share_floors_at_one() {
        let model = CompetitionAware::with_typical_volume(0.001, 10.0).unwrap();
        let book = synth(&model, 10).unwrap();
        assert_eq!(book.best_bid().unwrap().size, qty(1));

        let model = CompetitionAware::with_typical_volume(0.5, 0.0).unwrap();
        let book = synth(&model, 10).unwrap();
        assert_eq!(book.best_ask().unwrap().size, qty(1));
    }

    #[test]
    fn test_factor_validated() {
        assert_eq!(
            CompetitionAware::new(0.0).unwrap_err(),
            ConfigError::LiquidityFactorOutOfRange(0.0)
        );
        assert!(CompetitionAware::new(1.01).is_err());
        assert!(CompetitionAware::new(f64::NAN).is_err());
        assert!(CompetitionAware::with_typical_volume(0.5, f64::INFINITY).is_err());
    }
}
