use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a [`super::FillModel`].
///
/// Missing fields fall back to [`Default`], so `{}` is a valid config that
/// always fills limit and stop orders, never slips, and synthesizes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillModelConfig {
    /// Probability a limit order fills when the market rests on its price (default 1.0).
    pub prob_fill_on_limit: f64,
    /// Probability a stop order fills when the market rests on its price (default 1.0).
    pub prob_fill_on_stop: f64,
    /// Probability a fill slips by one tick (default 0.0).
    pub prob_slippage: f64,
    /// Seed for the decision source. `None` seeds from OS entropy.
    pub random_seed: Option<u64>,
    /// Liquidity model name, see [`crate::liquidity::list_liquidity_models`].
    pub model: String,
    pub liquidity: LiquidityParams,
}

impl Default for FillModelConfig {
    fn default() -> Self {
        Self {
            prob_fill_on_limit: 1.0,
            prob_fill_on_stop: 1.0,
            prob_slippage: 0.0,
            random_seed: None,
            model: "default".to_string(),
            liquidity: LiquidityParams::default(),
        }
    }
}

impl FillModelConfig {
    /// Parse and validate a JSON config.
    ///
    /// A `random_seed` that is present but not a non-negative integer is
    /// reported as [`ConfigError::InvalidSeed`] rather than a generic parse error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(seed) = value.get("random_seed") {
            if !seed.is_null() && seed.as_u64().is_none() {
                return Err(ConfigError::InvalidSeed(seed.to_string()));
            }
        }

        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability(self.prob_fill_on_limit, "prob_fill_on_limit")?;
        check_probability(self.prob_fill_on_stop, "prob_fill_on_stop")?;
        check_probability(self.prob_slippage, "prob_slippage")?;
        self.liquidity.validate()
    }
}

/// Knobs for the liquidity models that take parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LiquidityParams {
    /// Share of typical volume available to us (competition_aware), in (0, 1].
    pub liquidity_factor: f64,
    /// Baseline per-side volume (competition_aware).
    pub typical_volume: f64,
    /// Initial recent traded volume (volume_sensitive).
    pub recent_volume: f64,
    /// Start in a low-liquidity period (market_hours).
    pub low_liquidity: bool,
}

impl Default for LiquidityParams {
    fn default() -> Self {
        Self {
            liquidity_factor: 0.3,
            typical_volume: 1000.0,
            recent_volume: 1000.0,
            low_liquidity: false,
        }
    }
}

impl LiquidityParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_liquidity_factor(self.liquidity_factor)?;
        check_baseline(self.typical_volume, "typical_volume")?;
        check_baseline(self.recent_volume, "recent_volume")
    }
}

/// `value` must lie in `[0, 1]`; NaN is rejected.
pub fn check_probability(value: f64, name: &'static str) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

pub(crate) fn check_liquidity_factor(value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::LiquidityFactorOutOfRange(value))
    }
}

pub(crate) fn check_baseline(value: f64, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidBaseline { name, value })
    }
}
