use std::fmt;

use tracing::debug;

use crate::book::SyntheticOrderBook;
use crate::error::{ConfigError, FillError};
use crate::fill::config::{check_probability, FillModelConfig};
use crate::fill::source::DecisionSource;
use crate::liquidity::{create_liquidity_model, LiquidityModel, MarketContext, NoSynthesis};
use crate::types::{Instrument, Order, Price};

/// Probability-gated fill decisions plus a pluggable liquidity model.
///
/// The model owns its [`DecisionSource`]; the same source feeds the
/// probability gates and any liquidity model that makes a random choice.
/// One instance per simulated venue/instrument context.
pub struct FillModel<L: LiquidityModel = NoSynthesis> {
    prob_fill_on_limit: f64,
    prob_fill_on_stop: f64,
    prob_slippage: f64,
    source: DecisionSource,
    liquidity: L,
}

impl FillModel<NoSynthesis> {
    /// Create a fill model that only gates fills and never synthesizes liquidity.
    pub fn new(
        prob_fill_on_limit: f64,
        prob_fill_on_stop: f64,
        prob_slippage: f64,
        random_seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        Self::with_liquidity(
            prob_fill_on_limit,
            prob_fill_on_stop,
            prob_slippage,
            random_seed,
            NoSynthesis,
        )
    }
}

impl FillModel<Box<dyn LiquidityModel>> {
    /// Build a model from config, resolving the liquidity model by name.
    pub fn from_config(config: &FillModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let liquidity = create_liquidity_model(&config.model, &config.liquidity)?
            .ok_or_else(|| ConfigError::UnknownModel(config.model.clone()))?;
        Self::with_liquidity(
            config.prob_fill_on_limit,
            config.prob_fill_on_stop,
            config.prob_slippage,
            config.random_seed,
            liquidity,
        )
    }
}

impl<L: LiquidityModel> FillModel<L> {
    pub fn with_liquidity(
        prob_fill_on_limit: f64,
        prob_fill_on_stop: f64,
        prob_slippage: f64,
        random_seed: Option<u64>,
        liquidity: L,
    ) -> Result<Self, ConfigError> {
        check_probability(prob_fill_on_limit, "prob_fill_on_limit")?;
        check_probability(prob_fill_on_stop, "prob_fill_on_stop")?;
        check_probability(prob_slippage, "prob_slippage")?;
        Ok(Self {
            prob_fill_on_limit,
            prob_fill_on_stop,
            prob_slippage,
            source: DecisionSource::new(random_seed),
            liquidity,
        })
    }

    pub fn prob_fill_on_limit(&self) -> f64 {
        self.prob_fill_on_limit
    }

    pub fn prob_fill_on_stop(&self) -> f64 {
        self.prob_fill_on_stop
    }

    pub fn prob_slippage(&self) -> f64 {
        self.prob_slippage
    }

    pub fn liquidity(&self) -> &L {
        &self.liquidity
    }

    /// Mutable access for liquidity models with their own setters
    /// (e.g. [`crate::liquidity::MarketHours::set_low_liquidity_period`]).
    pub fn liquidity_mut(&mut self) -> &mut L {
        &mut self.liquidity
    }

    /// Reinitialize the decision source. See [`DecisionSource::seed`].
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.source.seed(seed);
    }

    pub fn is_limit_filled(&mut self) -> bool {
        self.event_occurs(self.prob_fill_on_limit)
    }

    pub fn is_stop_filled(&mut self) -> bool {
        self.event_occurs(self.prob_fill_on_stop)
    }

    pub fn is_slipped(&mut self) -> bool {
        self.event_occurs(self.prob_slippage)
    }

    /// Decide whether an event with probability `probability` happens.
    ///
    /// Exactly 0 and 1 short-circuit without consuming a draw.
    pub fn event_occurs(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        probability >= self.source.next_uniform()
    }

    /// Ask the liquidity model for a synthetic book.
    ///
    /// `Ok(None)` means the caller should use its own matching logic.
    pub fn synthesize_liquidity(
        &mut self,
        instrument: &Instrument,
        order: &Order,
        best_bid: Price,
        best_ask: Price,
    ) -> Result<Option<SyntheticOrderBook>, FillError> {
        let ctx = MarketContext::new(instrument, order, best_bid, best_ask);
        let book = self.liquidity.synthesize(&ctx, &mut self.source)?;
        if let Some(ref book) = book {
            debug!(
                model = self.liquidity.name(),
                instrument = %instrument.id(),
                levels = book.len(),
                "synthesized liquidity"
            );
        }
        Ok(book)
    }
}

impl<L: LiquidityModel> fmt::Debug for FillModel<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FillModel")
            .field("prob_fill_on_limit", &self.prob_fill_on_limit)
            .field("prob_fill_on_stop", &self.prob_fill_on_stop)
            .field("prob_slippage", &self.prob_slippage)
            .field("liquidity", &self.liquidity.name())
            .finish_non_exhaustive()
    }
}

impl<L: LiquidityModel> fmt::Display for FillModel<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FillModel(prob_fill_on_limit: {}, prob_fill_on_stop: {}, prob_slippage: {}, liquidity: {})",
            self.prob_fill_on_limit,
            self.prob_fill_on_stop,
            self.prob_slippage,
            self.liquidity.name()
        )
    }
}
