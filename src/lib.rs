//! Fill simulation for backtests.
//!
//! A [`FillModel`] decides, per matching attempt, whether a resting limit or
//! stop order fills and whether the fill slips a tick. It can also hand the
//! matching engine a [`SyntheticOrderBook`] built by a pluggable
//! [`LiquidityModel`], so partial fills and price impact can be computed
//! without real depth data. `None` from the liquidity model means the engine
//! should use its own fill logic.

pub mod book;
pub mod error;
pub mod fill;
pub mod liquidity;
pub mod report;
pub mod types;

pub use book::{BookLevel, SyntheticOrderBook};
pub use error::{BookError, ConfigError, FillError};
pub use fill::{DecisionSource, FillModel, FillModelConfig, LiquidityParams};
pub use liquidity::{LiquidityModel, MarketContext};
pub use types::{BookSide, BookType, Instrument, InstrumentId, Order, OrderSide, Price, Quantity};
