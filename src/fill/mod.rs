pub mod config;
pub mod model;
pub mod source;

pub use config::{FillModelConfig, LiquidityParams};
pub use model::FillModel;
pub use source::DecisionSource;
