//! Error types for fill model construction and synthetic book assembly.

use thiserror::Error;

use crate::types::{BookSide, Price};

/// Invalid fill model, strategy, or instrument configuration.
///
/// Raised at construction time and never recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid f64 for '{name}' not in range [0, 1], was {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("random seed must be a non-negative integer, was {0}")]
    InvalidSeed(String),

    #[error("liquidity factor must be in (0, 1], was {0}")]
    LiquidityFactorOutOfRange(f64),

    #[error("'{name}' must be finite and non-negative, was {value}")]
    InvalidBaseline { name: &'static str, value: f64 },

    #[error("unknown liquidity model '{0}'")]
    UnknownModel(String),

    #[error("precision must be at most 9, was {0}")]
    InvalidPrecision(u8),

    #[error("invalid instrument: {0}")]
    InvalidInstrument(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// A level was rejected by the synthetic book builder.
///
/// This always indicates a bug in the strategy that produced the level.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookError {
    #[error("{side} level at {price} has zero size")]
    ZeroSize { side: BookSide, price: Price },

    #[error("{side} level at {price} does not move away from previous level at {previous}")]
    NonMonotonicPrice {
        side: BookSide,
        price: Price,
        previous: Price,
    },

    #[error("sequence id {got} out of order, expected {expected}")]
    SequenceOutOfOrder { expected: u64, got: u64 },
}

/// Any failure surfaced by [`crate::fill::FillModel::synthesize_liquidity`].
///
/// Configuration problems are reported as [`ConfigError`] at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FillError {
    #[error(transparent)]
    Book(#[from] BookError),
}
