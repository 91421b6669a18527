//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EvError` as one variant
//! via `#[from]`, so configuration and entropy failures raised here surface
//! unchanged at the top level.

use thiserror::Error;

/// The base error type shared by all `ev-*` crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown vehicle category `{0}`")]
    UnknownCategory(String),

    #[error("entropy source unavailable: {0}")]
    Entropy(#[from] rand::Error),
}

/// Shorthand result type for `ev-core`.
pub type EvResult<T> = Result<T, EvError>;
