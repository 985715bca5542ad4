//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `RtError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The base error type for `rt-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum RtError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unsupported {what} policy {code:?}")]
    Unsupported {
        what: &'static str,
        code: String,
    },
}

/// Shorthand result type for all `rt-*` crates.
pub type RtResult<T> = Result<T, RtError>;
