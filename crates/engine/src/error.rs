//! The module contains the errors the engine can return.
//!
//! The settlement operations themselves are total and never fail; errors only
//! come from the validating helpers:
//!
//! - [`InvalidAmount`] when a strict amount parse fails.
//! - [`InvalidPeriod`] when a month selector can't be parsed.
//! - [`InvalidEntry`] when a new entry would be malformed.
//! - [`NotOwner`] when a user edits an entry they don't own.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidPeriod`]: EngineError::InvalidPeriod
//!  [`InvalidEntry`]: EngineError::InvalidEntry
//!  [`NotOwner`]: EngineError::NotOwner
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("\"{0}\" is not the owner of the entry")]
    NotOwner(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
