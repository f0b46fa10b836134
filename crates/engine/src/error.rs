//! The module contains the errors the engine can raise.
//!
//! The text-engine entry points (`Money::parse_text`, `reshape_input`,
//! `is_valid_text`) and the alert evaluator are total and never return these;
//! errors only come from strict commit-time parsing and from the validating
//! constructors.

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),
}
