//! Core rules for the platica finance tracker.
//!
//! Everything in this crate is synchronous and pure: money text
//! formatting/parsing, the domain types, budget alert evaluation and the
//! dashboard aggregates. Persistence and session handling live in the
//! `store` crate; presentation lives in the `cli` crate.

pub use alerts::{Alert, AlertId, Severity, evaluate};
pub use analytics::{
    MonthlyComparison, MonthlySummary, category_distribution, month_start, monthly_comparison,
    monthly_totals, months_back, percentage_change, savings_progress,
};
pub use budget::{Budget, DEFAULT_CATEGORIES};
pub use currency::Currency;
pub use error::EngineError;
pub use money::{Money, is_valid_text, reshape_input};
pub use transactions::{NewTransaction, PaymentMethod, Transaction, TransactionKind};

mod alerts;
mod analytics;
mod budget;
mod currency;
mod error;
mod money;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
