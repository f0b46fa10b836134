//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense event recorded by a user.
//! It is immutable once created; corrections happen by recording new events.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidTransaction(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// Payment rail used for a transaction.
///
/// `Sinpe` is the local mobile-transfer rail (SINPE Móvil).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Credit,
    Debit,
    Transfer,
    Sinpe,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Transfer => "transfer",
            Self::Sinpe => "sinpe",
        }
    }

    /// Label shown on human surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Credit => "Tarjeta de Crédito",
            Self::Debit => "Tarjeta de Débito",
            Self::Transfer => "Transferencia",
            Self::Sinpe => "SINPE Móvil",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            "transfer" => Ok(Self::Transfer),
            "sinpe" => Ok(Self::Sinpe),
            other => Err(EngineError::InvalidTransaction(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// A draft transaction as submitted by the user, before the store assigns
/// ownership and identity.
///
/// The amount is validated here so no zero or negative amount ever reaches
/// the store: fail-soft text parsing absorbs bad input to zero, and zero is
/// not a recordable movement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub occurred_at: DateTime<Utc>,
    pub amount: Money,
    pub category: String,
    pub description: String,
    pub kind: TransactionKind,
    pub payment_method: PaymentMethod,
}

impl NewTransaction {
    pub fn new(
        occurred_at: DateTime<Utc>,
        amount: Money,
        category: String,
        description: String,
        kind: TransactionKind,
        payment_method: PaymentMethod,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            occurred_at,
            amount,
            category,
            description,
            kind,
            payment_method,
        })
    }
}

/// A stored transaction, owned exclusively by `user_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub amount: Money,
    pub category: String,
    pub description: String,
    pub kind: TransactionKind,
    pub payment_method: PaymentMethod,
    pub user_id: Uuid,
}

impl Transaction {
    /// Rebuilds a transaction from stored fields, re-checking the amount
    /// invariant the store is supposed to uphold.
    pub fn from_stored(
        id: Uuid,
        occurred_at: DateTime<Utc>,
        amount: Money,
        category: String,
        description: String,
        kind: TransactionKind,
        payment_method: PaymentMethod,
        user_id: Uuid,
    ) -> ResultEngine<Self> {
        if amount.is_negative() {
            return Err(EngineError::InvalidTransaction(format!(
                "stored transaction {id} has a negative amount"
            )));
        }
        Ok(Self {
            id,
            occurred_at,
            amount,
            category,
            description,
            kind,
            payment_method,
            user_id,
        })
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    #[must_use]
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_wire_strings() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(TransactionKind::try_from(kind.as_str()), Ok(kind));
        }
        assert!(TransactionKind::try_from("transfer").is_err());
    }

    #[test]
    fn payment_method_round_trips_wire_strings() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Credit,
            PaymentMethod::Debit,
            PaymentMethod::Transfer,
            PaymentMethod::Sinpe,
        ] {
            assert_eq!(PaymentMethod::try_from(method.as_str()), Ok(method));
        }
        assert!(PaymentMethod::try_from("cheque").is_err());
    }

    #[test]
    fn draft_rejects_non_positive_amounts() {
        let draft = NewTransaction::new(
            Utc::now(),
            Money::ZERO,
            "ocio".to_string(),
            String::new(),
            TransactionKind::Expense,
            PaymentMethod::Cash,
        );
        assert!(matches!(draft, Err(EngineError::InvalidAmount(_))));
    }
}
