//! Wire types exchanged with the external record store and the identity
//! provider.
//!
//! Amounts travel as `*_minor` integer céntimos; converting to and from the
//! engine's `Money` happens in the `store` crate, never here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction {
    use super::*;

    /// A stored transaction row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionRow {
        pub id: Uuid,
        pub user_id: Uuid,
        pub occurred_at: DateTime<Utc>,
        pub amount_minor: i64,
        pub category: String,
        #[serde(default)]
        pub description: String,
        /// `income` or `expense`.
        pub kind: String,
        /// `cash`, `credit`, `debit`, `transfer` or `sinpe`.
        pub payment_method: String,
    }

    /// Insert payload; the store assigns the row id.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub user_id: Uuid,
        pub occurred_at: DateTime<Utc>,
        pub amount_minor: i64,
        pub category: String,
        pub description: String,
        pub kind: String,
        pub payment_method: String,
    }
}

pub mod budget {
    use super::*;

    /// The per-user budget row (at most one per user).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BudgetRow {
        pub id: Uuid,
        pub user_id: Uuid,
        pub monthly_income_minor: i64,
        pub monthly_savings_goal_minor: i64,
        pub yearly_savings_goal_minor: i64,
        pub spending_limit_minor: i64,
        /// Category name -> limit in minor units.
        #[serde(default)]
        pub categories: BTreeMap<String, i64>,
    }

    /// Full-replace payload used for both insert and update on save.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BudgetUpsert {
        pub user_id: Uuid,
        pub monthly_income_minor: i64,
        pub monthly_savings_goal_minor: i64,
        pub yearly_savings_goal_minor: i64,
        pub spending_limit_minor: i64,
        pub categories: BTreeMap<String, i64>,
    }
}

pub mod session {
    use super::*;

    /// Identity provider's answer to "who does this token belong to".
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserInfo {
        pub id: Uuid,
        #[serde(default)]
        pub email: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::budget::BudgetRow;

    #[test]
    fn budget_categories_default_to_empty() {
        let json = r#"{
            "id": "7e3e44e4-5566-4b6f-a31e-5a68b0a0c111",
            "user_id": "7e3e44e4-5566-4b6f-a31e-5a68b0a0c222",
            "monthly_income_minor": 50000000,
            "monthly_savings_goal_minor": 0,
            "yearly_savings_goal_minor": 0,
            "spending_limit_minor": 10000000
        }"#;
        let row: BudgetRow = serde_json::from_str(json).unwrap();
        assert!(row.categories.is_empty());
        assert_eq!(row.monthly_income_minor, 500_000_00);
    }
}
