//! Budget configuration.

use std::collections::BTreeMap;

use crate::{EngineError, Money, ResultEngine};

/// Per-user budget: global monthly figures plus per-category spending limits.
///
/// There is at most one budget per user; saves replace the whole record.
/// Categories are kept in a `BTreeMap` so every consumer (alert evaluation,
/// rendering, export) sees them in a stable order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub monthly_income: Money,
    pub monthly_savings_goal: Money,
    pub yearly_savings_goal: Money,
    pub spending_limit: Money,
    pub categories: BTreeMap<String, Money>,
}

impl Budget {
    pub fn new(
        monthly_income: Money,
        monthly_savings_goal: Money,
        yearly_savings_goal: Money,
        spending_limit: Money,
        categories: BTreeMap<String, Money>,
    ) -> ResultEngine<Self> {
        for (field, amount) in [
            ("monthly_income", monthly_income),
            ("monthly_savings_goal", monthly_savings_goal),
            ("yearly_savings_goal", yearly_savings_goal),
            ("spending_limit", spending_limit),
        ] {
            if amount.is_negative() {
                return Err(EngineError::InvalidBudget(format!(
                    "{field} must be >= 0"
                )));
            }
        }
        for (category, limit) in &categories {
            if limit.is_negative() {
                return Err(EngineError::InvalidBudget(format!(
                    "limit for category '{category}' must be >= 0"
                )));
            }
        }
        Ok(Self {
            monthly_income,
            monthly_savings_goal,
            yearly_savings_goal,
            spending_limit,
            categories,
        })
    }

    /// The limit configured for a category, if any.
    #[must_use]
    pub fn category_limit(&self, category: &str) -> Option<Money> {
        self.categories.get(category).copied()
    }
}

/// The category set offered by default when configuring a budget.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["fijos", "variables", "ocio", "ahorro", "otros"];
