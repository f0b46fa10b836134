//! Budget alert evaluation.
//!
//! Pure derivation of threshold notifications from a budget and the current
//! period's transactions. No I/O: callers fetch the inputs, and a failed
//! fetch is reported through [`Alert::fetch_failed`] instead of being raised
//! from here.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::{Budget, Money, Transaction};

/// Stable identity of an alert rule instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlertId {
    NoBudget,
    SpendingWarning,
    SpendingCritical,
    SavingsGoal,
    Category(String),
    FetchFailed,
}

impl AlertId {
    /// Slug used to key rendered alerts, e.g. `category-ocio`.
    #[must_use]
    pub fn slug(&self) -> String {
        match self {
            Self::NoBudget => "no-budget".to_string(),
            Self::SpendingWarning => "spending-warning".to_string(),
            Self::SpendingCritical => "spending-critical".to_string(),
            Self::SavingsGoal => "savings-goal".to_string(),
            Self::Category(name) => format!("category-{name}"),
            Self::FetchFailed => "error".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }
}

/// A derived, non-persistent notification.
///
/// `raised_at` is the evaluation time, not an event time: alerts are
/// recomputed from scratch on every evaluation and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    /// The alert callers render when fetching the evaluator's inputs fails.
    ///
    /// Data-fetch failures are the caller's to catch; the evaluator itself is
    /// total over already-fetched inputs.
    #[must_use]
    pub fn fetch_failed(now: DateTime<Utc>) -> Alert {
        Alert {
            id: AlertId::FetchFailed,
            message: "Error al cargar las alertas. Por favor, intenta de nuevo más tarde."
                .to_string(),
            severity: Severity::Warning,
            raised_at: now,
        }
    }
}

/// Derives the ordered alert list for the current period.
///
/// `transactions` must already be restricted to the period under evaluation
/// (the current calendar month); `now` is the user's local clock, used both
/// for the day-of-month gate and as the `raised_at` stamp.
///
/// Rules run in a fixed order: missing budget short-circuits; then the
/// spending limit (90% critical, else 80% warning, mutually exclusive); then
/// the savings goal, gated to the second half of the month so the user has
/// had time to save; then one alert per over-threshold category, in category
/// name order.
///
/// With a budget configured and no rule firing, the result is **empty** and
/// the presentation layer renders the "all clear" state.
#[must_use]
pub fn evaluate<Tz: TimeZone>(
    budget: Option<&Budget>,
    transactions: &[Transaction],
    now: DateTime<Tz>,
) -> Vec<Alert> {
    let raised_at = now.with_timezone(&Utc);

    let Some(budget) = budget else {
        return vec![Alert {
            id: AlertId::NoBudget,
            message: "No has configurado tu presupuesto. Por favor, configura tu presupuesto \
                      para recibir alertas."
                .to_string(),
            severity: Severity::Info,
            raised_at,
        }];
    };

    let mut alerts = Vec::new();
    let total_expenses = sum_expenses(transactions, None);

    if budget.spending_limit.is_positive() {
        let pct = rounded_percent(total_expenses, budget.spending_limit);
        let amounts = format!("({total_expenses} de {})", budget.spending_limit);
        if ratio_at_least(total_expenses, budget.spending_limit, 90) {
            alerts.push(Alert {
                id: AlertId::SpendingCritical,
                message: format!(
                    "¡Alerta crítica! Has alcanzado el {pct}% de tu límite de gastos mensual \
                     {amounts}"
                ),
                severity: Severity::Warning,
                raised_at,
            });
        } else if ratio_at_least(total_expenses, budget.spending_limit, 80) {
            alerts.push(Alert {
                id: AlertId::SpendingWarning,
                message: format!(
                    "¡Precaución! Has alcanzado el {pct}% de tu límite de gastos mensual \
                     {amounts}"
                ),
                severity: Severity::Warning,
                raised_at,
            });
        }
    }

    if budget.monthly_income.is_positive()
        && budget.monthly_savings_goal.is_positive()
        && now.day() > 15
    {
        let savings = budget.monthly_income.cents() - total_expenses.cents();
        // progress < 50% of the goal, in exact integer arithmetic.
        if savings * 2 < budget.monthly_savings_goal.cents() {
            alerts.push(Alert {
                id: AlertId::SavingsGoal,
                message: format!(
                    "Estás lejos de tu meta de ahorro mensual. Ahorro actual: {}, Meta: {}",
                    Money::new(savings),
                    budget.monthly_savings_goal
                ),
                severity: Severity::Warning,
                raised_at,
            });
        }
    }

    for (category, limit) in &budget.categories {
        if !limit.is_positive() {
            continue;
        }
        let spent = sum_expenses(transactions, Some(category));
        if ratio_at_least(spent, *limit, 90) {
            let pct = rounded_percent(spent, *limit);
            alerts.push(Alert {
                id: AlertId::Category(category.clone()),
                message: format!(
                    "Has superado el {pct}% del límite en la categoría {category} ({spent} de \
                     {limit})"
                ),
                severity: Severity::Warning,
                raised_at,
            });
        }
    }

    alerts
}

fn sum_expenses(transactions: &[Transaction], category: Option<&str>) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| category.is_none_or(|c| t.category == c))
        .fold(Money::ZERO, |acc, t| acc.saturating_add(t.amount))
}

/// `part / whole >= pct%`, exact on minor units. `whole` must be positive.
fn ratio_at_least(part: Money, whole: Money, pct: i64) -> bool {
    i128::from(part.cents()) * 100 >= i128::from(whole.cents()) * i128::from(pct)
}

/// `round(part / whole * 100)` half-up, for non-negative `part` and positive
/// `whole`.
fn rounded_percent(part: Money, whole: Money) -> i64 {
    let part = i128::from(part.cents());
    let whole = i128::from(whole.cents());
    ((part * 200 + whole) / (whole * 2)) as i64
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{PaymentMethod, TransactionKind};
    use uuid::Uuid;

    fn expense(category: &str, cents: i64) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            occurred_at: Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).single().unwrap(),
            amount: Money::new(cents),
            category: category.to_string(),
            description: String::new(),
            kind: TransactionKind::Expense,
            payment_method: PaymentMethod::Cash,
            user_id: Uuid::nil(),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, d, 12, 0, 0)
            .single().unwrap()
    }

    fn budget_with_limit(limit_cents: i64) -> Budget {
        Budget {
            spending_limit: Money::new(limit_cents),
            ..Budget::default()
        }
    }

    #[test]
    fn missing_budget_short_circuits() {
        let alerts = evaluate(None, &[expense("ocio", 1_00)], day(20));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, AlertId::NoBudget);
        assert_eq!(alerts[0].severity, Severity::Info);
        assert_eq!(alerts[0].id.slug(), "no-budget");
    }

    #[test]
    fn critical_and_warning_are_mutually_exclusive() {
        let budget = budget_with_limit(100_000_00);
        let alerts = evaluate(Some(&budget), &[expense("fijos", 95_000_00)], day(5));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, AlertId::SpendingCritical);
        assert!(alerts[0].message.contains("95%"));
        assert!(alerts[0].message.contains("₡95.000,00 de ₡100.000,00"));
    }

    #[test]
    fn warning_fires_between_80_and_90_percent() {
        let budget = budget_with_limit(100_000_00);
        let alerts = evaluate(Some(&budget), &[expense("fijos", 85_000_00)], day(5));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, AlertId::SpendingWarning);

        let quiet = evaluate(Some(&budget), &[expense("fijos", 79_999_99)], day(5));
        assert!(quiet.is_empty());
    }

    #[test]
    fn zero_spending_limit_disables_the_rule() {
        let budget = budget_with_limit(0);
        let alerts = evaluate(Some(&budget), &[expense("fijos", 1_000_00)], day(5));
        assert!(alerts.is_empty());
    }

    #[test]
    fn savings_goal_waits_for_mid_month() {
        let budget = Budget {
            monthly_income: Money::new(500_000_00),
            monthly_savings_goal: Money::new(100_000_00),
            ..Budget::default()
        };
        // 480k spent leaves 20k saved, 20% of the goal.
        let txs = [expense("fijos", 480_000_00)];

        assert!(evaluate(Some(&budget), &txs, day(15)).is_empty());

        let alerts = evaluate(Some(&budget), &txs, day(16));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, AlertId::SavingsGoal);
        assert!(alerts[0].message.contains("₡20.000,00"));
    }

    #[test]
    fn savings_goal_never_fires_without_income() {
        let budget = Budget {
            monthly_income: Money::ZERO,
            monthly_savings_goal: Money::new(100_000_00),
            ..Budget::default()
        };
        let txs = [expense("fijos", 480_000_00)];
        assert!(evaluate(Some(&budget), &txs, day(28)).is_empty());
    }

    #[test]
    fn category_alert_reports_rounded_percentage() {
        let budget = Budget {
            categories: std::collections::BTreeMap::from([(
                "ocio".to_string(),
                Money::new(10_000_00),
            )]),
            ..Budget::default()
        };
        let alerts = evaluate(Some(&budget), &[expense("ocio", 9_500_00)], day(5));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, AlertId::Category("ocio".to_string()));
        assert_eq!(alerts[0].id.slug(), "category-ocio");
        assert!(alerts[0].message.contains("95%"));
    }

    #[test]
    fn category_alerts_cover_every_category_in_order() {
        let budget = Budget {
            categories: std::collections::BTreeMap::from([
                ("variables".to_string(), Money::new(1_000_00)),
                ("fijos".to_string(), Money::new(2_000_00)),
                ("ahorro".to_string(), Money::ZERO),
            ]),
            ..Budget::default()
        };
        let txs = [
            expense("variables", 950_00),
            expense("fijos", 1_900_00),
            expense("ahorro", 5_000_00),
        ];
        let alerts = evaluate(Some(&budget), &txs, day(5));
        let ids: Vec<_> = alerts.iter().map(|a| a.id.slug()).collect();
        assert_eq!(ids, ["category-fijos", "category-variables"]);
    }

    #[test]
    fn income_rows_do_not_count_as_spending() {
        let budget = budget_with_limit(1_000_00);
        let mut income = expense("fijos", 950_00);
        income.kind = TransactionKind::Income;
        assert!(evaluate(Some(&budget), &[income], day(5)).is_empty());
    }

    #[test]
    fn rule_order_is_stable() {
        let budget = Budget {
            monthly_income: Money::new(100_000_00),
            monthly_savings_goal: Money::new(50_000_00),
            spending_limit: Money::new(90_000_00),
            categories: std::collections::BTreeMap::from([(
                "ocio".to_string(),
                Money::new(10_000_00),
            )]),
            ..Budget::default()
        };
        let txs = [expense("ocio", 95_000_00)];
        let alerts = evaluate(Some(&budget), &txs, day(20));
        let ids: Vec<_> = alerts.iter().map(|a| a.id.slug()).collect();
        assert_eq!(ids, ["spending-critical", "savings-goal", "category-ocio"]);
    }
}
