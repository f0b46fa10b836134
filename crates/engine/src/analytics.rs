//! Dashboard aggregation.
//!
//! Pure helpers over already-fetched transactions. Calendar bucketing happens
//! in the user's timezone, never in UTC, so a late-night purchase lands in
//! the month the user saw on their receipt.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{Budget, Money, Transaction};

/// Income and expense totals for one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
}

impl MonthlySummary {
    #[must_use]
    pub fn balance(&self) -> Money {
        self.income - self.expenses
    }
}

/// Month-over-month change of the two most recent months.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MonthlyComparison {
    pub income_change: f64,
    pub expense_change: f64,
}

/// Buckets transactions per local calendar month, in chronological order.
#[must_use]
pub fn monthly_totals<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();
    for tx in transactions {
        let local = tx.occurred_at.with_timezone(tz);
        let entry = months
            .entry((local.year(), local.month()))
            .or_insert((Money::ZERO, Money::ZERO));
        if tx.is_income() {
            entry.0 = entry.0.saturating_add(tx.amount);
        } else {
            entry.1 = entry.1.saturating_add(tx.amount);
        }
    }
    months
        .into_iter()
        .map(|((year, month), (income, expenses))| MonthlySummary {
            year,
            month,
            income,
            expenses,
        })
        .collect()
}

/// `(current - previous) / previous * 100`.
///
/// A zero previous month yields `0.0` instead of dividing by zero; the
/// dashboard shows "no data for last month" in that case.
#[must_use]
pub fn percentage_change(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current.cents() - previous.cents()) as f64 / previous.cents() as f64 * 100.0
}

/// Change between the last month and the one before it.
#[must_use]
pub fn monthly_comparison(months: &[MonthlySummary]) -> MonthlyComparison {
    let Some(current) = months.last() else {
        return MonthlyComparison::default();
    };
    let Some(previous) = months.len().checked_sub(2).and_then(|i| months.get(i)) else {
        return MonthlyComparison::default();
    };
    MonthlyComparison {
        income_change: percentage_change(current.income, previous.income),
        expense_change: percentage_change(current.expenses, previous.expenses),
    }
}

/// Expense totals per category, in stable name order.
#[must_use]
pub fn category_distribution(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    let mut categories: BTreeMap<String, Money> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let entry = categories
            .entry(tx.category.clone())
            .or_insert(Money::ZERO);
        *entry = entry.saturating_add(tx.amount);
    }
    categories
}

/// Percent of the monthly savings goal reached so far. Zero goal yields 0.
#[must_use]
pub fn savings_progress(budget: &Budget, total_expenses: Money) -> f64 {
    if !budget.monthly_savings_goal.is_positive() {
        return 0.0;
    }
    let savings = budget.monthly_income.cents() - total_expenses.cents();
    savings as f64 / budget.monthly_savings_goal.cents() as f64 * 100.0
}

/// First instant of the current local month, as a UTC fetch bound.
#[must_use]
pub fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    local_month_start(now, now.year(), now.month())
}

/// First instant of the local month `months` months before the current one.
#[must_use]
pub fn months_back<Tz: TimeZone>(now: &DateTime<Tz>, months: u32) -> DateTime<Utc> {
    let total = now.year() as i64 * 12 + i64::from(now.month()) - 1 - i64::from(months);
    let year = total.div_euclid(12) as i32;
    let month = total.rem_euclid(12) as u32 + 1;
    local_month_start(now, year, month)
}

fn local_month_start<Tz: TimeZone>(now: &DateTime<Tz>, year: i32, month: u32) -> DateTime<Utc> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return now.with_timezone(&Utc);
    };
    let midnight = first.and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        // Midnight skipped by a DST jump: fall back to the UTC reading.
        chrono::LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}
