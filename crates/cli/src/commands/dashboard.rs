//! The dashboard: last three months of totals plus category distribution.

use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use engine::{
    Money, MonthlySummary, category_distribution, monthly_comparison, monthly_totals, months_back,
    savings_progress,
};
use store::{SessionWatch, StoreClient};

use crate::error::Result;

const MONTH_NAMES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

pub async fn run(client: &StoreClient, sessions: &SessionWatch, tz: Tz) -> Result<()> {
    let session = sessions.require()?;
    let now = Utc::now().with_timezone(&tz);

    let since = months_back(&now, 3);
    let transactions = store::transactions::list_since(client, &session, since).await?;
    if transactions.is_empty() {
        println!("No hay transacciones registradas en los últimos meses.");
        return Ok(());
    }

    let months = monthly_totals(&transactions, &tz);
    println!("Resumen mensual:");
    for month in &months {
        println!(
            "  {} {}  ingresos {:>15}  gastos {:>15}  balance {:>15}",
            month_name(month),
            month.year,
            month.income.to_string(),
            month.expenses.to_string(),
            month.balance().to_string(),
        );
    }

    if months.len() > 1 {
        let change = monthly_comparison(&months);
        println!("Ingresos: {:+.1}% vs. mes anterior", change.income_change);
        println!("Gastos:   {:+.1}% vs. mes anterior", change.expense_change);
    } else {
        println!("No hay datos del mes anterior");
    }

    let distribution = category_distribution(&transactions);
    let total_expenses = distribution
        .values()
        .fold(Money::ZERO, |acc, spent| acc.saturating_add(*spent));
    if !distribution.is_empty() {
        println!("Distribución de gastos:");
        for (category, spent) in &distribution {
            println!(
                "  {category:<12} {:>15}  {:>5.1}%",
                spent.to_string(),
                share(*spent, total_expenses),
            );
        }
    }

    if let Some(budget) = store::budgets::fetch(client, &session).await?
        && budget.monthly_savings_goal.is_positive()
    {
        let current = months
            .iter()
            .find(|m| m.year == now.year() && m.month == now.month());
        let spent = current.map_or(Money::ZERO, |m| m.expenses);
        println!(
            "Progreso de ahorro: {:.1}% de la meta mensual",
            savings_progress(&budget, spent)
        );
    }
    Ok(())
}

fn month_name(month: &MonthlySummary) -> &'static str {
    MONTH_NAMES
        .get(month.month as usize - 1)
        .copied()
        .unwrap_or("???")
}

fn share(spent: Money, total: Money) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    spent.cents() as f64 / total.cents() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_guards_the_zero_total() {
        assert_eq!(share(Money::new(10_00), Money::ZERO), 0.0);
        assert_eq!(share(Money::new(25_00), Money::new(100_00)), 25.0);
    }

    #[test]
    fn month_names_are_spanish_abbreviations() {
        let month = MonthlySummary {
            year: 2026,
            month: 8,
            income: Money::ZERO,
            expenses: Money::ZERO,
        };
        assert_eq!(month_name(&month), "ago");
    }
}
