//! Budget settings: show the stored budget, or replace it wholesale.

use std::collections::BTreeSet;

use clap::Subcommand;
use engine::{Budget, DEFAULT_CATEGORIES, Money};
use store::{SessionWatch, StoreClient};

use crate::{
    commands::INVALID_AMOUNT_MSG,
    error::{AppError, Result},
};

#[derive(Debug, clap::Args)]
pub struct BudgetArgs {
    #[command(subcommand)]
    pub action: BudgetAction,
}

#[derive(Debug, Subcommand)]
pub enum BudgetAction {
    /// Print the configured budget.
    Show,
    /// Create or replace the budget (unset fields keep their stored value).
    Set(SetArgs),
}

#[derive(Debug, clap::Args)]
pub struct SetArgs {
    /// Monthly income, e.g. 850.000,00.
    #[arg(long)]
    pub monthly_income: Option<String>,
    /// Monthly savings goal.
    #[arg(long)]
    pub monthly_savings_goal: Option<String>,
    /// Yearly savings goal.
    #[arg(long)]
    pub yearly_savings_goal: Option<String>,
    /// Monthly spending limit.
    #[arg(long)]
    pub spending_limit: Option<String>,
    /// Category limit as name=amount (repeatable), e.g. ocio=50.000,00.
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

pub async fn run(client: &StoreClient, sessions: &SessionWatch, args: BudgetArgs) -> Result<()> {
    let session = sessions.require()?;

    match args.action {
        BudgetAction::Show => {
            match store::budgets::fetch(client, &session).await? {
                Some(budget) => print_budget(&budget),
                None => println!("No has configurado tu presupuesto."),
            }
            Ok(())
        }
        BudgetAction::Set(set) => {
            let current = store::budgets::fetch(client, &session)
                .await?
                .unwrap_or_default();
            let budget = apply(current, set)?;
            store::budgets::upsert(client, &session, &budget).await?;
            println!("Presupuesto guardado exitosamente.");
            Ok(())
        }
    }
}

fn apply(current: Budget, set: SetArgs) -> Result<Budget> {
    let mut categories = current.categories.clone();
    for entry in &set.categories {
        let (name, amount) = parse_category(entry)?;
        categories.insert(name, amount);
    }

    let budget = Budget::new(
        amount_or(set.monthly_income, current.monthly_income)?,
        amount_or(set.monthly_savings_goal, current.monthly_savings_goal)?,
        amount_or(set.yearly_savings_goal, current.yearly_savings_goal)?,
        amount_or(set.spending_limit, current.spending_limit)?,
        categories,
    )?;
    Ok(budget)
}

fn amount_or(text: Option<String>, fallback: Money) -> Result<Money> {
    match text {
        None => Ok(fallback),
        Some(text) => text
            .parse()
            .map_err(|_| AppError::Invalid(INVALID_AMOUNT_MSG.to_string())),
    }
}

fn parse_category(entry: &str) -> Result<(String, Money)> {
    let Some((name, amount_text)) = entry.split_once('=') else {
        return Err(AppError::Invalid(format!(
            "Categoría inválida: {entry:?}. Use nombre=monto, p. ej. ocio=50.000,00"
        )));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Invalid(format!(
            "Categoría inválida: {entry:?}. Use nombre=monto, p. ej. ocio=50.000,00"
        )));
    }
    let amount = amount_text
        .parse()
        .map_err(|_| AppError::Invalid(INVALID_AMOUNT_MSG.to_string()))?;
    Ok((name.to_string(), amount))
}

fn print_budget(budget: &Budget) {
    println!("Ingreso mensual:        {}", budget.monthly_income);
    println!("Meta de ahorro mensual: {}", budget.monthly_savings_goal);
    println!("Meta de ahorro anual:   {}", budget.yearly_savings_goal);
    println!("Límite de gastos:       {}", budget.spending_limit);
    println!("Límites por categoría:");
    // The standard five always show, plus whatever the user added.
    let mut names: BTreeSet<&str> = DEFAULT_CATEGORIES.into_iter().collect();
    names.extend(budget.categories.keys().map(String::as_str));
    for name in names {
        let limit = budget.category_limit(name).unwrap_or(Money::ZERO);
        println!("  {name:<12} {limit}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_args() -> SetArgs {
        SetArgs {
            monthly_income: None,
            monthly_savings_goal: None,
            yearly_savings_goal: None,
            spending_limit: None,
            categories: Vec::new(),
        }
    }

    #[test]
    fn unset_fields_keep_stored_values() {
        let current = Budget {
            monthly_income: Money::new(500_000_00),
            spending_limit: Money::new(100_000_00),
            ..Budget::default()
        };
        let budget = apply(
            current,
            SetArgs {
                spending_limit: Some("350.000,00".to_string()),
                ..set_args()
            },
        )
        .unwrap();
        assert_eq!(budget.monthly_income, Money::new(500_000_00));
        assert_eq!(budget.spending_limit, Money::new(350_000_00));
    }

    #[test]
    fn category_entries_parse_name_and_amount() {
        let budget = apply(
            Budget::default(),
            SetArgs {
                categories: vec!["ocio=50.000,00".to_string(), "fijos=150.000,00".to_string()],
                ..set_args()
            },
        )
        .unwrap();
        assert_eq!(budget.category_limit("ocio"), Some(Money::new(50_000_00)));
        assert_eq!(budget.category_limit("fijos"), Some(Money::new(150_000_00)));
    }

    #[test]
    fn malformed_amounts_block_the_save() {
        let err = apply(
            Budget::default(),
            SetArgs {
                monthly_income: Some("1,2,3".to_string()),
                ..set_args()
            },
        )
        .unwrap_err();
        assert!(err.user_message().contains("Formato inválido"));

        let err = apply(
            Budget::default(),
            SetArgs {
                categories: vec!["sin-monto".to_string()],
                ..set_args()
            },
        )
        .unwrap_err();
        assert!(err.user_message().contains("Categoría inválida"));
    }
}
