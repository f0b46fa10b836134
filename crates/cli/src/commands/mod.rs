use clap::Subcommand;

pub mod add;
pub mod alerts;
pub mod budget;
pub mod dashboard;
pub mod export;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new transaction.
    Add(add::AddArgs),
    /// Show or replace the monthly budget.
    Budget(budget::BudgetArgs),
    /// Monthly totals, month-over-month change and category distribution.
    Dashboard,
    /// Budget alerts for the current month.
    Alerts,
    /// Export every transaction as a CSV file.
    Export(export::ExportArgs),
}

/// Error shown next to an amount field that fails the strict gate.
pub(crate) const INVALID_AMOUNT_MSG: &str = "Formato inválido. Use el formato 1.000.000,00";
