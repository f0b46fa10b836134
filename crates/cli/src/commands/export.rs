//! CSV export of the full transaction history.
//!
//! The spreadsheet renderer is an external concern; this produces the flat
//! rows it consumes. Amounts go through the engine formatter, the same one
//! every display surface uses.

use std::path::PathBuf;

use chrono_tz::Tz;
use csv::Writer;
use engine::Transaction;
use serde::Serialize;
use store::{SessionWatch, StoreClient};

use crate::error::Result;

#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    /// Output file.
    #[arg(long, default_value = "transacciones.csv")]
    pub output: PathBuf,
}

#[derive(Debug, PartialEq, Serialize)]
struct ExportRow {
    #[serde(rename = "Fecha")]
    date: String,
    #[serde(rename = "Tipo")]
    kind: &'static str,
    #[serde(rename = "Monto")]
    amount: String,
    #[serde(rename = "Categoría")]
    category: String,
    #[serde(rename = "Descripción")]
    description: String,
    #[serde(rename = "Método de Pago")]
    payment_method: &'static str,
}

pub async fn run(
    client: &StoreClient,
    sessions: &SessionWatch,
    tz: Tz,
    args: ExportArgs,
) -> Result<()> {
    let session = sessions.require()?;

    let transactions = store::transactions::list_all_desc(client, &session).await?;
    if transactions.is_empty() {
        println!("No hay transacciones para exportar.");
        return Ok(());
    }

    let mut writer = Writer::from_path(&args.output)?;
    for row in rows(&transactions, tz) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "{} transacciones exportadas a {}.",
        transactions.len(),
        args.output.display()
    );
    Ok(())
}

fn rows(transactions: &[Transaction], tz: Tz) -> Vec<ExportRow> {
    transactions
        .iter()
        .map(|tx| ExportRow {
            date: tx.occurred_at.with_timezone(&tz).format("%d/%m/%Y").to_string(),
            kind: if tx.is_income() { "Ingreso" } else { "Gasto" },
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            description: tx.description.clone(),
            payment_method: tx.payment_method.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use engine::{Money, PaymentMethod, TransactionKind};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn rows_reuse_the_engine_formatter() {
        let tx = Transaction {
            id: Uuid::new_v4(),
            occurred_at: Utc.with_ymd_and_hms(2026, 8, 3, 18, 30, 0).single().unwrap(),
            amount: Money::new(1_234_567_89),
            category: "fijos".to_string(),
            description: "alquiler".to_string(),
            kind: TransactionKind::Expense,
            payment_method: PaymentMethod::Sinpe,
            user_id: Uuid::new_v4(),
        };
        let rows = rows(&[tx], chrono_tz::America::Costa_Rica);
        assert_eq!(
            rows,
            [ExportRow {
                date: "03/08/2026".to_string(),
                kind: "Gasto",
                amount: "₡1.234.567,89".to_string(),
                category: "fijos".to_string(),
                description: "alquiler".to_string(),
                payment_method: "SINPE Móvil",
            }]
        );
    }
}
