//! Transaction reads and writes, always scoped to the session user.

use api_types::transaction::{TransactionNew, TransactionRow};
use chrono::{DateTime, SecondsFormat, Utc};
use engine::{Money, NewTransaction, PaymentMethod, Transaction, TransactionKind};
use uuid::Uuid;

use crate::{
    client::{Filter, Order, StoreClient},
    error::Result,
    session::Session,
};

const TABLE: &str = "transactions";

/// Inserts a validated draft and returns the assigned row id.
///
/// The draft's amount has already been through the strict text gate; nothing
/// textual crosses this boundary.
pub async fn submit(
    client: &StoreClient,
    session: &Session,
    draft: &NewTransaction,
) -> Result<Uuid> {
    let payload = TransactionNew {
        user_id: session.user_id,
        occurred_at: draft.occurred_at,
        amount_minor: draft.amount.cents(),
        category: draft.category.clone(),
        description: draft.description.clone(),
        kind: draft.kind.as_str().to_string(),
        payment_method: draft.payment_method.as_str().to_string(),
    };
    let row: TransactionRow = client.insert(session, TABLE, &payload).await?;
    tracing::info!(id = %row.id, kind = %row.kind, "transaction stored");
    Ok(row.id)
}

/// All of the user's transactions from `from` onwards, oldest first.
pub async fn list_since(
    client: &StoreClient,
    session: &Session,
    from: DateTime<Utc>,
) -> Result<Vec<Transaction>> {
    let filters = [
        Filter::user(session.user_id),
        Filter::Gte("occurred_at", timestamp(from)),
    ];
    let rows: Vec<TransactionRow> = client
        .select(session, TABLE, &filters, Some(Order::asc("occurred_at")), None)
        .await?;
    from_rows(rows)
}

/// The user's expenses from `from` onwards (the alert evaluator's input).
pub async fn list_expenses_since(
    client: &StoreClient,
    session: &Session,
    from: DateTime<Utc>,
) -> Result<Vec<Transaction>> {
    let filters = [
        Filter::user(session.user_id),
        Filter::Eq("kind", TransactionKind::Expense.as_str().to_string()),
        Filter::Gte("occurred_at", timestamp(from)),
    ];
    let rows: Vec<TransactionRow> = client
        .select(session, TABLE, &filters, Some(Order::asc("occurred_at")), None)
        .await?;
    from_rows(rows)
}

/// Every transaction the user owns, newest first (export order).
pub async fn list_all_desc(client: &StoreClient, session: &Session) -> Result<Vec<Transaction>> {
    let filters = [Filter::user(session.user_id)];
    let rows: Vec<TransactionRow> = client
        .select(
            session,
            TABLE,
            &filters,
            Some(Order::desc("occurred_at")),
            None,
        )
        .await?;
    from_rows(rows)
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn from_rows(rows: Vec<TransactionRow>) -> Result<Vec<Transaction>> {
    rows.into_iter().map(from_row).collect()
}

fn from_row(row: TransactionRow) -> Result<Transaction> {
    let kind = TransactionKind::try_from(row.kind.as_str())?;
    let payment_method = PaymentMethod::try_from(row.payment_method.as_str())?;
    let tx = Transaction::from_stored(
        row.id,
        row.occurred_at,
        Money::new(row.amount_minor),
        row.category,
        row.description,
        kind,
        payment_method,
        row.user_id,
    )?;
    Ok(tx)
}
