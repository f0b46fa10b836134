//! Budget fetch and upsert.
//!
//! Each user has at most one budget row; saves replace it entirely. There is
//! no delete path here, and the upsert is presence-check based: concurrent
//! saves from two sessions resolve as last-write-wins at the store.

use api_types::budget::{BudgetRow, BudgetUpsert};
use engine::{Budget, Money};

use crate::{
    client::{Filter, StoreClient},
    error::Result,
    session::Session,
};

const TABLE: &str = "budgets";

/// The user's budget, or `None` when it was never configured.
pub async fn fetch(client: &StoreClient, session: &Session) -> Result<Option<Budget>> {
    Ok(fetch_row(client, session).await?.map(from_row).transpose()?)
}

/// Creates or fully replaces the user's budget.
pub async fn upsert(client: &StoreClient, session: &Session, budget: &Budget) -> Result<()> {
    let payload = to_payload(session, budget);
    match fetch_row(client, session).await? {
        Some(existing) => {
            client.update(session, TABLE, existing.id, &payload).await?;
            tracing::info!(id = %existing.id, "budget replaced");
        }
        None => {
            let row: BudgetRow = client.insert(session, TABLE, &payload).await?;
            tracing::info!(id = %row.id, "budget created");
        }
    }
    Ok(())
}

async fn fetch_row(client: &StoreClient, session: &Session) -> Result<Option<BudgetRow>> {
    let filters = [Filter::user(session.user_id)];
    let mut rows: Vec<BudgetRow> = client.select(session, TABLE, &filters, None, Some(2)).await?;
    if rows.len() > 1 {
        tracing::warn!(user_id = %session.user_id, "multiple budget rows; using the first");
    }
    rows.truncate(1);
    Ok(rows.pop())
}

fn from_row(row: BudgetRow) -> std::result::Result<Budget, engine::EngineError> {
    Budget::new(
        Money::new(row.monthly_income_minor),
        Money::new(row.monthly_savings_goal_minor),
        Money::new(row.yearly_savings_goal_minor),
        Money::new(row.spending_limit_minor),
        row.categories
            .into_iter()
            .map(|(name, limit)| (name, Money::new(limit)))
            .collect(),
    )
}

fn to_payload(session: &Session, budget: &Budget) -> BudgetUpsert {
    BudgetUpsert {
        user_id: session.user_id,
        monthly_income_minor: budget.monthly_income.cents(),
        monthly_savings_goal_minor: budget.monthly_savings_goal.cents(),
        yearly_savings_goal_minor: budget.yearly_savings_goal.cents(),
        spending_limit_minor: budget.spending_limit.cents(),
        categories: budget
            .categories
            .iter()
            .map(|(name, limit)| (name.clone(), limit.cents()))
            .collect(),
    }
}
