//! The notifications screen: fetch this month's inputs, evaluate, render.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use engine::{Alert, Budget, Severity, Transaction, evaluate, month_start};
use store::{Session, SessionWatch, StoreClient};

use crate::error::Result;

pub async fn run(client: &StoreClient, sessions: &SessionWatch, tz: Tz) -> Result<()> {
    let session = sessions.require()?;
    let now = Utc::now().with_timezone(&tz);

    // A failed fetch becomes the single `error` alert; the evaluator itself
    // never fails.
    let alerts = match fetch_inputs(client, &session, now).await {
        Ok((budget, expenses)) => evaluate(budget.as_ref(), &expenses, now),
        Err(err) => {
            tracing::error!("failed to load alert inputs: {err}");
            vec![Alert::fetch_failed(Utc::now())]
        }
    };

    if alerts.is_empty() {
        println!("✔ ¡Todo en orden! No hay alertas pendientes.");
        return Ok(());
    }

    for alert in &alerts {
        print_alert(alert, tz);
    }
    Ok(())
}

async fn fetch_inputs(
    client: &StoreClient,
    session: &Session,
    now: DateTime<Tz>,
) -> store::Result<(Option<Budget>, Vec<Transaction>)> {
    let budget = store::budgets::fetch(client, session).await?;
    // Without a budget the evaluator short-circuits; skip the second fetch.
    let expenses = match &budget {
        Some(_) => {
            store::transactions::list_expenses_since(client, session, month_start(&now)).await?
        }
        None => Vec::new(),
    };
    Ok((budget, expenses))
}

fn print_alert(alert: &Alert, tz: Tz) {
    let icon = match alert.severity {
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
        Severity::Success => "✔",
    };
    let stamp = alert.raised_at.with_timezone(&tz).format("%d/%m/%Y %H:%M");
    println!("{icon} {}", alert.message);
    println!("   {stamp}");
}
