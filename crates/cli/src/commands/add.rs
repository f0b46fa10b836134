//! The new-transaction form.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use engine::{Money, NewTransaction, PaymentMethod, TransactionKind, is_valid_text};
use store::{SessionWatch, StoreClient};

use crate::{
    commands::INVALID_AMOUNT_MSG,
    error::{AppError, Result},
};

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    /// Amount in the 1.234.567,89 convention.
    #[arg(long)]
    pub amount: String,
    /// Category (by convention: fijos, variables, ocio, ahorro, otros).
    #[arg(long)]
    pub category: String,
    /// Free-text description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// income or expense.
    #[arg(long, default_value = "expense")]
    pub kind: String,
    /// cash, credit, debit, transfer or sinpe.
    #[arg(long, default_value = "cash")]
    pub payment_method: String,
    /// Calendar date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub async fn run(
    client: &StoreClient,
    sessions: &SessionWatch,
    tz: Tz,
    args: AddArgs,
) -> Result<()> {
    let session = sessions.require()?;

    // Strict gate first: fail-soft parsing must never turn a typo into a
    // silently stored zero.
    if !is_valid_text(args.amount.trim()) || args.amount.trim().is_empty() {
        return Err(AppError::Invalid(INVALID_AMOUNT_MSG.to_string()));
    }
    let amount = Money::parse_text(&args.amount);

    let kind = TransactionKind::try_from(args.kind.as_str())?;
    let payment_method = PaymentMethod::try_from(args.payment_method.as_str())?;
    let occurred_at = match args.date {
        Some(date) => local_noon(date, tz),
        None => Utc::now(),
    };

    let draft = NewTransaction::new(
        occurred_at,
        amount,
        args.category,
        args.description,
        kind,
        payment_method,
    )?;

    let id = store::transactions::submit(client, &session, &draft).await?;
    tracing::debug!(%id, "transaction submitted");
    println!("Transacción guardada exitosamente ({}).", draft.amount);
    Ok(())
}

/// A date-only entry lands at local noon, well clear of month-boundary
/// ambiguity in either direction.
fn local_noon(date: NaiveDate, tz: Tz) -> chrono::DateTime<Utc> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
    match tz.from_local_datetime(&noon) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        chrono::LocalResult::None => Utc.from_utc_datetime(&noon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noon_conversion_keeps_the_calendar_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let at = local_noon(date, chrono_tz::America::Costa_Rica);
        // UTC-6: local noon is 18:00 UTC the same day.
        assert_eq!(at, Utc.with_ymd_and_hms(2026, 8, 1, 18, 0, 0).single().unwrap());
    }
}
