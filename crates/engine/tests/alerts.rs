//! End-to-end evaluation scenarios: text input -> stored amounts -> monthly
//! aggregates -> alerts, the way the screens drive the engine.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use chrono_tz::America::Costa_Rica;
use engine::{
    Alert, AlertId, Budget, Money, NewTransaction, PaymentMethod, Severity, Transaction,
    TransactionKind, evaluate, is_valid_text, month_start, monthly_totals,
};
use uuid::Uuid;

fn submitted(amount_text: &str, category: &str, day: u32) -> Transaction {
    // The form gate + fail-soft parse, exactly as the add screen commits.
    assert!(is_valid_text(amount_text));
    let draft = NewTransaction::new(
        Utc.with_ymd_and_hms(2026, 8, day, 18, 0, 0).single().unwrap(),
        Money::parse_text(amount_text),
        category.to_string(),
        "integración".to_string(),
        TransactionKind::Expense,
        PaymentMethod::Sinpe,
    )
    .unwrap();
    Transaction::from_stored(
        Uuid::new_v4(),
        draft.occurred_at,
        draft.amount,
        draft.category,
        draft.description,
        draft.kind,
        draft.payment_method,
        Uuid::new_v4(),
    )
    .unwrap()
}

#[test]
fn typed_amounts_flow_through_to_alerts() {
    let budget = Budget::new(
        Money::parse_text("500.000,00"),
        Money::parse_text("100.000,00"),
        Money::parse_text("1.200.000,00"),
        Money::parse_text("100.000,00"),
        BTreeMap::from([("ocio".to_string(), Money::parse_text("10.000,00"))]),
    )
    .unwrap();

    let transactions = vec![
        submitted("85.000,00", "fijos", 2),
        submitted("9.500,00", "ocio", 3),
    ];

    let now = Costa_Rica.with_ymd_and_hms(2026, 8, 20, 9, 30, 0).single().unwrap();
    let alerts = evaluate(Some(&budget), &transactions, now);

    let slugs: Vec<_> = alerts.iter().map(|a| a.id.slug()).collect();
    assert_eq!(slugs, ["spending-critical", "category-ocio"]);
    assert!(alerts.iter().all(|a| a.severity == Severity::Warning));
    assert!(alerts[0].message.contains("95%"));
    assert!(alerts[0].message.contains("₡94.500,00 de ₡100.000,00"));

    // Savings rule stays quiet: 405.5k saved is far above half the goal.
    assert!(!slugs.contains(&"savings-goal".to_string()));
}

#[test]
fn quiet_month_returns_no_alerts() {
    let budget = Budget::new(
        Money::parse_text("500.000,00"),
        Money::ZERO,
        Money::ZERO,
        Money::parse_text("100.000,00"),
        BTreeMap::new(),
    )
    .unwrap();

    let transactions = vec![submitted("1.000,00", "ocio", 2)];
    let now = Costa_Rica.with_ymd_and_hms(2026, 8, 20, 9, 30, 0).single().unwrap();
    assert!(evaluate(Some(&budget), &transactions, now).is_empty());
}

#[test]
fn fetch_failure_alert_matches_the_error_contract() {
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).single().unwrap();
    let alert = Alert::fetch_failed(now);
    assert_eq!(alert.id, AlertId::FetchFailed);
    assert_eq!(alert.id.slug(), "error");
    assert_eq!(alert.severity, Severity::Warning);
    assert_eq!(alert.raised_at, now);
}

#[test]
fn month_window_matches_the_alert_period() {
    // Transactions fetched from the month start are the ones the evaluator
    // sees; a purchase from late July must stay out of August's alerts.
    let now = Costa_Rica.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).single().unwrap();
    let window_start = month_start(&now);

    let july = submitted("95.000,00", "fijos", 2);
    let july = Transaction {
        occurred_at: Utc.with_ymd_and_hms(2026, 7, 30, 12, 0, 0).single().unwrap(),
        ..july
    };
    assert!(july.occurred_at < window_start);

    let in_window = [submitted("95.000,00", "fijos", 2)];
    let months = monthly_totals(&in_window, &Costa_Rica);
    assert_eq!(months.len(), 1);
    assert_eq!((months[0].year, months[0].month), (2026, 8));
}
