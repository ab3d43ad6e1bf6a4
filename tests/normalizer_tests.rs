mod common;

use budget_tracker::core::{normalize, Normalizer};
use budget_tracker::domain::{BudgetState, ExpenseType};
use serde_json::json;

use common::clock_at;

#[test]
fn legacy_total_amount_payload_is_migrated() {
    let clock = clock_at("2025-03");
    let raw = json!({ "totalAmount": 500, "fixedExpenses": [{ "name": "Rent", "amount": 100 }] });
    let report = Normalizer::new(clock.as_ref())
        .parse_state(&raw.to_string())
        .unwrap();

    let state = &report.state;
    assert_eq!(state.base_amount, 500.0);
    assert_eq!(state.fixed_expenses.len(), 1);
    let rent = &state.fixed_expenses[0];
    assert_eq!(rent.name, "Rent");
    assert_eq!(rent.kind, ExpenseType::Installments);
    assert_eq!(rent.total_amount, 100.0);
    assert_eq!(rent.installments, 1);
    assert_eq!(rent.monthly_amount, 100.0);
    assert_eq!(rent.first_debit_month, "2025-03");
    assert_eq!(report.migrations.len(), 2);
    assert!(report.warnings.is_empty());
}

#[test]
fn malformed_payloads_yield_the_default_state() {
    let clock = clock_at("2025-03");
    for raw in ["", "{not json", "[1, 2]", "42", "null", "\"text\""] {
        assert_eq!(normalize(raw, clock.as_ref()), BudgetState::default(), "{raw}");
    }
    let report = Normalizer::new(clock.as_ref()).normalize("[1, 2]");
    assert_eq!(report.warnings.len(), 1);
    assert!(Normalizer::new(clock.as_ref()).parse_state("[1, 2]").is_err());
}

#[test]
fn canonical_state_survives_unchanged() {
    let clock = clock_at("2025-03");
    let raw = json!({
        "baseAmount": 1800.5,
        "extraIncomes": [{ "detail": "bonus", "amount": 200.0 }],
        "fixedExpenses": [{
            "name": "Laptop", "type": "installments", "totalAmount": 300.0,
            "installments": 3, "monthlyAmount": 100.0, "firstDebitMonth": "2025-01"
        }],
        "notes": [{ "title": "Car", "content": "service" }],
        "passwords": [{ "service": "bank", "user": "ana", "secret": "pw" }]
    });
    let report = Normalizer::new(clock.as_ref())
        .parse_state(&raw.to_string())
        .unwrap();
    assert!(report.is_clean());

    let reencoded = serde_json::to_value(&report.state).unwrap();
    assert_eq!(reencoded, raw);
}

#[test]
fn loose_field_types_are_coerced() {
    let clock = clock_at("2025-03");
    let raw = json!({
        "baseAmount": "1200",
        "extraIncomes": [{ "detail": "tips", "amount": "35.5" }],
        "fixedExpenses": [
            { "type": "monthly", "totalAmount": "60", "firstDebitMonth": "" },
            { "totalAmount": 250, "installments": "0" },
            "not an object"
        ],
        "notes": { "title": "wrong shape" }
    });
    let report = Normalizer::new(clock.as_ref())
        .with_unnamed_expense("Sem nome")
        .parse_state(&raw.to_string())
        .unwrap();
    let state = report.state;

    // non-numeric baseAmount without a legacy total falls back to zero
    assert_eq!(state.base_amount, 0.0);
    assert_eq!(state.extra_incomes[0].amount, 35.5);

    let monthly = &state.fixed_expenses[0];
    assert_eq!(monthly.kind, ExpenseType::Monthly);
    assert_eq!(monthly.name, "Sem nome");
    assert_eq!(monthly.monthly_amount, 60.0);
    assert_eq!(monthly.first_debit_month, "2025-03");

    let plan = &state.fixed_expenses[1];
    assert_eq!(plan.installments, 1);
    assert_eq!(plan.monthly_amount, 250.0);

    assert_eq!(state.fixed_expenses.len(), 2);
    assert!(state.notes.is_empty());
    assert_eq!(report.warnings.len(), 2);
}
