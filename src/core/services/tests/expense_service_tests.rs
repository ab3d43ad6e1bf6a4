use super::month;
use crate::core::services::{ExpenseDraft, ExpenseService, ServiceError};
use crate::domain::{BudgetState, ExpenseType};

const UNNAMED: &str = "Unnamed expense";

#[test]
fn installment_draft_splits_total_evenly() {
    let expense = ExpenseService::build(
        ExpenseDraft::installments("Laptop", 300.0, 3).starting("2024-11"),
        month("2024-01"),
        UNNAMED,
    )
    .unwrap();
    assert_eq!(expense.kind, ExpenseType::Installments);
    assert_eq!(expense.installments, 3);
    assert_eq!(expense.monthly_amount, 100.0);
    assert_eq!(expense.first_debit_month, "2024-11");
}

#[test]
fn missing_month_defaults_to_current_and_blank_name_gets_label() {
    let expense =
        ExpenseService::build(ExpenseDraft::monthly("   ", 50.0), month("2025-02"), UNNAMED)
            .unwrap();
    assert_eq!(expense.name, UNNAMED);
    assert_eq!(expense.first_debit_month, "2025-02");
    assert_eq!(expense.installments, 1);
    assert_eq!(expense.total_amount, 50.0);
}

#[test]
fn month_input_is_canonicalized() {
    let expense = ExpenseService::build(
        ExpenseDraft::monthly("Gym", 30.0).starting("2024-3"),
        month("2024-01"),
        UNNAMED,
    )
    .unwrap();
    assert_eq!(expense.first_debit_month, "2024-03");
}

#[test]
fn rejects_invalid_drafts() {
    let current = month("2024-01");
    let cases = [
        ExpenseDraft::monthly("Rent", -1.0),
        ExpenseDraft::monthly("Rent", f64::NAN),
        ExpenseDraft::installments("Phone", 100.0, 0),
        ExpenseDraft::monthly("Rent", 10.0).starting("someday"),
    ];
    for draft in cases {
        let err = ExpenseService::build(draft.clone(), current, UNNAMED).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)), "{draft:?} -> {err}");
    }
}

#[test]
fn edit_and_remove_check_bounds() {
    let mut state = BudgetState::default();
    let current = month("2024-01");
    ExpenseService::add(&mut state, ExpenseDraft::monthly("Rent", 900.0), current, UNNAMED)
        .unwrap();

    ExpenseService::edit(
        &mut state,
        0,
        ExpenseDraft::monthly("Rent", 950.0),
        current,
        UNNAMED,
    )
    .unwrap();
    assert_eq!(state.fixed_expenses[0].monthly_amount, 950.0);

    let err = ExpenseService::remove(&mut state, 3).unwrap_err();
    assert_eq!(err.to_string(), "no expense at position 4 (there are 1)");

    let removed = ExpenseService::remove(&mut state, 0).unwrap();
    assert_eq!(removed.name, "Rent");
    assert!(state.fixed_expenses.is_empty());
}
