mod common;

use budget_tracker::core::services::{ExpenseDraft, ServiceError};
use budget_tracker::core::BudgetSession;

use common::clock_at;

fn session_at(month: &str) -> BudgetSession {
    BudgetSession::in_memory(clock_at(month)).unwrap()
}

#[test]
fn reference_scenario_balances() {
    let mut session = session_at("2024-01");
    session.set_base_amount(1000.0).unwrap();
    session.add_income("bonus", 200.0).unwrap();
    session
        .add_expense(ExpenseDraft::installments("Laptop", 300.0, 3))
        .unwrap();

    let summary = session.summary();
    assert_eq!(summary.available, 1200.0);
    assert_eq!(summary.active_expenses, 100.0);
    assert_eq!(summary.remaining, 1100.0);
}

#[test]
fn mutations_reject_bad_positions_without_changes() {
    let mut session = session_at("2024-01");
    session.add_income("bonus", 200.0).unwrap();

    let err = session.edit_income(1, "other", 5.0).unwrap_err();
    assert!(matches!(err, ServiceError::IndexOutOfRange { position: 2, len: 1, .. }));
    assert!(session.remove_expense(0).is_err());
    assert!(session.begin_note_edit(0).is_err());
    assert_eq!(session.editing_note(), None);
    assert_eq!(session.state().extra_incomes[0].detail, "bonus");
}

#[test]
fn removing_an_earlier_entry_keeps_the_edit_target() {
    let mut session = session_at("2024-01");
    for service in ["mail", "bank", "shop"] {
        session.add_credential(service, "ana", "pw").unwrap();
    }
    session.begin_credential_edit(2).unwrap();
    session.remove_credential(0).unwrap();
    assert_eq!(session.editing_credential(), Some(1));

    let saved = session.save_credential_edit("", "", "new").unwrap();
    assert_eq!(saved.service, "shop");
    assert_eq!(session.state().passwords[1].secret, "new");
    assert_eq!(session.state().passwords[0].secret, "pw");
}

#[test]
fn cancel_leaves_entries_untouched() {
    let mut session = session_at("2024-01");
    session.add_note("Car", "service").unwrap();
    session.begin_note_edit(0).unwrap();
    session.cancel_note_edit();
    assert_eq!(session.editing_note(), None);
    assert!(matches!(
        session.save_note_edit("x", "y"),
        Err(ServiceError::Invalid(_))
    ));
    assert_eq!(session.state().notes[0].title, "Car");
}

#[test]
fn expense_edit_replaces_the_record() {
    let mut session = session_at("2024-05");
    session.add_expense(ExpenseDraft::monthly("Gym", 30.0)).unwrap();
    session
        .edit_expense(0, ExpenseDraft::installments("Gym plan", 240.0, 12).starting("2024-06"))
        .unwrap();
    let expense = &session.state().fixed_expenses[0];
    assert_eq!(expense.name, "Gym plan");
    assert_eq!(expense.monthly_amount, 20.0);
    assert_eq!(session.summary().active_expenses, 0.0);
}
