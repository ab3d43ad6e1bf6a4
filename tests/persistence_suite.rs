mod common;

use std::fs;

use budget_tracker::config::DEFAULT_STORAGE_KEY;
use budget_tracker::core::services::ExpenseDraft;
use budget_tracker::core::Normalizer;
use budget_tracker::domain::BudgetState;
use budget_tracker::storage::{
    check_availability, JsonFileStore, KeyValueStore, StateRepository, PROBE_KEY,
};

use common::{clock_at, open_session, temp_dir};

#[test]
fn json_store_round_trips_values() {
    let dir = temp_dir();
    let store = JsonFileStore::new(&dir).unwrap();
    assert_eq!(store.get("missing").unwrap(), None);

    store.set("controlPersonalData", "{\"baseAmount\":1}").unwrap();
    assert_eq!(
        store.get("controlPersonalData").unwrap().as_deref(),
        Some("{\"baseAmount\":1}")
    );
    assert!(dir.join("controlPersonalData.json").exists());
    assert!(!dir.join("controlPersonalData.json.tmp").exists());

    store.remove("controlPersonalData").unwrap();
    store.remove("controlPersonalData").unwrap();
    assert_eq!(store.get("controlPersonalData").unwrap(), None);
}

#[test]
fn probe_key_is_cleaned_up() {
    let dir = temp_dir();
    let store = JsonFileStore::new(&dir).unwrap();
    check_availability(&store).unwrap();
    assert_eq!(store.get(PROBE_KEY).unwrap(), None);
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn repository_missing_key_loads_empty_budget() {
    let dir = temp_dir();
    let clock = clock_at("2024-01");
    let repo = StateRepository::new(
        Box::new(JsonFileStore::new(&dir).unwrap()),
        DEFAULT_STORAGE_KEY,
    );
    let report = repo.load(&Normalizer::new(clock.as_ref()));
    assert_eq!(report.state, BudgetState::default());
    assert!(report.is_clean());
}

#[test]
fn session_changes_survive_reopen() {
    let dir = temp_dir();
    {
        let (mut session, metadata) = open_session(&dir, "2024-01");
        assert!(!metadata.in_memory);
        session.set_base_amount(1000.0).unwrap();
        session.add_income("bonus", 200.0).unwrap();
        session
            .add_expense(ExpenseDraft::installments("Laptop", 300.0, 3))
            .unwrap();
        session.add_note("Car", "service in May").unwrap();
        session.add_credential("bank", "ana", "pw").unwrap();
    }

    let (session, metadata) = open_session(&dir, "2024-02");
    assert!(metadata.warnings.is_empty());
    assert!(metadata.migrations.is_empty());
    let state = session.state();
    assert_eq!(state.base_amount, 1000.0);
    assert_eq!(state.extra_incomes.len(), 1);
    assert_eq!(state.fixed_expenses[0].first_debit_month, "2024-01");
    assert_eq!(state.notes[0].content, "service in May");
    assert_eq!(state.passwords[0].secret, "pw");

    let statuses = session.expense_statuses();
    assert_eq!(statuses[0].remaining_installments, Some(1));
}

#[test]
fn corrupt_document_starts_fresh_with_warning() {
    let dir = temp_dir();
    fs::write(dir.join("controlPersonalData.json"), "{ this is not json").unwrap();

    let (mut session, metadata) = open_session(&dir, "2024-01");
    assert_eq!(session.state(), &BudgetState::default());
    assert_eq!(metadata.warnings.len(), 1);

    // the next mutation overwrites the corrupt file with a valid document
    session.set_base_amount(5.0).unwrap();
    let raw = fs::read_to_string(dir.join("controlPersonalData.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["baseAmount"], serde_json::json!(5.0));
    assert_eq!(value["fixedExpenses"], serde_json::json!([]));
}

#[test]
fn undecodable_document_starts_fresh_with_warning() {
    let dir = temp_dir();
    fs::write(dir.join("controlPersonalData.json"), [0x7b, 0xff, 0xfe, 0x7d]).unwrap();

    let (mut session, metadata) = open_session(&dir, "2024-01");
    assert_eq!(session.state(), &BudgetState::default());
    assert_eq!(metadata.warnings.len(), 1);
    assert!(!metadata.in_memory);

    session.add_income("bonus", 50.0).unwrap();
    let raw = fs::read_to_string(dir.join("controlPersonalData.json")).unwrap();
    assert!(raw.contains("\"bonus\""));
}

#[test]
fn blank_document_starts_fresh_silently() {
    let dir = temp_dir();
    fs::write(dir.join("controlPersonalData.json"), "  \n").unwrap();

    let (session, metadata) = open_session(&dir, "2024-01");
    assert_eq!(session.state(), &BudgetState::default());
    assert!(metadata.warnings.is_empty());
    assert!(metadata.migrations.is_empty());
}

#[test]
fn legacy_document_is_upgraded_on_load() {
    let dir = temp_dir();
    fs::write(
        dir.join("controlPersonalData.json"),
        r#"{ "totalAmount": 500, "fixedExpenses": [{ "name": "Rent", "amount": 100 }] }"#,
    )
    .unwrap();

    let (session, metadata) = open_session(&dir, "2024-07");
    assert_eq!(metadata.migrations.len(), 2);
    assert_eq!(session.state().base_amount, 500.0);
    assert_eq!(session.summary().remaining, 400.0);
}
