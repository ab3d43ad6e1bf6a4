use crate::core::services::{CredentialService, NoteService, ServiceError};
use crate::domain::{BudgetState, CredentialEntry, Note};

#[test]
fn note_edit_keeps_blank_fields() {
    let mut state = BudgetState::default();
    NoteService::add(&mut state, Note::new("Car", "oil change in May")).unwrap();

    let edited = NoteService::edit(&mut state, 0, "", "oil change in June").unwrap();
    assert_eq!(edited.title, "Car");
    assert_eq!(edited.content, "oil change in June");

    NoteService::remove(&mut state, 0).unwrap();
    assert!(state.notes.is_empty());
}

#[test]
fn credential_requires_service_name() {
    let mut state = BudgetState::default();
    let err = CredentialService::add(&mut state, CredentialEntry::new("  ", "me", "pw")).unwrap_err();
    assert!(matches!(err, ServiceError::Invalid(_)));
    assert!(state.passwords.is_empty());
}

#[test]
fn credential_edit_merges_fields() {
    let mut state = BudgetState::default();
    CredentialService::add(&mut state, CredentialEntry::new("mail", "ana", "old")).unwrap();
    let edited = CredentialService::edit(&mut state, 0, "", " ana.s ", "").unwrap();
    assert_eq!(edited.service, "mail");
    assert_eq!(edited.user, "ana.s");
    assert_eq!(edited.secret, "old");

    let err = CredentialService::remove(&mut state, 1).unwrap_err();
    assert!(matches!(err, ServiceError::IndexOutOfRange { list: "password", .. }));
}
