//! Owns the budget document for the lifetime of a shell session.

use std::sync::Arc;

use crate::config::{Config, DEFAULT_STORAGE_KEY};
use crate::domain::{BudgetState, CredentialEntry, ExtraIncome, FixedExpense, MonthIndex, Note};
use crate::errors::TrackerError;
use crate::storage::{check_availability, KeyValueStore, MemoryStore, StateRepository};

use super::normalizer::{Normalizer, DEFAULT_EXPENSE_NAME};
use super::services::{
    BudgetSummary, CredentialService, ExpenseDraft, ExpenseService, IncomeService, NoteService,
    ServiceError, ServiceResult, SummaryService,
};
use super::status::ExpenseStatus;
use super::time::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub storage_key: String,
    pub unnamed_expense_label: String,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
            unnamed_expense_label: config.unnamed_expense_label.clone(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            unnamed_expense_label: DEFAULT_EXPENSE_NAME.into(),
        }
    }
}

/// Outcome of opening a session.
#[derive(Debug, Clone, Default)]
pub struct LoadMetadata {
    pub warnings: Vec<String>,
    pub migrations: Vec<String>,
    /// True when the requested store failed its probe and data lives in memory only.
    pub in_memory: bool,
}

/// Budget state plus the store it is written back to after every change.
pub struct BudgetSession {
    state: BudgetState,
    repository: StateRepository,
    clock: Arc<dyn Clock>,
    options: SessionOptions,
    editing_note: Option<usize>,
    editing_credential: Option<usize>,
}

impl BudgetSession {
    /// Probes `store`, falls back to memory if it is unusable, then loads the document.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        options: SessionOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, LoadMetadata), TrackerError> {
        let mut metadata = LoadMetadata::default();
        let store: Box<dyn KeyValueStore> = match check_availability(store.as_ref()) {
            Ok(()) => store,
            Err(err) => {
                let message = format!(
                    "{} is unavailable ({err}); changes will not outlive this session",
                    store.describe()
                );
                tracing::warn!("{message}");
                metadata.warnings.push(message);
                metadata.in_memory = true;
                Box::new(MemoryStore::new())
            }
        };

        let repository = StateRepository::new(store, options.storage_key.clone());
        let normalizer =
            Normalizer::new(clock.as_ref()).with_unnamed_expense(&options.unnamed_expense_label);
        let report = repository.load(&normalizer);
        for warning in &report.warnings {
            tracing::warn!(key = %repository.key(), "{warning}");
        }
        for migration in &report.migrations {
            tracing::info!(key = %repository.key(), "{migration}");
        }
        metadata.warnings.extend(report.warnings);
        metadata.migrations.extend(report.migrations);

        let session = Self {
            state: report.state,
            repository,
            clock,
            options,
            editing_note: None,
            editing_credential: None,
        };
        Ok((session, metadata))
    }

    /// Session over a fresh in-memory store.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Result<Self, TrackerError> {
        Self::open(
            Box::new(MemoryStore::new()),
            SessionOptions::default(),
            clock,
        )
        .map(|(session, _)| session)
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.repository.store()
    }

    pub fn current_month(&self) -> MonthIndex {
        self.clock.current_month()
    }

    pub fn summary(&self) -> BudgetSummary {
        SummaryService::summarize(&self.state, self.current_month())
    }

    pub fn expense_statuses(&self) -> Vec<ExpenseStatus> {
        SummaryService::expense_statuses(&self.state, self.current_month())
    }

    /// Writes the whole document back to the store.
    pub fn persist(&self) -> ServiceResult<()> {
        self.repository.persist(&self.state)?;
        Ok(())
    }

    // Incomes

    pub fn set_base_amount(&mut self, amount: f64) -> ServiceResult<()> {
        IncomeService::set_base_amount(&mut self.state, amount)?;
        self.persist()
    }

    pub fn add_income(&mut self, detail: &str, amount: f64) -> ServiceResult<usize> {
        let index = IncomeService::add(&mut self.state, ExtraIncome::new(detail, amount))?;
        self.persist()?;
        Ok(index)
    }

    pub fn edit_income(&mut self, index: usize, detail: &str, amount: f64) -> ServiceResult<()> {
        IncomeService::edit(&mut self.state, index, ExtraIncome::new(detail, amount))?;
        self.persist()
    }

    pub fn remove_income(&mut self, index: usize) -> ServiceResult<ExtraIncome> {
        let removed = IncomeService::remove(&mut self.state, index)?;
        self.persist()?;
        Ok(removed)
    }

    // Expenses

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> ServiceResult<usize> {
        let current = self.current_month();
        let index = ExpenseService::add(
            &mut self.state,
            draft,
            current,
            &self.options.unnamed_expense_label,
        )?;
        self.persist()?;
        Ok(index)
    }

    pub fn edit_expense(&mut self, index: usize, draft: ExpenseDraft) -> ServiceResult<()> {
        let current = self.current_month();
        ExpenseService::edit(
            &mut self.state,
            index,
            draft,
            current,
            &self.options.unnamed_expense_label,
        )?;
        self.persist()
    }

    pub fn remove_expense(&mut self, index: usize) -> ServiceResult<FixedExpense> {
        let removed = ExpenseService::remove(&mut self.state, index)?;
        self.persist()?;
        Ok(removed)
    }

    // Notes

    pub fn add_note(&mut self, title: &str, content: &str) -> ServiceResult<usize> {
        let index = NoteService::add(&mut self.state, Note::new(title, content))?;
        self.persist()?;
        Ok(index)
    }

    pub fn editing_note(&self) -> Option<usize> {
        self.editing_note
    }

    /// Marks the note at `index` as being edited and returns its current text.
    pub fn begin_note_edit(&mut self, index: usize) -> ServiceResult<&Note> {
        let note = self.state.notes.get(index).ok_or(ServiceError::IndexOutOfRange {
            list: "note",
            position: index + 1,
            len: self.state.notes.len(),
        })?;
        self.editing_note = Some(index);
        Ok(note)
    }

    pub fn cancel_note_edit(&mut self) {
        self.editing_note = None;
    }

    /// Applies the pending edit; blank fields keep their previous text.
    pub fn save_note_edit(&mut self, title: &str, content: &str) -> ServiceResult<Note> {
        let index = self
            .editing_note
            .ok_or_else(|| ServiceError::Invalid("no note is being edited".into()))?;
        let note = NoteService::edit(&mut self.state, index, title, content)?.clone();
        self.editing_note = None;
        self.persist()?;
        Ok(note)
    }

    pub fn remove_note(&mut self, index: usize) -> ServiceResult<Note> {
        let removed = NoteService::remove(&mut self.state, index)?;
        self.editing_note = shift_cursor(self.editing_note, index);
        self.persist()?;
        Ok(removed)
    }

    // Passwords

    pub fn add_credential(
        &mut self,
        service: &str,
        user: &str,
        secret: &str,
    ) -> ServiceResult<usize> {
        let entry = CredentialEntry::new(service, user, secret);
        let index = CredentialService::add(&mut self.state, entry)?;
        self.persist()?;
        Ok(index)
    }

    pub fn editing_credential(&self) -> Option<usize> {
        self.editing_credential
    }

    pub fn begin_credential_edit(&mut self, index: usize) -> ServiceResult<&CredentialEntry> {
        let entry = self
            .state
            .passwords
            .get(index)
            .ok_or(ServiceError::IndexOutOfRange {
                list: "password",
                position: index + 1,
                len: self.state.passwords.len(),
            })?;
        self.editing_credential = Some(index);
        Ok(entry)
    }

    pub fn cancel_credential_edit(&mut self) {
        self.editing_credential = None;
    }

    pub fn save_credential_edit(
        &mut self,
        service: &str,
        user: &str,
        secret: &str,
    ) -> ServiceResult<CredentialEntry> {
        let index = self
            .editing_credential
            .ok_or_else(|| ServiceError::Invalid("no password is being edited".into()))?;
        let entry = CredentialService::edit(&mut self.state, index, service, user, secret)?.clone();
        self.editing_credential = None;
        self.persist()?;
        Ok(entry)
    }

    pub fn remove_credential(&mut self, index: usize) -> ServiceResult<CredentialEntry> {
        let removed = CredentialService::remove(&mut self.state, index)?;
        self.editing_credential = shift_cursor(self.editing_credential, index);
        self.persist()?;
        Ok(removed)
    }
}

/// Keeps an edit cursor pointing at the same entry after `removed` is taken out.
fn shift_cursor(cursor: Option<usize>, removed: usize) -> Option<usize> {
    match cursor {
        Some(current) if current == removed => None,
        Some(current) if current > removed => Some(current - 1),
        other => other,
    }
}
