pub mod credential_service;
pub mod expense_service;
pub mod income_service;
pub mod note_service;
pub mod summary_service;

pub use credential_service::CredentialService;
pub use expense_service::{ExpenseDraft, ExpenseService};
pub use income_service::IncomeService;
pub use note_service::NoteService;
pub use summary_service::{BudgetSummary, SummaryService};

use crate::errors::TrackerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("no {list} at position {position} (there are {len})")]
    IndexOutOfRange {
        list: &'static str,
        position: usize,
        len: usize,
    },
    #[error("{0}")]
    Invalid(String),
}

/// Checks a zero-based `index` against a list of `len`; errors report one-based positions.
pub(crate) fn ensure_index(list: &'static str, index: usize, len: usize) -> ServiceResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ServiceError::IndexOutOfRange {
            list,
            position: index + 1,
            len,
        })
    }
}

pub(crate) fn ensure_finite(label: &str, amount: f64) -> ServiceResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ServiceError::Invalid(format!("{label} must be a finite number")))
    }
}

#[cfg(test)]
mod tests;
