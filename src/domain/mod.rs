//! Persisted records and the calendar-month type they are scheduled against.

pub mod credential;
pub mod expense;
pub mod income;
pub mod month;
pub mod note;
pub mod state;

pub use credential::CredentialEntry;
pub use expense::{ExpenseType, FixedExpense};
pub use income::ExtraIncome;
pub use month::{month_from_index, to_month_index, MonthIndex};
pub use note::Note;
pub use state::BudgetState;
