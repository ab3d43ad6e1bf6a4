pub mod normalizer;
pub mod services;
pub mod session;
pub mod status;
pub mod time;
pub mod utils;

pub use normalizer::{normalize, LoadReport, NormalizeError, Normalizer};
pub use session::{BudgetSession, LoadMetadata, SessionOptions};
pub use status::{expense_status, expense_status_now, ExpenseStatus};
pub use time::{Clock, FixedClock, SystemClock};
