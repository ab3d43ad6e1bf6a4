use serde::{Deserialize, Serialize};

/// A one-off income added on top of the base amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraIncome {
    pub detail: String,
    pub amount: f64,
}

impl ExtraIncome {
    pub fn new(detail: impl AsRef<str>, amount: f64) -> Self {
        Self {
            detail: detail.as_ref().trim().to_string(),
            amount,
        }
    }
}
