use serde::{Deserialize, Serialize};

use super::{credential::CredentialEntry, expense::FixedExpense, income::ExtraIncome, note::Note};

/// Everything the tracker persists, stored under a single key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    pub base_amount: f64,
    pub extra_incomes: Vec<ExtraIncome>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub notes: Vec<Note>,
    pub passwords: Vec<CredentialEntry>,
}

impl BudgetState {
    pub fn is_empty(&self) -> bool {
        self.base_amount == 0.0
            && self.extra_incomes.is_empty()
            && self.fixed_expenses.is_empty()
            && self.notes.is_empty()
            && self.passwords.is_empty()
    }
}
