use crate::domain::{BudgetState, ExpenseType, FixedExpense, MonthIndex};

use super::{ensure_finite, ensure_index, ServiceError, ServiceResult};

/// User input for a new fixed expense, before defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub name: String,
    pub kind: ExpenseType,
    /// Monthly debit for `Monthly`, full total for `Installments`.
    pub amount: f64,
    pub installments: u32,
    /// `YYYY-MM`; blank or missing means the current month.
    pub first_debit_month: Option<String>,
}

impl ExpenseDraft {
    pub fn monthly(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            kind: ExpenseType::Monthly,
            amount,
            installments: 1,
            first_debit_month: None,
        }
    }

    pub fn installments(name: impl Into<String>, total: f64, installments: u32) -> Self {
        Self {
            name: name.into(),
            kind: ExpenseType::Installments,
            amount: total,
            installments,
            first_debit_month: None,
        }
    }

    pub fn starting(mut self, month: impl Into<String>) -> Self {
        self.first_debit_month = Some(month.into());
        self
    }
}

pub struct ExpenseService;

impl ExpenseService {
    /// Turns a draft into a stored expense.
    ///
    /// `current` fills in a missing first debit month and `unnamed` a blank name.
    pub fn build(
        draft: ExpenseDraft,
        current: MonthIndex,
        unnamed: &str,
    ) -> ServiceResult<FixedExpense> {
        ensure_finite("expense amount", draft.amount)?;
        if draft.amount < 0.0 {
            return Err(ServiceError::Invalid(
                "expense amount cannot be negative".into(),
            ));
        }

        let first_debit = match draft.first_debit_month.as_deref().map(str::trim) {
            None | Some("") => current,
            Some(raw) => MonthIndex::parse(raw).ok_or_else(|| {
                ServiceError::Invalid(format!("`{raw}` is not a month in YYYY-MM form"))
            })?,
        };

        let trimmed = draft.name.trim();
        let name = if trimmed.is_empty() { unnamed } else { trimmed };

        match draft.kind {
            ExpenseType::Monthly => Ok(FixedExpense::monthly(name, draft.amount, first_debit)),
            ExpenseType::Installments => {
                if draft.installments == 0 {
                    return Err(ServiceError::Invalid(
                        "an installment plan needs at least one installment".into(),
                    ));
                }
                Ok(FixedExpense::installments(
                    name,
                    draft.amount,
                    draft.installments,
                    first_debit,
                ))
            }
        }
    }

    pub fn add(
        state: &mut BudgetState,
        draft: ExpenseDraft,
        current: MonthIndex,
        unnamed: &str,
    ) -> ServiceResult<usize> {
        let expense = Self::build(draft, current, unnamed)?;
        tracing::debug!(name = %expense.name, kind = expense.kind.as_str(), "adding fixed expense");
        state.fixed_expenses.push(expense);
        Ok(state.fixed_expenses.len() - 1)
    }

    /// Replaces the expense at `index` with one rebuilt from `draft`.
    pub fn edit(
        state: &mut BudgetState,
        index: usize,
        draft: ExpenseDraft,
        current: MonthIndex,
        unnamed: &str,
    ) -> ServiceResult<()> {
        ensure_index("expense", index, state.fixed_expenses.len())?;
        state.fixed_expenses[index] = Self::build(draft, current, unnamed)?;
        Ok(())
    }

    pub fn remove(state: &mut BudgetState, index: usize) -> ServiceResult<FixedExpense> {
        ensure_index("expense", index, state.fixed_expenses.len())?;
        Ok(state.fixed_expenses.remove(index))
    }
}
