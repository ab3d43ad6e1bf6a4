//! Per-month activity status for fixed expenses.

use crate::domain::{month_from_index, ExpenseType, FixedExpense, MonthIndex};

use super::time::Clock;

/// Where an expense stands in a given month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseStatus {
    /// Payments still due after the evaluated month. `None` for monthly expenses.
    pub remaining_installments: Option<u32>,
    /// Last debit month. `None` for monthly expenses; the raw stored text when the
    /// first debit month cannot be parsed.
    pub end_month: Option<String>,
    pub is_active_this_month: bool,
    pub is_monthly: bool,
}

impl ExpenseStatus {
    /// True once every installment has been debited.
    pub fn is_finished(&self) -> bool {
        !self.is_active_this_month && self.remaining_installments == Some(0)
    }
}

/// Evaluates `expense` against `current`.
///
/// An unparseable first debit month never activates: the installment count and the
/// raw month text are echoed back unchanged.
pub fn expense_status(expense: &FixedExpense, current: MonthIndex) -> ExpenseStatus {
    let Some(first) = expense.first_debit_index() else {
        return ExpenseStatus {
            remaining_installments: Some(expense.installments),
            end_month: Some(expense.first_debit_month.clone()),
            is_active_this_month: false,
            is_monthly: expense.is_monthly(),
        };
    };

    match expense.kind {
        ExpenseType::Monthly => ExpenseStatus {
            remaining_installments: None,
            end_month: None,
            is_active_this_month: current >= first,
            is_monthly: true,
        },
        ExpenseType::Installments => {
            let total = i64::from(expense.installments);
            let end = first.offset(total - 1);
            let paid = (first.months_until(current) + 1).clamp(0, total);
            let remaining = u32::try_from(total - paid).unwrap_or(0);
            ExpenseStatus {
                remaining_installments: Some(remaining),
                end_month: Some(month_from_index(end)),
                is_active_this_month: first <= current && current <= end,
                is_monthly: false,
            }
        }
    }
}

/// Evaluates `expense` against the clock's current month.
pub fn expense_status_now(expense: &FixedExpense, clock: &dyn Clock) -> ExpenseStatus {
    expense_status(expense, clock.current_month())
}
