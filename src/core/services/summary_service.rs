//! Balance aggregation over the current month.

use crate::core::status::{expense_status, ExpenseStatus};
use crate::core::time::Clock;
use crate::domain::{BudgetState, MonthIndex};

/// Figures shown in the finance overview. `remaining` goes negative on overspend.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetSummary {
    pub base_amount: f64,
    pub extra_incomes: f64,
    pub active_expenses: f64,
    pub available: f64,
    pub remaining: f64,
}

impl BudgetSummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn sum_extra_incomes(state: &BudgetState) -> f64 {
        state
            .extra_incomes
            .iter()
            .map(|income| finite_or_zero(income.amount))
            .sum()
    }

    /// Sum of monthly debits for expenses active in `current`.
    pub fn sum_active_monthly_expenses(state: &BudgetState, current: MonthIndex) -> f64 {
        state
            .fixed_expenses
            .iter()
            .filter(|expense| expense_status(expense, current).is_active_this_month)
            .map(|expense| finite_or_zero(expense.monthly_amount))
            .sum()
    }

    pub fn summarize(state: &BudgetState, current: MonthIndex) -> BudgetSummary {
        let base_amount = finite_or_zero(state.base_amount);
        let extra_incomes = Self::sum_extra_incomes(state);
        let active_expenses = Self::sum_active_monthly_expenses(state, current);
        let available = base_amount + extra_incomes;
        BudgetSummary {
            base_amount,
            extra_incomes,
            active_expenses,
            available,
            remaining: available - active_expenses,
        }
    }

    pub fn current_summary(state: &BudgetState, clock: &dyn Clock) -> BudgetSummary {
        Self::summarize(state, clock.current_month())
    }

    /// Status of every expense in list order.
    pub fn expense_statuses(state: &BudgetState, current: MonthIndex) -> Vec<ExpenseStatus> {
        state
            .fixed_expenses
            .iter()
            .map(|expense| expense_status(expense, current))
            .collect()
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
