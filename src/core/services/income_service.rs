use crate::domain::{BudgetState, ExtraIncome};

use super::{ensure_finite, ensure_index, ServiceResult};

pub struct IncomeService;

impl IncomeService {
    pub fn set_base_amount(state: &mut BudgetState, amount: f64) -> ServiceResult<()> {
        ensure_finite("base amount", amount)?;
        state.base_amount = amount;
        tracing::debug!(amount, "base amount updated");
        Ok(())
    }

    /// Appends an income and returns its index.
    pub fn add(state: &mut BudgetState, income: ExtraIncome) -> ServiceResult<usize> {
        ensure_finite("income amount", income.amount)?;
        state.extra_incomes.push(income);
        Ok(state.extra_incomes.len() - 1)
    }

    /// Replaces the income at `index` wholesale.
    pub fn edit(state: &mut BudgetState, index: usize, income: ExtraIncome) -> ServiceResult<()> {
        ensure_index("income", index, state.extra_incomes.len())?;
        ensure_finite("income amount", income.amount)?;
        state.extra_incomes[index] = income;
        Ok(())
    }

    pub fn remove(state: &mut BudgetState, index: usize) -> ServiceResult<ExtraIncome> {
        ensure_index("income", index, state.extra_incomes.len())?;
        Ok(state.extra_incomes.remove(index))
    }
}
