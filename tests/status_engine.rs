mod common;

use budget_tracker::core::{expense_status, expense_status_now, SystemClock};
use budget_tracker::core::services::SummaryService;
use budget_tracker::domain::{to_month_index, BudgetState, ExpenseType, FixedExpense};

use common::{clock_at, month};

#[test]
fn installment_plan_boundaries() {
    for installments in [1_u32, 2, 12, 36] {
        let start = month("2023-11");
        let expense = FixedExpense::installments("Plan", 120.0, installments, start);
        let last = start.offset(i64::from(installments) - 1);

        let before = expense_status(&expense, start.previous());
        assert!(!before.is_active_this_month);
        assert_eq!(before.remaining_installments, Some(installments));

        let first = expense_status(&expense, start);
        assert!(first.is_active_this_month);
        assert_eq!(first.remaining_installments, Some(installments - 1));
        assert_eq!(first.end_month, Some(last.to_string()));

        let final_month = expense_status(&expense, last);
        assert!(final_month.is_active_this_month);
        assert_eq!(final_month.remaining_installments, Some(0));

        let after = expense_status(&expense, last.next());
        assert!(!after.is_active_this_month);
        assert_eq!(after.remaining_installments, Some(0));
        assert!(after.is_finished());
    }
}

#[test]
fn monthly_expense_starts_and_never_ends() {
    let start = month("2024-06");
    let gym = FixedExpense::monthly("Gym", 40.0, start);

    assert!(!expense_status(&gym, start.previous()).is_active_this_month);
    for offset in [0, 1, 13, 240] {
        let status = expense_status(&gym, start.offset(offset));
        assert!(status.is_active_this_month);
        assert!(status.is_monthly);
        assert_eq!(status.remaining_installments, None);
        assert_eq!(status.end_month, None);
    }
}

#[test]
fn unparseable_first_month_is_never_active() {
    let mut expense = FixedExpense::installments("Odd", 90.0, 3, month("2024-01"));
    expense.first_debit_month = "sometime".into();
    let status = expense_status(&expense, month("2024-02"));
    assert!(!status.is_active_this_month);
    assert_eq!(status.remaining_installments, Some(3));
    assert_eq!(status.end_month.as_deref(), Some("sometime"));
    assert_eq!(expense.kind, ExpenseType::Installments);
}

#[test]
fn aggregation_only_counts_active_expenses() {
    let mut state = BudgetState {
        base_amount: 2000.0,
        ..BudgetState::default()
    };
    state.fixed_expenses = vec![
        FixedExpense::monthly("Rent", 800.0, month("2020-01")),
        FixedExpense::monthly("Future", 50.0, month("2030-01")),
        FixedExpense::installments("Done", 300.0, 3, month("2023-01")),
        FixedExpense::installments("Phone", 600.0, 12, month("2024-01")),
    ];

    let summary = SummaryService::summarize(&state, month("2024-05"));
    assert_eq!(summary.active_expenses, 850.0);
    assert_eq!(summary.remaining, 1150.0);
}

#[test]
fn system_clock_month_round_trips() {
    let current = SummaryService::current_summary(&BudgetState::default(), &SystemClock);
    assert_eq!(current.remaining, 0.0);

    let today = budget_tracker::core::Clock::current_month(&SystemClock);
    assert_eq!(to_month_index(&today.to_string()), Some(today));
}

#[test]
fn clock_driven_status_matches_explicit_month() {
    let clock = clock_at("2024-02");
    let expense = FixedExpense::installments("Laptop", 300.0, 3, month("2024-01"));
    assert_eq!(
        expense_status_now(&expense, clock.as_ref()),
        expense_status(&expense, month("2024-02"))
    );
}
