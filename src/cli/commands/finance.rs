use crate::cli::core::{
    parse_amount, parse_count, parse_position, CommandError, CommandResult, ShellContext,
};
use crate::cli::formatters::{expense_row, format_amount, income_row, month_label};
use crate::cli::forms::ExpenseWizard;
use crate::cli::io;
use crate::cli::output::section;
use crate::cli::registry::CommandEntry;
use crate::core::services::ExpenseDraft;

use super::usage_error;

const BASE_USAGE: &str = "base <amount>";
const INCOME_USAGE: &str = "income list
income add <detail> <amount>
income edit <#> <detail> <amount>
income rm <#>";
const EXPENSE_USAGE: &str = "expense list
expense add
expense add monthly <name> <amount> [YYYY-MM]
expense add installments <name> <total> <count> [YYYY-MM]
expense edit <#> monthly|installments ...
expense rm <#>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show this month's balance",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("base", "Set the base monthly amount", BASE_USAGE, cmd_base),
        CommandEntry::new("income", "Manage extra incomes", INCOME_USAGE, cmd_income),
        CommandEntry::new("expense", "Manage fixed expenses", EXPENSE_USAGE, cmd_expense),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.session.summary();
    let symbol = context.currency();
    section(format!(
        "Summary for {}",
        month_label(context.session.current_month())
    ));
    io::print_info(format!("  Base amount     : {}", format_amount(summary.base_amount, symbol)));
    io::print_info(format!("  Extra incomes   : {}", format_amount(summary.extra_incomes, symbol)));
    io::print_info(format!("  Available       : {}", format_amount(summary.available, symbol)));
    io::print_info(format!("  Active expenses : {}", format_amount(summary.active_expenses, symbol)));
    io::print_info(format!("  Remaining       : {}", format_amount(summary.remaining, symbol)));
    if summary.is_overspent() {
        io::print_warning("This month's expenses exceed the money available.");
    }
    if context.session.state().is_empty() {
        io::print_hint("Nothing recorded yet. Start with `base <amount>`.");
    }
    Ok(())
}

fn cmd_base(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = match args {
        [raw] => parse_amount("base amount", raw)?,
        [] => {
            context.require_interactive(BASE_USAGE)?;
            let raw = io::prompt_text(context.theme(), "Base amount", None)?;
            parse_amount("base amount", &raw)?
        }
        _ => return Err(usage_error(BASE_USAGE)),
    };
    context.session.set_base_amount(amount)?;
    io::print_success(format!(
        "Base amount set to {}.",
        format_amount(amount, context.currency())
    ));
    Ok(())
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            list_incomes(context);
            Ok(())
        }
        ["add", detail, amount] => {
            let amount = parse_amount("income amount", amount)?;
            let index = context.session.add_income(detail, amount)?;
            io::print_success(format!("Income #{} added.", index + 1));
            Ok(())
        }
        ["edit", position, detail, amount] => {
            let index = parse_position("income", position)?;
            let amount = parse_amount("income amount", amount)?;
            context.session.edit_income(index, detail, amount)?;
            io::print_success(format!("Income #{} updated.", index + 1));
            Ok(())
        }
        ["rm" | "remove", position] => {
            let index = parse_position("income", position)?;
            let removed = context.session.remove_income(index)?;
            io::print_success(format!("Removed income `{}`.", removed.detail));
            Ok(())
        }
        _ => Err(usage_error(INCOME_USAGE)),
    }
}

fn list_incomes(context: &ShellContext) {
    let incomes = &context.session.state().extra_incomes;
    section("Extra incomes");
    if incomes.is_empty() {
        io::print_info("No extra incomes yet.");
        return;
    }
    for (index, income) in incomes.iter().enumerate() {
        io::print_info(income_row(index + 1, income, context.currency()));
    }
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            list_expenses(context);
            Ok(())
        }
        ["add"] => {
            context.require_interactive(EXPENSE_USAGE)?;
            let wizard = ExpenseWizard::new(
                context.theme(),
                context.session.current_month(),
                context.currency(),
            );
            let Some(draft) = wizard.run()? else {
                io::print_info("Expense discarded.");
                return Ok(());
            };
            let index = context.session.add_expense(draft)?;
            io::print_success(format!("Expense #{} added.", index + 1));
            Ok(())
        }
        ["add", rest @ ..] => {
            let draft = parse_draft(rest)?;
            let index = context.session.add_expense(draft)?;
            io::print_success(format!("Expense #{} added.", index + 1));
            Ok(())
        }
        ["edit", position, rest @ ..] => {
            let index = parse_position("expense", position)?;
            let draft = parse_draft(rest)?;
            context.session.edit_expense(index, draft)?;
            io::print_success(format!("Expense #{} updated.", index + 1));
            Ok(())
        }
        ["rm" | "remove", position] => {
            let index = parse_position("expense", position)?;
            let removed = context.session.remove_expense(index)?;
            io::print_success(format!("Removed expense `{}`.", removed.name));
            Ok(())
        }
        _ => Err(usage_error(EXPENSE_USAGE)),
    }
}

/// Reads `monthly <name> <amount> [month]` or `installments <name> <total> <count> [month]`.
fn parse_draft(args: &[&str]) -> Result<ExpenseDraft, CommandError> {
    let (draft, month) = match args {
        ["monthly", name, amount, month @ ..] if month.len() <= 1 => (
            ExpenseDraft::monthly(*name, parse_amount("expense amount", amount)?),
            month.first(),
        ),
        ["installments", name, total, count, month @ ..] if month.len() <= 1 => (
            ExpenseDraft::installments(
                *name,
                parse_amount("expense total", total)?,
                parse_count("installments", count)?,
            ),
            month.first(),
        ),
        _ => return Err(usage_error(EXPENSE_USAGE)),
    };
    Ok(match month {
        Some(month) => draft.starting(*month),
        None => draft,
    })
}

fn list_expenses(context: &ShellContext) {
    let expenses = &context.session.state().fixed_expenses;
    section(format!(
        "Fixed expenses ({})",
        month_label(context.session.current_month())
    ));
    if expenses.is_empty() {
        io::print_info("No fixed expenses yet.");
        return;
    }
    let statuses = context.session.expense_statuses();
    for (index, (expense, status)) in expenses.iter().zip(&statuses).enumerate() {
        io::print_info(expense_row(index + 1, expense, status, context.currency()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpenseType;

    #[test]
    fn parses_inline_expense_drafts() {
        let draft = parse_draft(&["installments", "Laptop", "300", "3", "2024-11"]).unwrap();
        assert_eq!(draft.kind, ExpenseType::Installments);
        assert_eq!(draft.installments, 3);
        assert_eq!(draft.first_debit_month.as_deref(), Some("2024-11"));

        let draft = parse_draft(&["monthly", "Rent", "900"]).unwrap();
        assert_eq!(draft.kind, ExpenseType::Monthly);
        assert_eq!(draft.first_debit_month, None);

        assert!(parse_draft(&["weekly", "Gym", "10"]).is_err());
        assert!(parse_draft(&["monthly", "Rent", "900", "2024-01", "extra"]).is_err());
        assert!(parse_draft(&["installments", "Phone", "600", "three"]).is_err());
    }
}
