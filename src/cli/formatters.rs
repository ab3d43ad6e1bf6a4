//! Text rendering for amounts, months, and list rows.

use crate::core::ExpenseStatus;
use crate::domain::{CredentialEntry, ExtraIncome, FixedExpense, MonthIndex, Note};

const SECRET_MASK: &str = "********";

/// Two decimals, comma-grouped thousands, symbol in front of the sign-less body.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let body = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let grouped = group_digits(int_part);
    if amount < 0.0 && body != "0.00" {
        format!("-{symbol}{grouped}.{frac_part}")
    } else {
        format!("{symbol}{grouped}.{frac_part}")
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().enumerate() {
        if count != 0 && (digits.len() - count) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `October 2026` style label.
pub fn month_label(month: MonthIndex) -> String {
    month
        .first_day()
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Label for stored month text, echoing it back when it does not parse.
pub fn month_text_label(raw: &str) -> String {
    MonthIndex::parse(raw)
        .map(month_label)
        .unwrap_or_else(|| raw.to_string())
}

pub fn income_row(position: usize, income: &ExtraIncome, symbol: &str) -> String {
    format!(
        "{position:>3}. {:<24} {:>14}",
        income.detail,
        format_amount(income.amount, symbol)
    )
}

pub fn expense_row(
    position: usize,
    expense: &FixedExpense,
    status: &ExpenseStatus,
    symbol: &str,
) -> String {
    let mut row = format!(
        "{position:>3}. {} [{}] {}/month",
        expense.name,
        expense.kind.label(),
        format_amount(expense.monthly_amount, symbol)
    );
    if !status.is_monthly {
        row.push_str(&format!(
            ", {} over {} installments",
            format_amount(expense.total_amount, symbol),
            expense.installments
        ));
    }
    row.push_str(&format!(
        ", first debit {}",
        month_text_label(&expense.first_debit_month)
    ));
    match (&status.end_month, status.remaining_installments) {
        (None, _) => row.push_str(", no end"),
        (Some(end), Some(remaining)) => row.push_str(&format!(
            ", ends {}, {remaining} left",
            month_text_label(end)
        )),
        (Some(end), None) => row.push_str(&format!(", ends {}", month_text_label(end))),
    }
    if status.is_finished() {
        row.push_str(" (finished)");
    } else if !status.is_active_this_month {
        row.push_str(" (inactive)");
    }
    row
}

pub fn note_row(position: usize, note: &Note, editing: bool) -> String {
    let marker = if editing { " (editing)" } else { "" };
    format!("{position:>3}. {}{marker}: {}", note.title, note.content)
}

pub fn credential_row(
    position: usize,
    entry: &CredentialEntry,
    editing: bool,
    reveal: bool,
) -> String {
    let marker = if editing { " (editing)" } else { "" };
    let secret = if reveal {
        entry.secret.as_str()
    } else {
        SECRET_MASK
    };
    format!(
        "{position:>3}. {}{marker}  user: {}  password: {secret}",
        entry.service, entry.user
    )
}
