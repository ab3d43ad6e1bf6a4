//! Interactive expense wizard.

use dialoguer::theme::ColorfulTheme;

use crate::cli::core::{parse_amount, parse_count, CommandError};
use crate::cli::formatters::format_amount;
use crate::cli::io;
use crate::core::services::ExpenseDraft;
use crate::domain::{ExpenseType, MonthIndex};

const TYPE_CHOICES: [&str; 2] = ["Installments", "Monthly"];

pub struct ExpenseWizard<'a> {
    theme: &'a ColorfulTheme,
    current: MonthIndex,
    currency: &'a str,
}

impl<'a> ExpenseWizard<'a> {
    pub fn new(theme: &'a ColorfulTheme, current: MonthIndex, currency: &'a str) -> Self {
        Self {
            theme,
            current,
            currency,
        }
    }

    /// Walks through the expense fields. `None` means the user backed out.
    pub fn run(&self) -> Result<Option<ExpenseDraft>, CommandError> {
        let kind = match io::select(self.theme, "Expense type", &TYPE_CHOICES)? {
            0 => ExpenseType::Installments,
            _ => ExpenseType::Monthly,
        };
        let name = io::prompt_text(self.theme, "Name", None)?;

        let amount_label = match kind {
            ExpenseType::Monthly => "Monthly amount",
            ExpenseType::Installments => "Total amount",
        };
        let amount = self.prompt_until(amount_label, |raw| parse_amount("amount", raw))?;

        let installments = match kind {
            ExpenseType::Monthly => 1,
            ExpenseType::Installments => self.prompt_until("Installments", |raw| {
                match parse_count("installments", raw)? {
                    0 => Err(CommandError::InvalidArguments(
                        "at least one installment is required".into(),
                    )),
                    count => Ok(count),
                }
            })?,
        };
        if kind == ExpenseType::Installments {
            io::print_info(format!(
                "Monthly debit: {}",
                format_amount(amount / f64::from(installments), self.currency)
            ));
        }

        let month = io::prompt_text(
            self.theme,
            "First debit month (YYYY-MM)",
            Some(&self.current.to_string()),
        )?;

        if !io::confirm_action(self.theme, "Save this expense?", true)? {
            return Ok(None);
        }

        Ok(Some(ExpenseDraft {
            name,
            kind,
            amount,
            installments,
            first_debit_month: Some(month),
        }))
    }

    fn prompt_until<T>(
        &self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        loop {
            let raw = io::prompt_text(self.theme, label, None)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(CommandError::InvalidArguments(message)) => io::print_warning(message),
                Err(other) => return Err(other),
            }
        }
    }
}
