//! Repairs persisted state of any historical shape into a canonical [`BudgetState`].
//!
//! Every record is first tried as its canonical serde shape; when that fails (wrong
//! field types, legacy field names, broken invariants) it is rebuilt field by field
//! with numeric coercion. Only an undecodable payload loses data, and then the whole
//! state falls back to the default.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{BudgetState, CredentialEntry, ExpenseType, ExtraIncome, FixedExpense, Note};

use super::time::{current_month_string, Clock};

/// Placeholder used for expenses stored without a name.
pub const DEFAULT_EXPENSE_NAME: &str = "Unnamed expense";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("saved data is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("saved data is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Result of loading persisted state, with notes on what had to be repaired.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub state: BudgetState,
    /// Legacy shapes that were upgraded.
    pub migrations: Vec<String>,
    /// Data that could not be kept.
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn fresh() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.migrations.is_empty() && self.warnings.is_empty()
    }
}

/// A persisted list entry, classified before it is converted.
enum Record<'v, T> {
    Canonical(T),
    Fields(&'v Map<String, Value>),
    Malformed(&'v Value),
}

/// Canonical records may carry invariants beyond what serde checks.
trait CanonicalRecord: DeserializeOwned {
    fn is_well_formed(&self) -> bool {
        true
    }
}

impl CanonicalRecord for FixedExpense {
    fn is_well_formed(&self) -> bool {
        FixedExpense::is_well_formed(self)
    }
}

impl CanonicalRecord for ExtraIncome {
    fn is_well_formed(&self) -> bool {
        self.amount.is_finite()
    }
}

impl CanonicalRecord for Note {}

impl CanonicalRecord for CredentialEntry {}

impl<'v, T: CanonicalRecord> Record<'v, T> {
    fn classify(value: &'v Value) -> Self {
        match value {
            Value::Object(fields) => match T::deserialize(value) {
                Ok(record) if record.is_well_formed() => Record::Canonical(record),
                _ => Record::Fields(fields),
            },
            other => Record::Malformed(other),
        }
    }
}

/// Converts raw persisted payloads into canonical state.
pub struct Normalizer<'a> {
    clock: &'a dyn Clock,
    unnamed_expense: &'a str,
}

impl<'a> Normalizer<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            unnamed_expense: DEFAULT_EXPENSE_NAME,
        }
    }

    pub fn with_unnamed_expense(mut self, label: &'a str) -> Self {
        self.unnamed_expense = label;
        self
    }

    /// Decodes and normalizes `raw`, reporting why the payload was rejected.
    pub fn parse_state(&self, raw: &str) -> Result<LoadReport, NormalizeError> {
        let value: Value = serde_json::from_str(raw)?;
        self.normalize_value(&value)
    }

    /// Like [`Normalizer::parse_state`], but an unreadable payload yields the default
    /// state with a warning instead of an error.
    pub fn normalize(&self, raw: &str) -> LoadReport {
        match self.parse_state(raw) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable saved state");
                LoadReport {
                    state: BudgetState::default(),
                    migrations: Vec::new(),
                    warnings: vec![format!("{err}; starting from an empty budget")],
                }
            }
        }
    }

    pub fn normalize_value(&self, value: &Value) -> Result<LoadReport, NormalizeError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(NormalizeError::NotAnObject(json_kind(other))),
        };

        let mut report = LoadReport::default();

        report.state.base_amount = match fields.get("baseAmount") {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            _ => {
                let legacy = fields.get("totalAmount").map(coerce_number).unwrap_or(0.0);
                if fields.contains_key("totalAmount") {
                    report
                        .migrations
                        .push("base amount taken from legacy `totalAmount`".to_string());
                }
                legacy
            }
        };

        report.state.extra_incomes =
            self.normalize_list(fields, "extraIncomes", &mut report, income_from_fields);
        report.state.fixed_expenses = self.normalize_list(
            fields,
            "fixedExpenses",
            &mut report,
            |fields: &Map<String, Value>| self.expense_from_fields(fields),
        );
        report.state.notes = self.normalize_list(fields, "notes", &mut report, note_from_fields);
        report.state.passwords =
            self.normalize_list(fields, "passwords", &mut report, credential_from_fields);

        if !report.is_clean() {
            tracing::debug!(
                migrations = report.migrations.len(),
                warnings = report.warnings.len(),
                "normalized legacy saved state"
            );
        }
        Ok(report)
    }

    /// Normalizes a single persisted expense record.
    pub fn normalize_expense(&self, value: &Value) -> Option<FixedExpense> {
        match Record::<FixedExpense>::classify(value) {
            Record::Canonical(expense) => Some(expense),
            Record::Fields(fields) => Some(self.expense_from_fields(fields)),
            Record::Malformed(_) => None,
        }
    }

    fn normalize_list<T, F>(
        &self,
        fields: &Map<String, Value>,
        key: &str,
        report: &mut LoadReport,
        rebuild: F,
    ) -> Vec<T>
    where
        T: CanonicalRecord,
        F: Fn(&Map<String, Value>) -> T,
    {
        let entries = match fields.get(key) {
            Some(Value::Array(entries)) => entries,
            None | Some(Value::Null) => return Vec::new(),
            Some(other) => {
                report.warnings.push(format!(
                    "`{key}` was a JSON {}, not a list; it was reset",
                    json_kind(other)
                ));
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            match Record::<T>::classify(entry) {
                Record::Canonical(record) => records.push(record),
                Record::Fields(fields) => {
                    report
                        .migrations
                        .push(format!("`{key}` entry {} rebuilt from stored fields", position + 1));
                    records.push(rebuild(fields));
                }
                Record::Malformed(value) => {
                    report.warnings.push(format!(
                        "`{key}` entry {} was a JSON {} and was dropped",
                        position + 1,
                        json_kind(value)
                    ));
                }
            }
        }
        records
    }

    fn expense_from_fields(&self, fields: &Map<String, Value>) -> FixedExpense {
        let kind = ExpenseType::from_tag(fields.get("type").and_then(Value::as_str));
        let total_amount = first_present(fields, &["totalAmount", "amount", "monthlyAmount"])
            .map(coerce_number)
            .unwrap_or(0.0);

        let installments = match kind {
            ExpenseType::Monthly => 1,
            ExpenseType::Installments => first_present(fields, &["installments"])
                .map(coerce_number)
                .map(installment_count)
                .unwrap_or(1),
        };

        let derived = match kind {
            ExpenseType::Monthly => total_amount,
            ExpenseType::Installments => total_amount / f64::from(installments),
        };
        let monthly_amount = first_present(fields, &["monthlyAmount"])
            .map(coerce_number)
            .unwrap_or(derived);

        let first_debit_month = fields
            .get("firstDebitMonth")
            .and_then(truthy_text)
            .unwrap_or_else(|| current_month_string(self.clock));

        let name = fields
            .get("name")
            .and_then(truthy_text)
            .unwrap_or_else(|| self.unnamed_expense.to_string());

        FixedExpense {
            name,
            kind,
            total_amount,
            installments,
            monthly_amount,
            first_debit_month,
        }
    }
}

fn income_from_fields(fields: &Map<String, Value>) -> ExtraIncome {
    ExtraIncome {
        detail: text_field(fields, "detail"),
        amount: fields.get("amount").map(coerce_number).unwrap_or(0.0),
    }
}

fn note_from_fields(fields: &Map<String, Value>) -> Note {
    Note {
        title: text_field(fields, "title"),
        content: text_field(fields, "content"),
    }
}

fn credential_from_fields(fields: &Map<String, Value>) -> CredentialEntry {
    CredentialEntry {
        service: text_field(fields, "service"),
        user: text_field(fields, "user"),
        secret: text_field(fields, "secret"),
    }
}

/// Normalizes a whole raw payload against `clock`, never failing.
pub fn normalize(raw: &str, clock: &dyn Clock) -> BudgetState {
    Normalizer::new(clock).normalize(raw).state
}

/// First key whose value is present and not `null`.
fn first_present<'v>(fields: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .find_map(|key| fields.get(*key).filter(|value| !value.is_null()))
}

/// Numeric reading of a stored value. Anything without a finite numeric reading is 0.
pub(crate) fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if number.is_finite() {
        number
    } else {
        0.0
    }
}

/// Installment counts are whole and at least one.
fn installment_count(raw: f64) -> u32 {
    if raw < 1.0 {
        1
    } else if raw >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        raw.floor() as u32
    }
}

/// Text for values that count as "set": non-empty strings and non-zero numbers.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|n| n != 0.0) => {
            Some(number.to_string())
        }
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
