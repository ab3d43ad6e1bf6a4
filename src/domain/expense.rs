use serde::{Deserialize, Serialize};

use super::month::MonthIndex;

/// How a fixed expense is debited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    /// Same amount every month, with no end.
    Monthly,
    /// A total split evenly over a fixed number of monthly payments.
    #[default]
    Installments,
}

impl ExpenseType {
    /// Reads a persisted type tag; anything other than `monthly` is installments.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("monthly") => ExpenseType::Monthly,
            _ => ExpenseType::Installments,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseType::Monthly => "monthly",
            ExpenseType::Installments => "installments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseType::Monthly => "Monthly",
            ExpenseType::Installments => "Installments",
        }
    }
}

/// A recurring or installment-based expense.
///
/// `first_debit_month` is kept as the raw `YYYY-MM` text so an unparseable value
/// can still be shown back to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExpenseType,
    pub total_amount: f64,
    pub installments: u32,
    pub monthly_amount: f64,
    pub first_debit_month: String,
}

impl FixedExpense {
    /// An open-ended monthly debit.
    pub fn monthly(name: impl Into<String>, amount: f64, first_debit_month: MonthIndex) -> Self {
        Self {
            name: name.into(),
            kind: ExpenseType::Monthly,
            total_amount: amount,
            installments: 1,
            monthly_amount: amount,
            first_debit_month: first_debit_month.to_string(),
        }
    }

    /// A total paid over `installments` months; a count of zero is treated as one.
    pub fn installments(
        name: impl Into<String>,
        total_amount: f64,
        installments: u32,
        first_debit_month: MonthIndex,
    ) -> Self {
        let installments = installments.max(1);
        Self {
            name: name.into(),
            kind: ExpenseType::Installments,
            total_amount,
            installments,
            monthly_amount: total_amount / f64::from(installments),
            first_debit_month: first_debit_month.to_string(),
        }
    }

    pub fn is_monthly(&self) -> bool {
        self.kind == ExpenseType::Monthly
    }

    pub fn first_debit_index(&self) -> Option<MonthIndex> {
        MonthIndex::parse(&self.first_debit_month)
    }

    /// Whether the record already satisfies every invariant of a stored expense.
    pub fn is_well_formed(&self) -> bool {
        let installments_ok = match self.kind {
            ExpenseType::Monthly => self.installments == 1,
            ExpenseType::Installments => self.installments >= 1,
        };
        let amounts_ok = self.total_amount.is_finite()
            && self.monthly_amount.is_finite()
            && (self.total_amount <= 0.0 || self.monthly_amount > 0.0);
        installments_ok
            && amounts_ok
            && !self.name.trim().is_empty()
            && !self.first_debit_month.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2024() -> MonthIndex {
        MonthIndex::parse("2024-03").unwrap()
    }

    #[test]
    fn installments_split_total_evenly() {
        let expense = FixedExpense::installments("Laptop", 1200.0, 12, march_2024());
        assert_eq!(expense.monthly_amount, 100.0);
        assert_eq!(expense.first_debit_month, "2024-03");
        assert!(expense.is_well_formed());
    }

    #[test]
    fn zero_installments_become_single_payment() {
        let expense = FixedExpense::installments("Fee", 50.0, 0, march_2024());
        assert_eq!(expense.installments, 1);
        assert_eq!(expense.monthly_amount, 50.0);
    }

    #[test]
    fn monthly_expense_serializes_with_type_tag() {
        let expense = FixedExpense::monthly("Rent", 800.0, march_2024());
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["type"], "monthly");
        assert_eq!(json["firstDebitMonth"], "2024-03");
        assert_eq!(json["monthlyAmount"], 800.0);
    }

    #[test]
    fn monthly_with_several_installments_is_not_well_formed() {
        let mut expense = FixedExpense::monthly("Gym", 30.0, march_2024());
        expense.installments = 3;
        assert!(!expense.is_well_formed());
    }

    #[test]
    fn unknown_type_tag_reads_as_installments() {
        assert_eq!(ExpenseType::from_tag(Some("weekly")), ExpenseType::Installments);
        assert_eq!(ExpenseType::from_tag(None), ExpenseType::Installments);
        assert_eq!(ExpenseType::from_tag(Some("monthly")), ExpenseType::Monthly);
    }
}
