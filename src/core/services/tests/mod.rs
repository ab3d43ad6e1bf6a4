mod expense_service_tests;
mod record_service_tests;

use crate::domain::MonthIndex;

pub(super) fn month(text: &str) -> MonthIndex {
    MonthIndex::parse(text).expect("valid month literal")
}
