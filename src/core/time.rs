use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

use crate::domain::MonthIndex;

/// Clock abstracts access to the current time so status checks stay deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The calendar month containing `today()`, read fresh on every call.
    fn current_month(&self) -> MonthIndex {
        MonthIndex::from_date(self.today())
    }
}

/// Wall clock. The current month follows the local calendar, not UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Pins the clock to the first day of `month`.
    pub fn at_month(month: MonthIndex) -> Option<Self> {
        month.first_day().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.today.and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Current month as `YYYY-MM`.
pub fn current_month_string(clock: &dyn Clock) -> String {
    clock.current_month().to_string()
}
