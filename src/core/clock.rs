use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

// Clock is the single source of "now" for an operation. Services read it once per
// operation and pass the resulting date into every fee/overdue/availability call.
pub trait Clock: Sync + Send {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

// FixedClock always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn on(date: NaiveDate) -> Self {
        Self { now: date.and_time(NaiveTime::default()) }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
