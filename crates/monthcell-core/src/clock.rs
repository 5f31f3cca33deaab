use anyhow::Context;
use chrono::{
  Datelike,
  Local,
  NaiveDate
};

/// Source of "today" for date-label
/// derivation.
pub trait Clock {
  fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate {
    Local::now().date_naive()
  }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate {
    self.0
  }
}

/// Month and day-of-month match; the year
/// is not compared.
#[must_use]
pub fn same_month_day(
  a: NaiveDate,
  b: NaiveDate
) -> bool {
  a.month() == b.month()
    && a.day() == b.day()
}

pub fn parse_date(
  raw: &str
) -> anyhow::Result<NaiveDate> {
  NaiveDate::parse_from_str(
    raw.trim(),
    "%Y-%m-%d"
  )
  .with_context(|| {
    format!(
      "invalid date {raw:?}; expected \
       YYYY-MM-DD"
    )
  })
}
