use chrono::{
  Datelike,
  NaiveDate,
  Weekday
};
use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
  Normal,
  Saturday,
  Sunday,
  #[default]
  Empty
}

impl DayType {
  #[must_use]
  pub fn from_weekday(
    weekday: Weekday
  ) -> Self {
    match weekday {
      | Weekday::Sat => DayType::Saturday,
      | Weekday::Sun => DayType::Sunday,
      | _ => DayType::Normal
    }
  }

  #[must_use]
  pub fn is_weekend(self) -> bool {
    matches!(
      self,
      DayType::Saturday
        | DayType::Sunday
    )
  }
}

/// One grid position of the month view.
/// Padding positions before the first and
/// after the last day of a month carry no
/// date and [`DayType::Empty`].
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct Day {
  #[serde(default)]
  pub date:     Option<NaiveDate>,
  #[serde(rename = "type", default)]
  pub day_type: DayType,
  #[serde(default)]
  pub label:    String
}

impl Day {
  #[must_use]
  pub fn empty() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn from_date(
    date: NaiveDate
  ) -> Self {
    Self {
      date:     Some(date),
      day_type: DayType::from_weekday(
        date.weekday()
      ),
      label:    date.day().to_string()
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.day_type == DayType::Empty
  }
}
