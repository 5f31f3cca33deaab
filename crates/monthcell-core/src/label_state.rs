//! Date-label styling of a month cell.
//!
//! The base appearance comes from the day
//! alone (weekend background, today badge).
//! The selection date is then laid over it
//! with these rules, first match wins:
//!
//! 1. The day is in the same month as
//!    today. Today loses its badge when a
//!    different day-of-month is selected,
//!    and the selected day is marked unless
//!    its day-of-month equals today's.
//!    Nothing else is re-derived.
//! 2. Otherwise the selected day is marked
//!    and every other day keeps its base
//!    appearance.

use chrono::{
  Datelike,
  NaiveDate
};
use serde::{
  Deserialize,
  Serialize
};

use crate::clock::same_month_day;
use crate::color::Color;
use crate::day::Day;
use crate::style::MonthStyle;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LabelState {
  PlainWeekday,
  Weekend,
  Today,
  /// Today, while another day of the
  /// current month is selected.
  TodayDeselected,
  SelectedOtherDay
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct LabelStyle {
  pub text_color:    Color,
  pub background:    Color,
  pub corner_radius: f64
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct DayAppearance {
  pub state:           LabelState,
  pub cell_background: Color,
  pub label:           LabelStyle
}

/// Weekend and today derivation, ignoring
/// the selection.
#[must_use]
pub fn base_appearance(
  day: &Day,
  style: &MonthStyle,
  today: NaiveDate,
  label_width: f64
) -> DayAppearance {
  let weekend =
    day.day_type.is_weekend();
  let cell_background = if weekend {
    style.color_background_weekend_date
  } else {
    style.color_background_date
  };

  if day.date == Some(today) {
    return DayAppearance {
      state: LabelState::Today,
      cell_background,
      label: LabelStyle {
        text_color:    style
          .color_current_date,
        background:    style
          .color_background_current_date,
        corner_radius: label_width / 2.0
      }
    };
  }

  let (state, text_color) = if weekend {
    (
      LabelState::Weekend,
      style.color_weekend_date
    )
  } else {
    (
      LabelState::PlainWeekday,
      style.color_date
    )
  };

  DayAppearance {
    state,
    cell_background,
    label: LabelStyle {
      text_color,
      background: Color::CLEAR,
      corner_radius: 0.0
    }
  }
}

#[must_use]
pub fn derive_appearance(
  day: &Day,
  selection: NaiveDate,
  style: &MonthStyle,
  today: NaiveDate,
  label_width: f64
) -> DayAppearance {
  let mut appearance = base_appearance(
    day,
    style,
    today,
    label_width
  );
  let Some(date) = day.date else {
    return appearance;
  };

  let selected = DayAppearance {
    state: LabelState::SelectedOtherDay,
    label: LabelStyle {
      text_color:    style
        .color_select_date,
      background:    style
        .color_background_select_date,
      corner_radius: label_width / 2.0
    },
    ..appearance
  };

  // Month only: a cell in another year with
  // today's month takes this branch too.
  if date.month() == today.month() {
    let selection_elsewhere =
      selection.day() != today.day();
    if selection_elsewhere
      && date == today
    {
      appearance.state =
        LabelState::TodayDeselected;
      appearance.label = LabelStyle {
        text_color:    style
          .color_background_current_date,
        background:    Color::CLEAR,
        corner_radius: 0.0
      };
    }
    if selection_elsewhere
      && same_month_day(date, selection)
    {
      return selected;
    }
    return appearance;
  }

  if same_month_day(date, selection) {
    selected
  } else {
    appearance
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    LabelState,
    derive_appearance
  };
  use crate::color::Color;
  use crate::day::Day;
  use crate::style::MonthStyle;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  fn today() -> NaiveDate {
    date(2026, 10, 19)
  }

  #[test]
  fn sunday_elsewhere_uses_weekend_style() {
    let style = MonthStyle::default();
    let day = Day::from_date(date(2026, 11, 1));
    let look = derive_appearance(
      &day,
      date(2026, 11, 20),
      &style,
      today(),
      35.0
    );
    assert_eq!(look.state, LabelState::Weekend);
    assert_eq!(
      look.cell_background,
      style.color_background_weekend_date
    );
    assert_eq!(
      look.label.text_color,
      style.color_weekend_date
    );
    assert_eq!(
      look.label.background,
      Color::CLEAR
    );
  }

  #[test]
  fn today_badge_wins_over_weekend() {
    let style = MonthStyle::default();
    let saturday = date(2026, 10, 24);
    let day = Day::from_date(saturday);
    let look = derive_appearance(
      &day,
      saturday,
      &style,
      saturday,
      35.0
    );
    assert_eq!(look.state, LabelState::Today);
    assert_eq!(
      look.label.background,
      style.color_background_current_date
    );
    assert_eq!(
      look.label.text_color,
      style.color_current_date
    );
    assert_eq!(look.label.corner_radius, 17.5);
    assert_eq!(
      look.cell_background,
      style.color_background_weekend_date
    );
  }

  #[test]
  fn selected_day_in_another_month() {
    let style = MonthStyle::default();
    let day = Day::from_date(date(2026, 12, 3));
    let look = derive_appearance(
      &day,
      date(2026, 12, 3),
      &style,
      today(),
      35.0
    );
    assert_eq!(
      look.state,
      LabelState::SelectedOtherDay
    );
    assert_eq!(
      look.label.text_color,
      style.color_select_date
    );
    assert_eq!(
      look.label.background,
      style.color_background_select_date
    );
    assert_eq!(look.label.corner_radius, 17.5);
  }

  #[test]
  fn selected_day_in_current_month() {
    let style = MonthStyle::default();
    let day = Day::from_date(date(2026, 10, 7));
    let look = derive_appearance(
      &day,
      date(2026, 10, 7),
      &style,
      today(),
      40.0
    );
    assert_eq!(
      look.state,
      LabelState::SelectedOtherDay
    );
    assert_eq!(look.label.corner_radius, 20.0);
  }

  #[test]
  fn today_loses_badge_when_other_day_selected()
  {
    let style = MonthStyle::default();
    let day = Day::from_date(today());
    let look = derive_appearance(
      &day,
      date(2026, 10, 7),
      &style,
      today(),
      35.0
    );
    assert_eq!(
      look.state,
      LabelState::TodayDeselected
    );
    assert_eq!(
      look.label.text_color,
      style.color_background_current_date
    );
    assert_eq!(
      look.label.background,
      Color::CLEAR
    );
  }

  #[test]
  fn selecting_today_keeps_badge() {
    let style = MonthStyle::default();
    let day = Day::from_date(today());
    let look = derive_appearance(
      &day,
      today(),
      &style,
      today(),
      35.0
    );
    assert_eq!(look.state, LabelState::Today);
  }

  #[test]
  fn same_day_of_month_as_today_is_not_marked()
  {
    // The current-month branch only marks a
    // selection whose day differs from today.
    let style = MonthStyle::default();
    let day = Day::from_date(date(2027, 10, 19));
    let look = derive_appearance(
      &day,
      date(2027, 10, 19),
      &style,
      today(),
      35.0
    );
    assert_eq!(
      look.state,
      LabelState::PlainWeekday
    );
  }

  #[test]
  fn empty_day_keeps_plain_style() {
    let style = MonthStyle::default();
    let look = derive_appearance(
      &Day::empty(),
      today(),
      &style,
      today(),
      35.0
    );
    assert_eq!(
      look.state,
      LabelState::PlainWeekday
    );
    assert_eq!(
      look.cell_background,
      style.color_background_date
    );
  }
}
