use std::sync::Arc;

use chrono::{
  NaiveDate,
  NaiveDateTime
};
use serde::Serialize;
use tracing::debug;

use crate::clock::{
  Clock,
  SystemClock
};
use crate::color::Color;
use crate::day::Day;
use crate::event::Event;
use crate::geometry::{
  Point,
  Rect,
  Size
};
use crate::label_state::{
  LabelState,
  LabelStyle,
  derive_appearance
};
use crate::layout::{
  OFFSET,
  Row,
  RowId,
  TITLES_COUNT,
  TapTarget,
  TextAlignment,
  layout_rows
};
use crate::style::{
  Font,
  MonthStyle
};

pub const DATE_LABEL_SIZE: Size =
  Size::new(35.0, 35.0);

/// Everything a render depends on besides
/// today's date.
#[derive(Debug, Clone)]
pub struct CellState {
  pub frame:     Rect,
  pub day:       Day,
  pub events:    Arc<[Event]>,
  pub selection: NaiveDate,
  pub style:     MonthStyle
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Serialize,
)]
pub struct Border {
  pub width: f64,
  pub color: Color
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
)]
pub struct DateLabel {
  pub frame:           Rect,
  pub text:            String,
  pub font:            Font,
  pub alignment:       TextAlignment,
  pub clips_to_bounds: bool,
  pub style:           LabelStyle
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
)]
pub struct RenderOutput {
  pub background: Color,
  pub border:     Option<Border>,
  pub state:      LabelState,
  pub date_label: DateLabel,
  pub rows:       Vec<Row>
}

impl RenderOutput {
  #[must_use]
  pub fn row(
    &self,
    id: RowId
  ) -> Option<&Row> {
    self.rows.iter().find(|row| row.id == id)
  }

  #[must_use]
  pub fn overflow_row(
    &self
  ) -> Option<&Row> {
    self.rows.iter().find(|row| {
      row.is_overflow()
    })
  }

  #[must_use]
  pub fn event_rows(&self) -> usize {
    self
      .rows
      .iter()
      .filter(|row| !row.is_overflow())
      .count()
  }

  #[must_use]
  pub fn hit_test(
    &self,
    point: Point
  ) -> Option<&Row> {
    self.rows.iter().find(|row| {
      row.interactive
        && row.frame.contains(point)
    })
  }
}

/// Top-right badge position inside a cell
/// of the given size.
#[must_use]
pub fn date_label_frame(
  cell: Size
) -> Rect {
  Rect::new(
    cell.width
      - DATE_LABEL_SIZE.width
      - OFFSET,
    OFFSET,
    DATE_LABEL_SIZE.width,
    DATE_LABEL_SIZE.height
  )
}

fn border_for(
  day: &Day,
  style: &MonthStyle
) -> Option<Border> {
  if style.is_hidden_separator {
    return None;
  }
  Some(if day.is_empty() {
    Border {
      width: 0.0,
      color: Color::CLEAR
    }
  } else {
    Border {
      width: style.width_separator,
      color: style.color_separator
    }
  })
}

/// Computes the complete visual state of a
/// cell. The result depends only on the
/// arguments, so rendering twice yields the
/// same output.
#[tracing::instrument(
  skip_all,
  fields(date = ?state.day.date)
)]
#[must_use]
pub fn render(
  state: &CellState,
  today: NaiveDate
) -> RenderOutput {
  let label_frame =
    date_label_frame(state.frame.size);
  let appearance = derive_appearance(
    &state.day,
    state.selection,
    &state.style,
    today,
    label_frame.width()
  );
  let rows = layout_rows(
    &state.events,
    state.frame.size,
    label_frame,
    &state.style,
    TITLES_COUNT
  );

  let output = RenderOutput {
    background: appearance
      .cell_background,
    border:     border_for(
      &state.day,
      &state.style
    ),
    state:      appearance.state,
    date_label: DateLabel {
      frame:           label_frame,
      text:            state
        .day
        .label
        .clone(),
      font:            state
        .style
        .font_name_date
        .clone(),
      alignment:       TextAlignment::Center,
      clips_to_bounds: true,
      style:           appearance.label
    },
    rows
  };

  debug!(
    events = state.events.len(),
    rows = output.rows.len(),
    overflow = output.overflow_row().is_some(),
    label_state = ?output.state,
    "rendered month cell"
  );
  output
}

/// A resolved tap, as handed to the
/// delegate.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
)]
#[serde(
  tag = "kind",
  rename_all = "lowercase"
)]
pub enum CellSelection {
  Event {
    event: Event,
    frame: Rect
  },
  More {
    date:  NaiveDateTime,
    frame: Rect
  }
}

/// Receives the cell's outbound
/// notifications. The host passes it in
/// per tap; the cell never keeps it.
pub trait CellDelegate {
  fn did_select_event(
    &mut self,
    event: &Event,
    frame: Rect
  );

  fn did_select_more(
    &mut self,
    date: NaiveDateTime,
    frame: Rect
  );
}

impl CellDelegate for Vec<CellSelection> {
  fn did_select_event(
    &mut self,
    event: &Event,
    frame: Rect
  ) {
    self.push(CellSelection::Event {
      event: event.clone(),
      frame
    });
  }

  fn did_select_more(
    &mut self,
    date: NaiveDateTime,
    frame: Rect
  ) {
    self.push(CellSelection::More {
      date,
      frame
    });
  }
}

/// Matches a row's tap target against the
/// current events; the first match wins and
/// a miss yields nothing.
#[must_use]
pub fn resolve_tap(
  events: &[Event],
  row: &Row
) -> Option<CellSelection> {
  match &row.target {
    | TapTarget::Event(id) => events
      .iter()
      .find(|event| &event.id == id)
      .map(|event| {
        CellSelection::Event {
          event: event.clone(),
          frame: row.frame
        }
      }),
    | TapTarget::More(start) => events
      .iter()
      .find(|event| &event.start == start)
      .map(|event| CellSelection::More {
        date:  event.start,
        frame: row.frame
      })
  }
}

/// A reusable month-grid cell. Every setter
/// re-renders synchronously.
#[derive(Debug)]
pub struct MonthCell<C = SystemClock> {
  state:  CellState,
  clock:  C,
  output: RenderOutput
}

impl<C: Clock> MonthCell<C> {
  /// Reuse-pool key for hosts that recycle
  /// cells.
  pub const IDENTIFIER: &'static str =
    "monthcell.MonthCell";

  pub fn with_clock(
    frame: Rect,
    clock: C
  ) -> Self {
    let state = CellState {
      frame,
      day: Day::empty(),
      events: Arc::from(Vec::new()),
      selection: clock.today(),
      style: MonthStyle::default()
    };
    let output =
      render(&state, clock.today());
    debug!(
      cell = Self::IDENTIFIER,
      width = frame.width(),
      height = frame.height(),
      "cell created"
    );
    Self {
      state,
      clock,
      output
    }
  }

  pub fn set_day(&mut self, day: Day) {
    self.state.day = day;
    self.refresh();
  }

  pub fn set_events(
    &mut self,
    events: impl Into<Arc<[Event]>>
  ) {
    self.state.events = events.into();
    self.refresh();
  }

  pub fn set_selection_date(
    &mut self,
    selection: NaiveDate
  ) {
    self.state.selection = selection;
    self.refresh();
  }

  pub fn set_style(
    &mut self,
    style: MonthStyle
  ) {
    self.state.style = style;
    self.refresh();
  }

  /// Drops the previous occupant's day and
  /// events before the host assigns new
  /// ones.
  pub fn prepare_for_reuse(&mut self) {
    self.state.day = Day::empty();
    self.state.events =
      Arc::from(Vec::new());
    self.refresh();
  }

  #[must_use]
  pub fn day(&self) -> &Day {
    &self.state.day
  }

  #[must_use]
  pub fn events(&self) -> &[Event] {
    &self.state.events
  }

  #[must_use]
  pub fn output(&self) -> &RenderOutput {
    &self.output
  }

  /// Routes a tap on `row` to the delegate.
  /// Returns whether a notification was
  /// sent.
  #[tracing::instrument(skip(
    self, delegate
  ))]
  pub fn handle_tap(
    &self,
    row: RowId,
    delegate: &mut dyn CellDelegate
  ) -> bool {
    let Some(row) = self.output.row(row)
    else {
      debug!("tap on unknown row ignored");
      return false;
    };
    self.dispatch(row, delegate)
  }

  pub fn handle_tap_at(
    &self,
    point: Point,
    delegate: &mut dyn CellDelegate
  ) -> bool {
    match self.output.hit_test(point) {
      | Some(row) => {
        self.dispatch(row, delegate)
      }
      | None => false
    }
  }

  fn dispatch(
    &self,
    row: &Row,
    delegate: &mut dyn CellDelegate
  ) -> bool {
    match resolve_tap(
      &self.state.events,
      row
    ) {
      | Some(CellSelection::Event {
        event,
        frame
      }) => {
        debug!(event = %event.id, "event selected");
        delegate
          .did_select_event(&event, frame);
        true
      }
      | Some(CellSelection::More {
        date,
        frame
      }) => {
        debug!(%date, "more selected");
        delegate.did_select_more(date, frame);
        true
      }
      | None => {
        debug!(
          row = row.id.0,
          "tap target matched no event"
        );
        false
      }
    }
  }

  fn refresh(&mut self) {
    self.output = render(
      &self.state,
      self.clock.today()
    );
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::{
    CellSelection,
    MonthCell,
    date_label_frame
  };
  use crate::clock::FixedClock;
  use crate::color::Color;
  use crate::day::Day;
  use crate::event::Event;
  use crate::geometry::{
    Point,
    Rect,
    Size
  };
  use crate::layout::RowId;
  use crate::style::MonthStyle;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19)
      .expect("valid date")
  }

  fn cell() -> MonthCell<FixedClock> {
    MonthCell::with_clock(
      Rect::new(0.0, 0.0, 100.0, 120.0),
      FixedClock(today())
    )
  }

  fn events(
    prefix: &str,
    count: usize
  ) -> Vec<Event> {
    (0..count)
      .map(|idx| {
        let start = today()
          .and_hms_opt(9 + idx as u32, 0, 0)
          .expect("valid time");
        Event::new(
          format!("{prefix}{}", idx + 1),
          start,
          format!("{prefix} {}", idx + 1),
          Color::RED
        )
      })
      .collect()
  }

  #[test]
  fn label_sits_in_top_right_corner() {
    assert_eq!(
      date_label_frame(Size::new(
        100.0, 120.0
      )),
      Rect::new(60.0, 5.0, 35.0, 35.0)
    );
  }

  #[test]
  fn reassigning_events_replaces_rows() {
    let mut cell = cell();
    cell.set_events(events("a", 5));
    assert_eq!(cell.output().rows.len(), 4);

    cell.set_events(events("b", 2));
    let rows = &cell.output().rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].plain_text(), "• b 1");
    assert!(cell.output().overflow_row().is_none());
  }

  #[test]
  fn overflow_tap_emits_first_hidden_start() {
    let mut cell = cell();
    let list = events("e", 5);
    cell.set_events(list.clone());

    let mut sink: Vec<CellSelection> =
      Vec::new();
    assert!(cell.handle_tap(RowId(3), &mut sink));
    match &sink[..] {
      | [CellSelection::More { date, frame }] => {
        assert_eq!(*date, list[3].start);
        assert_eq!(
          *frame,
          cell.output().rows[3].frame
        );
      }
      | other => {
        panic!("unexpected selections {other:?}")
      }
    }
  }

  #[test]
  fn event_tap_by_point() {
    let mut cell = cell();
    let list = events("e", 2);
    cell.set_events(list.clone());

    let mut sink: Vec<CellSelection> =
      Vec::new();
    assert!(cell.handle_tap_at(
      Point::new(50.0, 65.0),
      &mut sink
    ));
    match &sink[..] {
      | [CellSelection::Event { event, .. }] => {
        assert_eq!(event, &list[1]);
      }
      | other => {
        panic!("unexpected selections {other:?}")
      }
    }

    assert!(!cell.handle_tap_at(
      Point::new(50.0, 10.0),
      &mut sink
    ));
    assert!(!cell.handle_tap(RowId(7), &mut sink));
    assert_eq!(sink.len(), 1);
  }

  #[test]
  fn separator_follows_day_type() {
    let mut cell = cell();
    let border = cell
      .output()
      .border
      .expect("border");
    assert_eq!(border.width, 0.0);

    cell.set_day(Day::from_date(today()));
    let border = cell
      .output()
      .border
      .expect("border");
    assert_eq!(border.width, 0.7);

    cell.set_style(MonthStyle {
      is_hidden_separator: true,
      ..MonthStyle::default()
    });
    assert!(cell.output().border.is_none());
  }

  #[test]
  fn reuse_clears_previous_occupant() {
    let mut cell = cell();
    cell.set_day(Day::from_date(today()));
    cell.set_events(events("e", 3));
    cell.prepare_for_reuse();

    assert!(cell.day().is_empty());
    assert!(cell.events().is_empty());
    assert!(cell.output().rows.is_empty());
    assert!(cell.output().date_label.text.is_empty());
  }

  #[test]
  fn rendering_is_idempotent() {
    let mut cell = cell();
    cell.set_day(Day::from_date(today()));
    cell.set_events(events("e", 4));
    let first = cell.output().clone();
    cell.set_selection_date(today());
    assert_eq!(cell.output(), &first);
  }
}
