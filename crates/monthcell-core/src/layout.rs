use chrono::NaiveDateTime;
use serde::{
  Deserialize,
  Serialize
};
use tracing::trace;

use crate::color::Color;
use crate::event::{
  Event,
  EventId
};
use crate::geometry::{
  Rect,
  Size
};
use crate::style::{
  Font,
  MonthStyle
};

/// Equal row slots reserved below the date
/// label, whatever the event count.
pub const SLOTS_PER_CELL: f64 = 4.0;
/// Vertical gap above the date label and
/// side margin of every row.
pub const OFFSET: f64 = 5.0;
pub const BULLET: char = '•';
/// Event titles shown before the "more"
/// row takes over.
pub const TITLES_COUNT: usize = 3;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
pub struct RowId(pub usize);

/// What a tap on a row resolves against.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(
  tag = "kind",
  content = "key",
  rename_all = "lowercase"
)]
pub enum TapTarget {
  Event(EventId),
  /// Start of the first event that did not
  /// fit.
  More(NaiveDateTime)
}

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
pub enum TextAlignment {
  Center
}

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
pub enum LineBreak {
  TruncateMiddle
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct TextRun {
  pub text:  String,
  pub color: Color
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct ParagraphStyle {
  pub indentation:       f64,
  pub line_spacing:      f64,
  pub paragraph_spacing: f64
}

impl Default for ParagraphStyle {
  fn default() -> Self {
    Self {
      indentation:       10.0,
      line_spacing:      2.0,
      paragraph_spacing: 10.0
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(
  tag = "kind",
  rename_all = "lowercase"
)]
pub enum RowContent {
  Event {
    bullet:    TextRun,
    title:     TextRun,
    paragraph: ParagraphStyle
  },
  More {
    text: TextRun
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct Row {
  pub id:          RowId,
  pub frame:       Rect,
  pub font:        Font,
  pub alignment:   TextAlignment,
  pub line_break:  LineBreak,
  pub interactive: bool,
  pub content:     RowContent,
  pub target:      TapTarget
}

impl Row {
  #[must_use]
  pub fn is_overflow(&self) -> bool {
    matches!(
      self.content,
      RowContent::More { .. }
    )
  }

  /// Text as displayed, without
  /// attributes.
  #[must_use]
  pub fn plain_text(&self) -> String {
    match &self.content {
      | RowContent::Event {
        bullet,
        title,
        ..
      } => {
        format!(
          "{} {}",
          bullet.text, title.text
        )
      }
      | RowContent::More { text } => {
        text.text.clone()
      }
    }
  }
}

#[must_use]
pub fn row_height(
  cell_height: f64,
  label_height: f64
) -> f64 {
  ((cell_height - label_height - OFFSET)
    / SLOTS_PER_CELL)
    .max(0.0)
}

/// Lays out up to `titles_count` event rows
/// below the date label. The first event
/// past the limit becomes a single "more"
/// row and enumeration stops there.
#[must_use]
pub fn layout_rows(
  events: &[Event],
  cell: Size,
  label_frame: Rect,
  style: &MonthStyle,
  titles_count: usize
) -> Vec<Row> {
  let height = row_height(
    cell.height,
    label_frame.height()
  );
  let width =
    (cell.width - OFFSET * 2.0).max(0.0);
  let mut rows = Vec::with_capacity(
    events.len().min(titles_count + 1)
  );

  for (idx, event) in
    events.iter().enumerate()
  {
    let count = idx + 1;
    let frame = Rect::new(
      OFFSET,
      OFFSET
        + label_frame.height()
        + height * idx as f64,
      width,
      height
    );

    if count > titles_count {
      let hidden =
        events.len() - titles_count;
      let text = format!(
        "{} {}",
        style.more_title, hidden
      );
      trace!(row = idx, hidden, "overflow row");
      rows.push(Row {
        id: RowId(idx),
        frame,
        font: style
          .font_event_title
          .clone(),
        alignment: TextAlignment::Center,
        line_break:
          LineBreak::TruncateMiddle,
        interactive: true,
        content: RowContent::More {
          text: TextRun {
            text,
            color: style.color_more_title
          }
        },
        target: TapTarget::More(
          event.start
        )
      });
      break;
    }

    trace!(row = idx, event = %event.id, "event row");
    rows.push(Row {
      id: RowId(idx),
      frame,
      font: style
        .font_event_title
        .clone(),
      alignment: TextAlignment::Center,
      line_break:
        LineBreak::TruncateMiddle,
      interactive: true,
      content: RowContent::Event {
        bullet:    TextRun {
          text:  BULLET.to_string(),
          color: event.color
        },
        title:     TextRun {
          text:  event
            .text_for_month
            .clone(),
          color: style.color_event_title
        },
        paragraph: ParagraphStyle::default()
      },
      target: TapTarget::Event(
        event.id.clone()
      )
    });
  }

  rows
}
