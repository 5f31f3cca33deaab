use std::io::Write;

use unicode_width::{
  UnicodeWidthChar,
  UnicodeWidthStr
};

use crate::cell::RenderOutput;
use crate::label_state::LabelState;
use crate::layout::SLOTS_PER_CELL;

/// Draws a render output as a text box,
/// `columns` cells wide inside the border.
/// The date label sits on the first line,
/// followed by the fixed row slots. The top
/// and bottom edges are blank when the cell
/// has no visible separator.
pub fn write_preview<W: Write>(
  mut writer: W,
  output: &RenderOutput,
  columns: usize
) -> anyhow::Result<()> {
  let edge = if separator_visible(output) {
    "-"
  } else {
    " "
  };
  let border =
    format!("+{}+", edge.repeat(columns));
  writeln!(writer, "{border}")?;

  let label = decorate_label(
    &output.date_label.text,
    output.state
  );
  writeln!(
    writer,
    "|{}|",
    align_right(
      &truncate_middle(&label, columns),
      columns
    )
  )?;

  let slots = SLOTS_PER_CELL as usize;
  for idx in 0..slots {
    let text = output
      .rows
      .get(idx)
      .map(|row| row.plain_text())
      .unwrap_or_default();
    writeln!(
      writer,
      "|{}|",
      center(
        &truncate_middle(&text, columns),
        columns
      )
    )?;
  }

  writeln!(writer, "{border}")?;
  Ok(())
}

fn separator_visible(
  output: &RenderOutput
) -> bool {
  output.border.as_ref().is_some_and(
    |border| {
      border.width > 0.0
        && !border.color.is_clear()
    }
  )
}

fn decorate_label(
  text: &str,
  state: LabelState
) -> String {
  if text.is_empty() {
    return String::new();
  }
  match state {
    | LabelState::Today => {
      format!("({text})")
    }
    | LabelState::SelectedOtherDay => {
      format!("[{text}]")
    }
    | LabelState::TodayDeselected => {
      format!("*{text}*")
    }
    | LabelState::PlainWeekday
    | LabelState::Weekend => {
      text.to_string()
    }
  }
}

/// Shortens `text` to at most `max_width`
/// display columns by replacing its middle
/// with an ellipsis.
#[must_use]
pub fn truncate_middle(
  text: &str,
  max_width: usize
) -> String {
  if UnicodeWidthStr::width(text)
    <= max_width
  {
    return text.to_string();
  }
  if max_width == 0 {
    return String::new();
  }

  let budget = max_width - 1;
  let head_budget = budget.div_ceil(2);
  let tail_budget = budget - head_budget;

  let head = take_width(
    text.chars(),
    head_budget
  );
  let mut tail = take_width(
    text.chars().rev(),
    tail_budget
  );
  tail.reverse();

  let head: String =
    head.into_iter().collect();
  let tail: String =
    tail.into_iter().collect();
  format!("{head}…{tail}")
}

fn take_width(
  chars: impl Iterator<Item = char>,
  budget: usize
) -> Vec<char> {
  let mut used = 0;
  let mut out = Vec::new();
  for ch in chars {
    let width =
      UnicodeWidthChar::width(ch)
        .unwrap_or(0);
    if used + width > budget {
      break;
    }
    used += width;
    out.push(ch);
  }
  out
}

fn center(
  text: &str,
  width: usize
) -> String {
  let padding = width.saturating_sub(
    UnicodeWidthStr::width(text)
  );
  let left = padding / 2;
  format!(
    "{}{}{}",
    " ".repeat(left),
    text,
    " ".repeat(padding - left)
  )
}

fn align_right(
  text: &str,
  width: usize
) -> String {
  let padding = width.saturating_sub(
    UnicodeWidthStr::width(text)
  );
  format!("{}{}", " ".repeat(padding), text)
}
