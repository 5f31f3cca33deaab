pub mod cell;
pub mod cli;
pub mod clock;
pub mod color;
pub mod day;
pub mod event;
pub mod geometry;
pub mod label_state;
pub mod layout;
pub mod preview;
pub mod style;

use std::ffi::OsString;
use std::io::{
  self,
  Write
};

use clap::Parser;
use tracing::{
  debug,
  info
};

use crate::cell::{
  CellSelection,
  MonthCell
};
use crate::clock::{
  Clock,
  FixedClock,
  SystemClock,
  parse_date
};
use crate::day::Day;
use crate::geometry::Rect;
use crate::layout::RowId;
use crate::style::MonthStyle;

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting monthcell"
  );

  render_cli(&cli, io::stdout().lock())?;

  info!("done");
  Ok(())
}

/// Renders the cell described by `cli` to
/// `out`: the text preview (or JSON with
/// `--json`), then the outcome of `--tap`.
#[tracing::instrument(skip_all)]
pub fn render_cli<W: Write>(
  cli: &cli::GlobalCli,
  mut out: W
) -> anyhow::Result<()> {
  let style =
    MonthStyle::load(cli.style.as_deref())?;
  let events = match cli.events.as_deref() {
    | Some(path) => {
      event::load_events(path)?
    }
    | None => vec![]
  };

  let today = match cli.today.as_deref() {
    | Some(raw) => parse_date(raw)?,
    | None => SystemClock.today()
  };
  let selected =
    match cli.selected.as_deref() {
      | Some(raw) => parse_date(raw)?,
      | None => today
    };
  let day = match cli.date.as_deref() {
    | Some(raw) => {
      Day::from_date(parse_date(raw)?)
    }
    | None => Day::empty()
  };
  debug!(?day, %selected, %today, "resolved cell inputs");

  let mut cell = MonthCell::with_clock(
    Rect::new(
      0.0, 0.0, cli.width, cli.height
    ),
    FixedClock(today)
  );
  cell.set_style(style);
  cell.set_day(day);
  cell.set_events(events);
  cell.set_selection_date(selected);

  if cli.json {
    serde_json::to_writer_pretty(
      &mut out,
      cell.output()
    )?;
    writeln!(out)?;
  } else {
    preview::write_preview(
      &mut out,
      cell.output(),
      cli.columns
    )?;
  }

  if let Some(row) = cli.tap {
    let mut selections: Vec<
      CellSelection
    > = Vec::new();
    if cell
      .handle_tap(RowId(row), &mut selections)
    {
      for selection in &selections {
        write_selection(&mut out, selection)?;
      }
    } else {
      writeln!(
        out,
        "tap on row {row}: no selection"
      )?;
    }
  }

  Ok(())
}

fn write_selection<W: Write>(
  mut writer: W,
  selection: &CellSelection
) -> anyhow::Result<()> {
  match selection {
    | CellSelection::Event {
      event,
      frame
    } => {
      writeln!(
        writer,
        "selected event {} ({}) at \
         {:.1},{:.1}",
        event.id,
        event.text_for_month,
        frame.origin.x,
        frame.origin.y
      )?;
    }
    | CellSelection::More {
      date,
      frame
    } => {
      writeln!(
        writer,
        "selected more for {} at \
         {:.1},{:.1}",
        date.format("%Y-%m-%d %H:%M"),
        frame.origin.x,
        frame.origin.y
      )?;
    }
  }
  Ok(())
}
