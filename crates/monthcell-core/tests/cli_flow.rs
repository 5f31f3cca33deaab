use std::fs;
use std::path::Path;

use clap::Parser;
use monthcell_core::cli::GlobalCli;
use monthcell_core::render_cli;
use tempfile::tempdir;

const EVENTS: &str = r##"[
  {"id": "e1", "start": "2026-10-20T08:00:00", "title": "Standup", "color": "red"},
  {"id": "e2", "start": "2026-10-20T09:00:00", "title": "Review", "color": "red"},
  {"id": "e3", "start": "2026-10-20T10:00:00", "title": "Lunch", "color": "red"},
  {"id": "e4", "start": "2026-10-20T11:00:00", "title": "Retro", "color": "red"},
  {"id": "e5", "start": "2026-10-20T12:00:00", "title": "Demo", "color": "red"}
]"##;

fn write_fixtures(dir: &Path) -> (String, String) {
  let style = dir.join("style.toml");
  let events = dir.join("events.json");
  fs::write(&style, "").expect("write style");
  fs::write(&events, EVENTS)
    .expect("write events");
  (
    style.display().to_string(),
    events.display().to_string()
  )
}

fn run_to_string(args: &[&str]) -> String {
  let cli = GlobalCli::parse_from(
    std::iter::once("monthcell")
      .chain(args.iter().copied())
  );
  let mut buf = Vec::new();
  render_cli(&cli, &mut buf)
    .expect("render cell");
  String::from_utf8(buf).expect("utf8")
}

#[test]
fn overflow_tap_prints_first_hidden_start() {
  let temp = tempdir().expect("tempdir");
  let (style, events) =
    write_fixtures(temp.path());

  let text = run_to_string(&[
    "--style",
    &style,
    "--events",
    &events,
    "--today",
    "2026-10-19",
    "--date",
    "2026-10-20",
    "--tap",
    "3",
  ]);

  assert!(text.contains("more 2"), "{text}");
  assert!(
    text.contains(
      "selected more for 2026-10-20 11:00 at"
    ),
    "{text}"
  );
}

#[test]
fn event_and_missed_taps() {
  let temp = tempdir().expect("tempdir");
  let (style, events) =
    write_fixtures(temp.path());
  let base = [
    "--style",
    style.as_str(),
    "--events",
    events.as_str(),
    "--today",
    "2026-10-19",
    "--date",
    "2026-10-20",
  ];

  let mut args = base.to_vec();
  args.extend(["--tap", "1"]);
  let text = run_to_string(&args);
  assert!(
    text.contains("selected event e2 (Review)"),
    "{text}"
  );

  let mut args = base.to_vec();
  args.extend(["--tap", "7"]);
  let text = run_to_string(&args);
  assert!(
    text.contains("tap on row 7: no selection"),
    "{text}"
  );
}

#[test]
fn json_output_lists_rows() {
  let temp = tempdir().expect("tempdir");
  let (style, events) =
    write_fixtures(temp.path());

  let text = run_to_string(&[
    "--style",
    &style,
    "--events",
    &events,
    "--today",
    "2026-10-19",
    "--date",
    "2026-10-20",
    "--json",
  ]);

  let value: serde_json::Value =
    serde_json::from_str(&text)
      .expect("valid json");
  let rows = value["rows"]
    .as_array()
    .expect("rows array");
  assert_eq!(rows.len(), 4);
  assert_eq!(value["date_label"]["text"], "20");
}
