use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{
  ArgAction,
  Parser
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
  name = "monthcell",
  version,
  about = "Render one month-grid calendar cell"
)]
pub struct GlobalCli {
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count
  )]
  pub verbose: u8,

  #[arg(
    short = 'q',
    long = "quiet",
    action = ArgAction::Count
  )]
  pub quiet:   u8,

  /// JSON array of events shown in the
  /// cell.
  #[arg(long = "events")]
  pub events: Option<PathBuf>,

  /// TOML style file; falls back to
  /// $MONTHCELL_STYLE, then
  /// <config dir>/monthcell/style.toml.
  #[arg(long = "style")]
  pub style: Option<PathBuf>,

  /// Day of the cell (YYYY-MM-DD); an
  /// empty cell when omitted.
  #[arg(long = "date")]
  pub date: Option<String>,

  /// Selected day (YYYY-MM-DD); defaults
  /// to today.
  #[arg(long = "selected")]
  pub selected: Option<String>,

  /// Overrides today's date (YYYY-MM-DD).
  #[arg(long = "today")]
  pub today: Option<String>,

  #[arg(
    long = "width",
    default_value_t = 100.0
  )]
  pub width:  f64,
  #[arg(
    long = "height",
    default_value_t = 120.0
  )]
  pub height: f64,

  /// Text preview width in terminal
  /// columns.
  #[arg(
    long = "columns",
    default_value_t = 24
  )]
  pub columns: usize,

  /// Route a tap on the given row and
  /// print the notification.
  #[arg(long = "tap")]
  pub tap: Option<usize>,

  /// Print the render output as JSON.
  #[arg(long = "json")]
  pub json: bool
}

/// Quiet wins over verbose; no flags
/// log warnings only.
pub fn level_for(
  verbose: u8,
  quiet: u8
) -> &'static str {
  match (quiet, verbose) {
    | (2.., _) => "error",
    | (1, _) | (0, 0) => "warn",
    | (0, 1) => "info",
    | (0, 2) => "debug",
    | (0, _) => "trace"
  }
}

/// Logs go to stderr so the preview and
/// JSON on stdout stay machine-readable.
pub fn init_tracing(
  verbose: u8,
  quiet: u8
) -> anyhow::Result<()> {
  let level = level_for(verbose, quiet);
  let filter =
    match EnvFilter::try_from_default_env()
    {
      | Ok(filter) => filter,
      | Err(_) => {
        EnvFilter::try_new(level).map_err(
          |e| anyhow!("invalid log filter {level}: {e}")
        )?
      }
    };

  let stderr = std::io::stderr();
  if let Err(err) =
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .with_ansi(stderr.is_terminal())
      .with_target(verbose >= 2)
      .try_init()
  {
    debug!(
      error = %err,
      "subscriber already installed"
    );
  }

  Ok(())
}
