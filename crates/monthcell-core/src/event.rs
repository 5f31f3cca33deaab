use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

use crate::color::Color;

/// Identifier of a host-owned event. Tap
/// targets refer to events through it, so
/// it must be unique within one cell.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for EventId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for EventId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl From<String> for EventId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Event {
  pub id:             EventId,
  pub start:          NaiveDateTime,
  #[serde(alias = "title")]
  pub text_for_month: String,
  pub color:          Color
}

impl Event {
  pub fn new(
    id: impl Into<EventId>,
    start: NaiveDateTime,
    text_for_month: impl Into<String>,
    color: Color
  ) -> Self {
    Self {
      id: id.into(),
      start,
      text_for_month: text_for_month
        .into(),
      color
    }
  }
}

/// Reads a JSON array of events. Every
/// event must carry a colour.
#[tracing::instrument]
pub fn load_events(
  path: &Path
) -> anyhow::Result<Vec<Event>> {
  let raw = fs::read_to_string(path)
    .with_context(|| {
      format!(
        "failed to read {}",
        path.display()
      )
    })?;
  let events: Vec<Event> =
    serde_json::from_str(&raw)
      .with_context(|| {
        format!(
          "failed to parse events from \
           {}",
          path.display()
        )
      })?;
  debug!(
    count = events.len(),
    "loaded events"
  );
  Ok(events)
}
