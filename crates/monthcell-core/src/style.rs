use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::color::Color;

pub const STYLE_ENV_VAR: &str =
  "MONTHCELL_STYLE";
const STYLE_CONFIG_FILE: &str =
  "monthcell/style.toml";
const DEFAULT_MORE_TITLE: &str = "more";
const DEFAULT_DATE_FONT_SIZE: f64 = 16.0;
const DEFAULT_EVENT_FONT_SIZE: f64 =
  14.0;

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct Font {
  #[serde(default = "default_font_name")]
  pub name: String,
  /// Zero or absent falls back to the
  /// default size of the font's role.
  #[serde(default)]
  pub size: f64,
  #[serde(default)]
  pub bold: bool
}

impl Font {
  #[must_use]
  pub fn system(size: f64) -> Self {
    Self {
      name: default_font_name(),
      size,
      bold: false
    }
  }

  #[must_use]
  pub fn bold_system(
    size: f64
  ) -> Self {
    Self {
      bold: true,
      ..Self::system(size)
    }
  }
}

fn default_font_name() -> String {
  "system".to_string()
}

/// Fonts, colours and flags of a month
/// cell. Every field has a default, so a
/// style file only lists what it changes.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct MonthStyle {
  pub font_name_date:                Font,
  pub font_event_title:              Font,
  pub color_date:                    Color,
  pub color_weekend_date:            Color,
  pub color_current_date:            Color,
  pub color_background_current_date: Color,
  pub color_select_date:             Color,
  pub color_background_select_date:  Color,
  pub color_background_date:         Color,
  pub color_background_weekend_date: Color,
  pub color_event_title:             Color,
  pub more_title:                    String,
  pub color_more_title:              Color,
  pub is_hidden_separator:           bool,
  pub width_separator:               f64,
  pub color_separator:               Color
}

impl Default for MonthStyle {
  fn default() -> Self {
    Self {
      font_name_date: Font::bold_system(
        DEFAULT_DATE_FONT_SIZE
      ),
      font_event_title: Font::system(
        DEFAULT_EVENT_FONT_SIZE
      ),
      color_date: Color::BLACK,
      color_weekend_date: Color::GRAY,
      color_current_date: Color::WHITE,
      color_background_current_date:
        Color::RED,
      color_select_date: Color::WHITE,
      color_background_select_date:
        Color::BLACK,
      color_background_date: Color::WHITE,
      color_background_weekend_date:
        Color::rgb(242, 242, 242),
      color_event_title: Color::BLACK,
      more_title: DEFAULT_MORE_TITLE
        .to_string(),
      color_more_title: Color::GRAY,
      is_hidden_separator: false,
      width_separator: 0.7,
      color_separator: Color::rgb(
        161, 166, 173
      )
    }
  }
}

impl MonthStyle {
  /// Resolves the style source in order:
  /// explicit path, `MONTHCELL_STYLE`,
  /// `<config dir>/monthcell/style.toml`,
  /// built-in defaults.
  #[tracing::instrument(skip(
    style_override
  ))]
  pub fn load(
    style_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let env_value =
      std::env::var(STYLE_ENV_VAR).ok();
    let config_dir = dirs::config_dir();
    match resolve_style_path(
      style_override,
      env_value.as_deref(),
      config_dir.as_deref()
    ) {
      | Some(path) => {
        info!(style = %path.display(), "loading month style");
        Self::load_file(&path)
      }
      | None => {
        debug!(
          "no style file found; using \
           defaults"
        );
        Ok(Self::default())
      }
    }
  }

  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut style =
      toml::from_str::<MonthStyle>(raw)
        .context(
          "failed to parse month style"
        )?;
    style.sanitize();
    Ok(style)
  }

  fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let raw = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    Self::from_toml_str(&raw)
      .with_context(|| {
        format!(
          "invalid style file {}",
          path.display()
        )
      })
  }

  /// Replaces values a renderer cannot use
  /// with the defaults.
  pub fn sanitize(&mut self) {
    if self.more_title.trim().is_empty()
    {
      warn!(
        "empty more title; using \
         default"
      );
      self.more_title =
        DEFAULT_MORE_TITLE.to_string();
    }

    if !self.width_separator.is_finite()
      || self.width_separator < 0.0
    {
      warn!(
        width = self.width_separator,
        "invalid separator width; \
         clamping to 0"
      );
      self.width_separator = 0.0;
    }

    sanitize_font(
      &mut self.font_name_date,
      DEFAULT_DATE_FONT_SIZE
    );
    sanitize_font(
      &mut self.font_event_title,
      DEFAULT_EVENT_FONT_SIZE
    );
  }
}

fn sanitize_font(
  font: &mut Font,
  fallback_size: f64
) {
  if font.size == 0.0 {
    font.size = fallback_size;
  } else if !font.size.is_finite()
    || font.size < 0.0
  {
    warn!(
      font = %font.name,
      size = font.size,
      "invalid font size; using default"
    );
    font.size = fallback_size;
  }
  if font.name.trim().is_empty() {
    font.name = default_font_name();
  }
}

/// An empty or `/dev/null` environment
/// value opts out of any style file.
fn resolve_style_path(
  override_path: Option<&Path>,
  env_value: Option<&str>,
  config_dir: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Some(raw) = env_value {
    let trimmed = raw.trim();
    if trimmed.is_empty()
      || trimmed == "/dev/null"
    {
      return None;
    }
    return Some(PathBuf::from(trimmed));
  }

  let candidate =
    config_dir?.join(STYLE_CONFIG_FILE);
  candidate.exists().then_some(candidate)
}
