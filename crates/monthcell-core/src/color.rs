use std::fmt;
use std::str::FromStr;

use anyhow::{
  Context,
  anyhow
};
use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer
};

/// An sRGB colour with straight alpha.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8
}

impl Color {
  pub const BLACK: Color =
    Color::rgb(0, 0, 0);
  pub const CLEAR: Color =
    Color::rgba(0, 0, 0, 0);
  pub const GRAY: Color =
    Color::rgb(128, 128, 128);
  pub const LIGHT_GRAY: Color =
    Color::rgb(170, 170, 170);
  pub const RED: Color =
    Color::rgb(255, 0, 0);
  pub const WHITE: Color =
    Color::rgb(255, 255, 255);

  #[must_use]
  pub const fn rgb(
    r: u8,
    g: u8,
    b: u8
  ) -> Self {
    Self {
      r,
      g,
      b,
      a: 255
    }
  }

  #[must_use]
  pub const fn rgba(
    r: u8,
    g: u8,
    b: u8,
    a: u8
  ) -> Self {
    Self {
      r,
      g,
      b,
      a
    }
  }

  #[must_use]
  pub fn is_clear(&self) -> bool {
    self.a == 0
  }

  #[must_use]
  pub fn to_hex(&self) -> String {
    if self.a == 255 {
      format!(
        "#{:02x}{:02x}{:02x}",
        self.r, self.g, self.b
      )
    } else {
      format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        self.r, self.g, self.b, self.a
      )
    }
  }
}

impl fmt::Display for Color {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl FromStr for Color {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let raw =
      s.trim().to_ascii_lowercase();
    match raw.as_str() {
      | "clear" | "transparent" => {
        return Ok(Color::CLEAR);
      }
      | "black" => {
        return Ok(Color::BLACK);
      }
      | "white" => {
        return Ok(Color::WHITE);
      }
      | "red" => return Ok(Color::RED),
      | "gray" | "grey" => {
        return Ok(Color::GRAY);
      }
      | "light-gray" | "light-grey" => {
        return Ok(Color::LIGHT_GRAY);
      }
      | _ => {}
    }

    let hex = raw
      .strip_prefix('#')
      .ok_or_else(|| {
        anyhow!(
          "invalid colour {s:?}: \
           expected a name or \
           #RRGGBB[AA]"
        )
      })?;
    if !hex.is_ascii()
      || (hex.len() != 6
        && hex.len() != 8)
    {
      return Err(anyhow!(
        "invalid colour {s:?}: \
         expected 6 or 8 hex digits"
      ));
    }

    let channel =
      |idx: usize| -> anyhow::Result<u8> {
        u8::from_str_radix(
          &hex[idx..idx + 2],
          16
        )
        .with_context(|| {
          format!(
            "invalid colour {s:?}"
          )
        })
      };

    let alpha = if hex.len() == 8 {
      channel(6)?
    } else {
      255
    };

    Ok(Color::rgba(
      channel(0)?,
      channel(2)?,
      channel(4)?,
      alpha
    ))
  }
}

impl Serialize for Color {
  fn serialize<S>(
    &self,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer
      .serialize_str(&self.to_hex())
  }
}

impl<'de> Deserialize<'de> for Color {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      String::deserialize(deserializer)?;
    raw.parse::<Color>().map_err(
      |err| {
        serde::de::Error::custom(
          format!("{err:#}")
        )
      }
    )
  }
}
