use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Default,
  Serialize,
  Deserialize,
)]
pub struct Point {
  pub x: f64,
  pub y: f64
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Default,
  Serialize,
  Deserialize,
)]
pub struct Size {
  pub width:  f64,
  pub height: f64
}

/// Axis-aligned rectangle in cell-local
/// coordinates, origin at the top-left.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Default,
  Serialize,
  Deserialize,
)]
pub struct Rect {
  pub origin: Point,
  pub size:   Size
}

impl Point {
  #[must_use]
  pub const fn new(
    x: f64,
    y: f64
  ) -> Self {
    Self { x, y }
  }
}

impl Size {
  #[must_use]
  pub const fn new(
    width: f64,
    height: f64
  ) -> Self {
    Self { width, height }
  }
}

impl Rect {
  #[must_use]
  pub const fn new(
    x: f64,
    y: f64,
    width: f64,
    height: f64
  ) -> Self {
    Self {
      origin: Point::new(x, y),
      size:   Size::new(width, height)
    }
  }

  #[must_use]
  pub fn width(&self) -> f64 {
    self.size.width
  }

  #[must_use]
  pub fn height(&self) -> f64 {
    self.size.height
  }

  #[must_use]
  pub fn max_x(&self) -> f64 {
    self.origin.x + self.size.width
  }

  #[must_use]
  pub fn max_y(&self) -> f64 {
    self.origin.y + self.size.height
  }

  /// Half-open containment: the right and
  /// bottom edges belong to the neighbour.
  #[must_use]
  pub fn contains(
    &self,
    point: Point
  ) -> bool {
    point.x >= self.origin.x
      && point.x < self.max_x()
      && point.y >= self.origin.y
      && point.y < self.max_y()
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Point,
    Rect
  };

  #[test]
  fn containment_is_half_open() {
    let rect =
      Rect::new(5.0, 40.0, 90.0, 20.0);
    assert!(
      rect.contains(Point::new(5.0, 40.0))
    );
    assert!(
      rect.contains(Point::new(94.9, 59.9))
    );
    assert!(
      !rect.contains(Point::new(95.0, 50.0))
    );
    assert!(
      !rect.contains(Point::new(50.0, 60.0))
    );
  }
}
