use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::Point;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Rect {
    pub fn try_new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, GeometryError> {
        let finite = [x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite());
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(GeometryError::InvalidRect {
                x_min,
                y_min,
                x_max,
                y_max,
            });
        }
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle with its min corner at `(x, y)` and the given dimensions.
    pub fn from_min_corner(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        Rect::try_new(x, y, x + width, y + height)
    }

    /// Returns a new rectangle with the same centroid, grown by `d` on every side.
    /// Returns `None` if a negative `d` would collapse the rectangle.
    pub fn inflate(mut self, d: f64) -> Option<Self> {
        self.x_min -= d;
        self.y_min -= d;
        self.x_max += d;
        self.y_max += d;

        if self.x_min < self.x_max && self.y_min < self.y_max {
            Some(self)
        } else {
            None
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl Shape for Rect {
    fn centroid(&self) -> Point {
        Point((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }

    fn area(&self) -> f64 {
        self.width() * self.height()
    }

    fn bbox(&self) -> Rect {
        *self
    }
}
