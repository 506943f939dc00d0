//! Anchor geometry: where the menu goes relative to a host rectangle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::PickerError;

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Anchor rectangle in page coordinates, as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized rectangle at a point.
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Repair a host-supplied rectangle: non-finite origins become 0,
    /// negative or non-finite extents collapse to a point anchor.
    pub fn sanitized(&self) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        let extent = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self::new(
            finite_or_zero(self.x),
            finite_or_zero(self.y),
            extent(self.width),
            extent(self.height),
        )
    }

    /// Whether `p` lies inside, edges included.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x <= self.x + self.width && p.y <= self.y + self.height
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Which side of the anchor the menu opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Up,
    #[default]
    Down,
}

/// How the menu lines up with the anchor horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for Vertical {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(PickerError::Config(format!("unknown vertical placement `{other}`"))),
        }
    }
}

impl FromStr for Horizontal {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(PickerError::Config(format!("unknown horizontal placement `{other}`"))),
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

impl fmt::Display for Horizontal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        })
    }
}

/// Menu placement relative to its anchor rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Placement {
    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Top-left corner of a `menu_width` x `menu_height` menu anchored to
    /// `rect`. Degenerate rectangles anchor at their `(x, y)` point. The result
    /// never has negative coordinates.
    pub fn anchor(&self, rect: &Rect, menu_width: f64, menu_height: f64) -> Point {
        let rect = rect.sanitized();
        let rect = if rect.is_degenerate() {
            Rect::point(rect.x, rect.y)
        } else {
            rect
        };
        let gap = constants::ANCHOR_GAP;

        let y = match self.vertical {
            Vertical::Down => rect.y + rect.height + gap,
            Vertical::Up => rect.y - menu_height - gap,
        };
        let x = match self.horizontal {
            Horizontal::Left => rect.x,
            Horizontal::Center => rect.x + rect.width / 2.0 - menu_width / 2.0,
            Horizontal::Right => rect.x + rect.width - menu_width,
        };

        Point::new(x.max(0.0), y.max(0.0))
    }
}
