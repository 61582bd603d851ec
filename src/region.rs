//! Geometry model: the selection rectangle, the image bounds it lives in,
//! and the placement operations on them.
//!
//! Everything in this module is pure value math on `Copy` types. Out-of-range
//! inputs are corrected by clamping, never rejected; the only legal
//! degenerate value is the zero-size rectangle that exists transiently while
//! a create gesture is in progress.

#[cfg(test)]
#[path = "region_test.rs"]
mod region_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_REGION_ORIGIN, DEFAULT_REGION_SIZE, MIN_REGION_SIZE};

/// A point in image-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the decoded image; the coordinate space a [`Region`]
/// lives in. Immutable for the lifetime of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Direction of a nudge, as sent by the host's arrow controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One cell of the 3×3 placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Nw,
    N,
    Ne,
    W,
    Center,
    E,
    Sw,
    S,
    Se,
}

impl GridCell {
    /// Map the host's 1-based cell index (1 = top-left, row-major,
    /// 9 = bottom-right). Out-of-range indices are `None`.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Nw),
            2 => Some(Self::N),
            3 => Some(Self::Ne),
            4 => Some(Self::W),
            5 => Some(Self::Center),
            6 => Some(Self::E),
            7 => Some(Self::Sw),
            8 => Some(Self::S),
            9 => Some(Self::Se),
            _ => None,
        }
    }

    /// Zero-based row in the grid (0 = top).
    #[must_use]
    pub fn row(self) -> u32 {
        match self {
            Self::Nw | Self::N | Self::Ne => 0,
            Self::W | Self::Center | Self::E => 1,
            Self::Sw | Self::S | Self::Se => 2,
        }
    }

    /// Zero-based column in the grid (0 = left).
    #[must_use]
    pub fn col(self) -> u32 {
        match self {
            Self::Nw | Self::W | Self::Sw => 0,
            Self::N | Self::Center | Self::S => 1,
            Self::Ne | Self::E | Self::Se => 2,
        }
    }
}

/// The rectangular selection, in image-space pixels.
///
/// This is the artifact handed to collaborators, so it serializes with
/// plain `x`/`y`/`width`/`height` keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The region seeded when a new image loads, before clamping.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(
            DEFAULT_REGION_ORIGIN,
            DEFAULT_REGION_ORIGIN,
            DEFAULT_REGION_SIZE,
            DEFAULT_REGION_SIZE,
        )
    }

    /// Normalize an arbitrary two-point drag into a rectangle with
    /// non-negative dimensions. Zero size is legal mid-gesture.
    #[must_use]
    pub fn from_points(p0: Point, p1: Point) -> Self {
        Self {
            x: p0.x.min(p1.x),
            y: p0.y.min(p1.y),
            width: (p1.x - p0.x).abs(),
            height: (p1.y - p0.y).abs(),
        }
    }

    /// Closed-interval body test; edges count as inside.
    #[must_use]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// True for the zero-size rectangle a cancelled create leaves behind.
    #[must_use]
    pub fn is_zero_size(self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }

    /// Constrain the region to lie fully inside `bounds`.
    ///
    /// Oversized dimensions are capped first so the origin clamp stays
    /// well-formed. Idempotent: clamping a clamped region is a no-op.
    #[must_use]
    pub fn clamp(self, bounds: Bounds) -> Self {
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        Self {
            x: self.x.clamp(0.0, bounds.width - width),
            y: self.y.clamp(0.0, bounds.height - height),
            width,
            height,
        }
    }

    /// Resize from the fixed origin: dimensions are floored at
    /// [`MIN_REGION_SIZE`], then capped so the region stays inside
    /// `bounds`. The cap wins when the two conflict.
    #[must_use]
    pub fn resize(self, new_width: f64, new_height: f64, bounds: Bounds) -> Self {
        Self {
            width: new_width.max(MIN_REGION_SIZE).min(bounds.width - self.x),
            height: new_height.max(MIN_REGION_SIZE).min(bounds.height - self.y),
            ..self
        }
    }

    /// Move the origin by `±step` along one axis, then clamp.
    #[must_use]
    pub fn nudge(self, direction: Direction, step: f64, bounds: Bounds) -> Self {
        let (dx, dy) = match direction {
            Direction::Up => (0.0, -step),
            Direction::Down => (0.0, step),
            Direction::Left => (-step, 0.0),
            Direction::Right => (step, 0.0),
        };
        self.drag_move(dx, dy, bounds)
    }

    /// Translate the origin by `(dx, dy)`, then clamp.
    #[must_use]
    pub fn drag_move(self, dx: f64, dy: f64, bounds: Bounds) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }.clamp(bounds)
    }

    /// Center the region's current size within one cell of a 3×3 division
    /// of the image, flooring the origin to whole pixels, then clamp.
    /// The size is unchanged by grid placement.
    #[must_use]
    pub fn grid_place(self, cell: GridCell, bounds: Bounds) -> Self {
        let cell_width = bounds.width / 3.0;
        let cell_height = bounds.height / 3.0;
        let x = f64::from(cell.col())
            .mul_add(cell_width, (cell_width - self.width) / 2.0)
            .floor();
        let y = f64::from(cell.row())
            .mul_add(cell_height, (cell_height - self.height) / 2.0)
            .floor();
        Self { x, y, ..self }.clamp(bounds)
    }

    /// Floor both dimensions at [`MIN_REGION_SIZE`] keeping the origin,
    /// then clamp. Applied when a gesture completes so a region is never
    /// left unusable.
    #[must_use]
    pub fn ensure_min_size(self, bounds: Bounds) -> Self {
        Self {
            width: self.width.max(MIN_REGION_SIZE),
            height: self.height.max(MIN_REGION_SIZE),
            ..self
        }
        .clamp(bounds)
    }
}
