//! Bounding box representations.
//!
//! Detectors emit boxes in center form (`CenterBox`); suppression and
//! downstream consumers work in corner form (`CornerBox`). Both carry the
//! detector confidence unchanged. Coordinates are not validated: a box with
//! reversed corners is legal and simply has zero area.

use crate::util::math::{clamped_extent, half};

pub mod convert;

/// Box encoded as center coordinates plus width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterBox {
    /// Center x coordinate.
    pub x: f32,
    /// Center y coordinate.
    pub y: f32,
    /// Full box width.
    pub width: f32,
    /// Full box height.
    pub height: f32,
    /// Detector confidence, not clamped.
    pub confidence: f32,
}

impl CenterBox {
    /// Creates a center-form box.
    pub fn new(x: f32, y: f32, width: f32, height: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Converts to corner form. Corners are not re-ordered for negative sizes.
    pub fn to_corner(&self) -> CornerBox {
        let half_w = half(self.width);
        let half_h = half(self.height);
        CornerBox {
            x1: self.x - half_w,
            y1: self.y - half_h,
            x2: self.x + half_w,
            y2: self.y + half_h,
            confidence: self.confidence,
        }
    }
}

/// Box encoded as two opposite corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
    /// Detector confidence, not clamped.
    pub confidence: f32,
}

impl CornerBox {
    /// Creates a corner-form box.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
        }
    }

    /// Horizontal extent, zero for inverted boxes.
    pub fn width(&self) -> f32 {
        clamped_extent(self.x1, self.x2)
    }

    /// Vertical extent, zero for inverted boxes.
    pub fn height(&self) -> f32 {
        clamped_extent(self.y1, self.y2)
    }

    /// Box area with the clamp-to-zero rule applied per axis.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

impl From<CenterBox> for CornerBox {
    fn from(value: CenterBox) -> Self {
        value.to_corner()
    }
}
