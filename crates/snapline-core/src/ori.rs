//! Alignment orientations and their axis groups.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Axis group an orientation belongs to.
///
/// Named after the guide line that is drawn, not the extent that is compared:
/// a [`Axis::Horizontal`] guide is a horizontal line placed at a `top` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    /// Compared along the vertical extent (`top`/`bottom`).
    Horizontal,
    /// Compared along the horizontal extent (`left`/`right`).
    Vertical,
}

impl Axis {
    /// Orientations of this group, in comparison order.
    pub fn oris(self) -> &'static [Ori; 3] {
        match self {
            Axis::Horizontal => &XORIS,
            Axis::Vertical => &YORIS,
        }
    }

    /// Near and far edge of `rect` along the compared extent.
    pub fn extent(self, rect: Rect) -> (f64, f64) {
        match self {
            Axis::Horizontal => (rect.y0, rect.y1),
            Axis::Vertical => (rect.x0, rect.x1),
        }
    }

    /// Coordinate of the rectangle's top-left corner along the compared extent.
    pub fn origin(self, rect: Rect) -> f64 {
        self.extent(rect).0
    }
}

/// One of the six alignment orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ori {
    Top,
    XCenter,
    Bottom,
    Left,
    YCenter,
    Right,
}

/// Horizontal guide orientations. The `x` prefix is historical: these govern
/// the top/bottom screen axis.
pub const XORIS: [Ori; 3] = [Ori::Bottom, Ori::XCenter, Ori::Top];

/// Vertical guide orientations, governing the left/right screen axis.
pub const YORIS: [Ori; 3] = [Ori::Left, Ori::YCenter, Ori::Right];

/// Axis groups in the order they are evaluated.
pub const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

impl Ori {
    /// All orientations, horizontal group first.
    pub const ALL: [Ori; 6] = [
        Ori::Top,
        Ori::XCenter,
        Ori::Bottom,
        Ori::Left,
        Ori::YCenter,
        Ori::Right,
    ];

    /// The axis group this orientation belongs to.
    pub fn axis(self) -> Axis {
        match self {
            Ori::Top | Ori::XCenter | Ori::Bottom => Axis::Horizontal,
            Ori::Left | Ori::YCenter | Ori::Right => Axis::Vertical,
        }
    }

    /// Check if this is a center orientation.
    pub fn is_center(self) -> bool {
        matches!(self, Ori::XCenter | Ori::YCenter)
    }

    /// Screen coordinate of this orientation's line on `rect`.
    pub fn line_pos(self, rect: Rect) -> f64 {
        match self {
            Ori::Top => rect.y0,
            Ori::Bottom => rect.y1,
            Ori::Left => rect.x0,
            Ori::Right => rect.x1,
            Ori::XCenter | Ori::YCenter => {
                let (near, far) = self.axis().extent(rect);
                center(near, far)
            }
        }
    }

    /// Distance from the rectangle's anchor (top-left) to this orientation's line.
    pub fn anchor_offset(self, rect: Rect) -> f64 {
        match self {
            Ori::Top | Ori::Left => 0.0,
            Ori::XCenter => rect.height() / 2.0,
            Ori::Bottom => rect.height(),
            Ori::YCenter => rect.width() / 2.0,
            Ori::Right => rect.width(),
        }
    }
}

fn center(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}
