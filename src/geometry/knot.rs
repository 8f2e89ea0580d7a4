use crate::foundation::{
    core::Point,
    math::{add, angle_between, difference, direction_deg, scale, squared_length},
};

/// Polar offset of a frame control point from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Knot {
    pub angle: f64,  // degrees
    pub length: f64, // fraction of the eye box's mean side
}

pub const DEFAULT_KNOTS: [Knot; 2] = [
    Knot {
        angle: 90.43,
        length: 0.78,
    },
    Knot {
        angle: 84.09,
        length: 0.91,
    },
];

/// Which of the two frame knots; indexes the `[Knot; 2]` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnotId {
    /// `k0`, hanging off the outer-bottom anchor `p3`.
    Outer,
    /// `k1`, hanging off the inner-top anchor `p1`.
    Inner,
}

impl KnotId {
    pub const ALL: [KnotId; 2] = [KnotId::Outer, KnotId::Inner];

    pub fn index(self) -> usize {
        match self {
            Self::Outer => 0,
            Self::Inner => 1,
        }
    }
}

impl Knot {
    pub fn place(self, anchor: Point, frame_dim: f64) -> Point {
        add(anchor, scale(direction_deg(self.angle), self.length * frame_dim))
    }

    /// Inverse of [`Knot::place`]. `None` when `point` sits on the anchor, where the
    /// angle is undefined.
    pub fn from_point(anchor: Point, point: Point, frame_dim: f64) -> Option<Self> {
        let radius = squared_length(difference(anchor, point)).sqrt();
        if !radius.is_finite() || radius <= 0.0 || !frame_dim.is_finite() || frame_dim <= 0.0 {
            return None;
        }
        Some(Self {
            angle: angle_between(anchor, point).to_degrees(),
            length: radius / frame_dim,
        })
    }

    pub fn is_finite(self) -> bool {
        self.angle.is_finite() && self.length.is_finite()
    }
}
