//! Drag handles for the two frame knots.
//!
//! Handles live in canonical (left, unrotated) coordinates, so they line up
//! with the left frame only while it is at rest.

use crate::{
    foundation::{
        core::{Cursor, Point, PointerState, Rgb8},
        error::{FaceError, FaceResult},
        math::distance,
    },
    geometry::{
        eye_frame::FrameSolution,
        knot::{Knot, KnotId},
    },
    render::plan::DrawOp,
};

pub const MARKER_FILL: Rgb8 = Rgb8::new(30, 30, 220);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enabled: bool,
    /// Pointer must be strictly closer than this to grab a knot.
    pub grab_radius: f64,
    pub marker_diameter: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grab_radius: 15.0,
            marker_diameter: 7.0,
        }
    }
}

impl ControlsConfig {
    pub fn validate(&self) -> FaceResult<()> {
        if !self.grab_radius.is_finite() || self.grab_radius <= 0.0 {
            return Err(FaceError::validation("grab_radius must be > 0"));
        }
        if !self.marker_diameter.is_finite() || self.marker_diameter < 0.0 {
            return Err(FaceError::validation("marker_diameter must be >= 0"));
        }
        Ok(())
    }
}

/// A knot's replacement value, applied after the frame it was computed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnotEdit {
    pub id: KnotId,
    pub knot: Knot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayOutcome {
    pub ops: Vec<DrawOp>,
    pub cursor: Cursor,
    pub edit: Option<KnotEdit>,
}

/// The knot under `pointer`, outer knot first when both are in reach.
pub fn hit_test(cfg: &ControlsConfig, sol: &FrameSolution, pointer: Point) -> Option<KnotId> {
    KnotId::ALL
        .into_iter()
        .find(|id| distance(pointer, sol.knot_point(*id)) < cfg.grab_radius)
}

pub fn run_overlay(
    cfg: &ControlsConfig,
    sol: &FrameSolution,
    pointer: PointerState,
) -> OverlayOutcome {
    let ops = KnotId::ALL
        .iter()
        .map(|id| DrawOp::Ellipse {
            center: sol.knot_point(*id),
            width: cfg.marker_diameter,
            height: cfg.marker_diameter,
            fill: MARKER_FILL,
        })
        .collect();

    let Some(pos) = pointer.position else {
        return OverlayOutcome {
            ops,
            cursor: Cursor::Arrow,
            edit: None,
        };
    };

    let grabbed = hit_test(cfg, sol, pos);
    let cursor = if grabbed.is_some() {
        Cursor::Hand
    } else {
        Cursor::Arrow
    };

    let edit = match grabbed {
        Some(id) if pointer.pressed => {
            let anchor = sol.anchors.anchor_for(id);
            match Knot::from_point(anchor, pos, sol.frame_dim) {
                Some(knot) => {
                    tracing::debug!(?id, angle = knot.angle, length = knot.length, "knot dragged");
                    Some(KnotEdit { id, knot })
                }
                None => {
                    tracing::debug!(?id, "pointer on knot anchor; edit ignored");
                    None
                }
            }
        }
        _ => None,
    };

    OverlayOutcome { ops, cursor, edit }
}
