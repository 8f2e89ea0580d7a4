use crate::{
    foundation::{
        core::{Canvas, Point, Rgb8},
        error::{FaceError, FaceResult},
        math::rotate_about,
    },
    render::plan::DrawOp,
};

const CORNEA_SHADOW_FILL: Rgb8 = Rgb8::new(104, 37, 97);
const CORNEA_FILL: Rgb8 = Rgb8::new(150, 95, 138);
const IRIS_FILL: Rgb8 = Rgb8::new(54, 18, 57);
const PUPIL_FILL: Rgb8 = Rgb8::new(220, 229, 202);
const REFLEX_FILL: Rgb8 = Rgb8::new(165, 161, 154);
const PUPIL_ELEVATION: f64 = 0.72;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EyeConfig {
    pub cornea_radius: f64,
    /// Distance between the two eye centers at rest.
    pub separation: f64,
    pub elevation: f64,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            cornea_radius: 50.0,
            separation: 225.0,
            elevation: 0.71,
        }
    }
}

impl EyeConfig {
    pub fn validate(&self) -> FaceResult<()> {
        if ![self.cornea_radius, self.separation, self.elevation]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(FaceError::validation("eye values must be finite"));
        }
        if self.cornea_radius <= 0.0 {
            return Err(FaceError::validation("cornea_radius must be > 0"));
        }
        Ok(())
    }

    /// Rest position of the left eye.
    pub fn base_position(&self, canvas: Canvas) -> Point {
        Point::new(
            canvas.center_x() - self.separation / 2.0,
            canvas.elevation_y(self.elevation),
        )
    }
}

/// Eye slots in drawing order. Slot 0 is mirrored onto the canvas' right half.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeSlots {
    /// Un-mirrored (left-half) eye centers.
    pub positions: [Point; 2],
}

/// Swings the rest position about `pivot` once per slot.
///
/// Slot `j` reads the frame rotation of index `1 - j` and turns by its
/// negation. Because slot 0 is later mirrored onto the right half, this pairs
/// each eye with the frame drawn on the same side of the canvas.
pub fn eye_slots(cfg: &EyeConfig, canvas: Canvas, pivot: Point, rotation: [f64; 2]) -> EyeSlots {
    let base = cfg.base_position(canvas);
    let [left, right] = rotation;
    EyeSlots {
        positions: [right, left].map(|rot| rotate_about(base, pivot, -rot)),
    }
}

/// Per-slot pupil and reflex placement, as fractions of the iris radius.
struct Highlights {
    pupil_offset: f64,
    pupil_diameter: f64,
    reflex_offset: f64,
    reflex_diameter: f64,
    reflex_elevation: f64,
}

const HIGHLIGHTS: [Highlights; 2] = [
    Highlights {
        pupil_offset: 0.15,
        pupil_diameter: 26.0,
        reflex_offset: 0.55,
        reflex_diameter: 14.0,
        reflex_elevation: 0.5,
    },
    Highlights {
        pupil_offset: 0.1,
        pupil_diameter: 24.0,
        reflex_offset: 0.4,
        reflex_diameter: 12.0,
        reflex_elevation: 0.575,
    },
];

/// Screen-space center of each slot's iris.
pub fn eye_centers(slots: &EyeSlots, canvas: Canvas) -> [Point; 2] {
    let cx = canvas.center_x();
    [(0, -1.0), (1, 1.0)].map(|(slot, dir): (usize, f64)| {
        let p = slots.positions[slot];
        Point::new(cx + dir * (p.x - cx), p.y)
    })
}

/// Cornea, iris, pupil and reflex for both eyes. `iris_radius` is indexed by slot.
pub fn draw_eyes(
    cfg: &EyeConfig,
    canvas: Canvas,
    slots: &EyeSlots,
    iris_radius: [f64; 2],
) -> Vec<DrawOp> {
    let cornea_d = cfg.cornea_radius * 2.0;
    let centers = eye_centers(slots, canvas);
    let mut ops = Vec::with_capacity(10);

    for (slot, dir) in [(0usize, -1.0), (1usize, 1.0)] {
        let center = centers[slot];
        let r = iris_radius[slot];
        let hl = &HIGHLIGHTS[slot];
        let disc = |x: f64, y: f64, d: f64, fill: Rgb8| DrawOp::Ellipse {
            center: Point::new(x, y),
            width: d,
            height: d,
            fill,
        };

        ops.push(disc(
            center.x + 1.0,
            center.y + 4.0,
            cornea_d + 2.0,
            CORNEA_SHADOW_FILL,
        ));
        ops.push(disc(center.x, center.y + 1.0, cornea_d, CORNEA_FILL));
        ops.push(disc(center.x, center.y, r * 2.0, IRIS_FILL));
        ops.push(disc(
            center.x + dir * r * hl.pupil_offset,
            center.y + r * (1.0 - PUPIL_ELEVATION * 2.0),
            hl.pupil_diameter,
            PUPIL_FILL,
        ));
        ops.push(disc(
            center.x - r * hl.reflex_offset,
            center.y + r * (1.0 - hl.reflex_elevation * 2.0),
            hl.reflex_diameter,
            REFLEX_FILL,
        ));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    fn pivot() -> Point {
        Point::new(300.0, 97.5)
    }

    #[test]
    fn rest_pose_places_eyes_symmetrically() {
        let canvas = Canvas::default();
        let slots = eye_slots(&EyeConfig::default(), canvas, pivot(), [0.0, 0.0]);
        let [right, left] = eye_centers(&slots, canvas);
        assert!(close(left, Point::new(187.5, 87.0)));
        assert!(close(right, Point::new(412.5, 87.0)));
    }

    #[test]
    fn slots_read_rotation_in_reverse_order() {
        let canvas = Canvas::default();
        let cfg = EyeConfig::default();
        let slots = eye_slots(&cfg, canvas, pivot(), [10.0, -20.0]);
        let base = cfg.base_position(canvas);
        assert!(close(slots.positions[0], rotate_about(base, pivot(), 20.0)));
        assert!(close(slots.positions[1], rotate_about(base, pivot(), -10.0)));
    }

    #[test]
    fn screen_right_eye_follows_right_frame_rotation() {
        // The right frame turns its mirrored points by +rotation[1].
        let canvas = Canvas::default();
        let cfg = EyeConfig::default();
        let slots = eye_slots(&cfg, canvas, pivot(), [0.0, 17.0]);
        let [right, left] = eye_centers(&slots, canvas);
        let expect = rotate_about(canvas.mirror_x(cfg.base_position(canvas)), pivot(), 17.0);
        assert!(close(right, expect), "{right:?} vs {expect:?}");
        assert!(close(left, cfg.base_position(canvas)));
    }

    #[test]
    fn iris_radius_is_indexed_by_slot() {
        let canvas = Canvas::default();
        let slots = eye_slots(&EyeConfig::default(), canvas, pivot(), [0.0, 0.0]);
        let ops = draw_eyes(&EyeConfig::default(), canvas, &slots, [25.0, 45.0]);
        assert_eq!(ops.len(), 10);
        let iris_widths: Vec<f64> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Ellipse { width, fill, .. } if *fill == IRIS_FILL => Some(*width),
                _ => None,
            })
            .collect();
        assert_eq!(iris_widths, vec![50.0, 90.0]);
        match ops[2] {
            DrawOp::Ellipse { center, .. } => assert!(center.x > canvas.center_x()),
            ref other => panic!("expected iris, got {other:?}"),
        }
    }
}
