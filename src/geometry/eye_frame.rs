//! Eye-frame outline solver.
//!
//! The frame is solved once in canonical (left eye, unrotated) coordinates.
//! The right eye is the same point set reflected across the canvas centerline,
//! and each eye is then rotated about the shared pivot by its own signal.
//!
//! Outline anatomy, for the left eye:
//!
//! ```text
//!        p2 ____________ p1
//!       /   (arc)        |
//!     p3                 |   cubic p3 -> k0 -> k1 -> p1 closes the bottom
//!       \_____ k0 .. k1 _/
//! ```

use crate::{
    foundation::{
        core::{Canvas, Point, Rgb8},
        error::{FaceError, FaceResult},
        math::{add, angle_between, difference, midpoint, rotate_about, scale, squared_length},
    },
    geometry::knot::{Knot, KnotId},
    render::plan::DrawOp,
};

/// Metal-rim knot controls sit this much further out than the eye's own.
const RIM_KNOT_REACH: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EyeFrameConfig {
    /// Elevation of the box's vertical center (0 = canvas bottom, 1 = top).
    pub base_elevation: f64,
    /// Horizontal gap between the two frames' inner edges.
    pub frame_separation: f64,
    pub eye_box_height: f64,
    pub eye_box_width: f64,
    /// Thickness of the metal rim.
    pub frame_weight: f64,
    /// Chord the rounded outer corner has to bridge.
    pub arc_span: f64,
}

impl Default for EyeFrameConfig {
    fn default() -> Self {
        Self {
            base_elevation: 0.725,
            frame_separation: 45.0,
            eye_box_height: 110.0,
            eye_box_width: 220.0,
            frame_weight: 15.0,
            arc_span: 75.0,
        }
    }
}

impl EyeFrameConfig {
    pub fn validate(&self) -> FaceResult<()> {
        let values = [
            self.base_elevation,
            self.frame_separation,
            self.eye_box_height,
            self.eye_box_width,
            self.frame_weight,
            self.arc_span,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FaceError::validation("eye frame values must be finite"));
        }
        if self.eye_box_width <= 0.0 || self.eye_box_height <= 0.0 {
            return Err(FaceError::validation(
                "eye box width/height must be > 0",
            ));
        }
        if self.arc_span <= 0.0 {
            return Err(FaceError::validation("arc_span must be > 0"));
        }
        if self.frame_weight < 0.0 {
            return Err(FaceError::validation("frame_weight must be >= 0"));
        }
        // The corner radius equals arc_span; the sclera insets it by up to half the rim.
        if self.arc_span < self.frame_weight * 0.5 {
            return Err(FaceError::validation(format!(
                "arc_span ({}) must be at least half of frame_weight ({})",
                self.arc_span, self.frame_weight
            )));
        }
        Ok(())
    }

    /// Knot lengths are fractions of this, so the frame scales with its box.
    pub fn frame_dim(&self) -> f64 {
        (self.eye_box_width + self.eye_box_height) / 2.0
    }

    pub fn anchors(&self, canvas: Canvas) -> FrameAnchors {
        let x = canvas.center_x() - self.frame_separation / 2.0;
        let top = canvas.elevation_y(self.base_elevation) - self.eye_box_height / 2.0;
        FrameAnchors {
            p1: Point::new(x, top),
            p2: Point::new(x - self.eye_box_width + self.arc_span, top),
            p3: Point::new(x - self.eye_box_width, top + self.arc_span),
        }
    }
}

/// Box corners of the canonical (left) frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameAnchors {
    /// Inner top corner.
    pub p1: Point,
    /// Where the top edge meets the arc.
    pub p2: Point,
    /// Where the arc meets the bottom curve.
    pub p3: Point,
}

impl FrameAnchors {
    pub fn anchor_for(&self, knot: KnotId) -> Point {
        match knot {
            KnotId::Outer => self.p3,
            KnotId::Inner => self.p1,
        }
    }
}

/// Circular arc blending `p2` into `p3`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSolution {
    /// Half-chord rotated a quarter turn; points from the chord toward the center.
    pub dir: Point,
    pub openness: f64,
    pub radius: f64,
    pub center: Point,
}

/// Solves the corner arc through `p2` and `p3`.
///
/// Fails with a geometry error when the anchors coincide, instead of
/// producing NaN coordinates downstream.
pub fn solve_arc(p2: Point, p3: Point, arc_span: f64) -> FaceResult<ArcSolution> {
    let chord = difference(p2, p3);
    let dir = scale(Point::new(chord.y, -chord.x), 0.5);
    let dir_sq = squared_length(dir);
    if !dir_sq.is_finite() || dir_sq <= 0.0 {
        return Err(FaceError::geometry(format!(
            "arc anchors {p2:?} and {p3:?} are degenerate"
        )));
    }

    let openness = 0.5 * arc_span * arc_span / dir_sq;
    let radius = (dir_sq * (1.0 + openness * openness)).sqrt();
    let center = add(midpoint(p2, p3), scale(dir, openness));
    if !radius.is_finite() || !center.is_finite() {
        return Err(FaceError::geometry("arc radius overflowed"));
    }

    Ok(ArcSolution {
        dir,
        openness,
        radius,
        center,
    })
}

/// Canonical frame geometry shared by both eyes for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSolution {
    pub anchors: FrameAnchors,
    pub arc: ArcSolution,
    pub frame_dim: f64,
    pub k0: Point,
    pub k1: Point,
}

impl FrameSolution {
    pub fn knot_point(&self, knot: KnotId) -> Point {
        match knot {
            KnotId::Outer => self.k0,
            KnotId::Inner => self.k1,
        }
    }
}

pub fn solve_frame(
    cfg: &EyeFrameConfig,
    canvas: Canvas,
    knots: &[Knot; 2],
) -> FaceResult<FrameSolution> {
    let anchors = cfg.anchors(canvas);
    let arc = solve_arc(anchors.p2, anchors.p3, cfg.arc_span)?;
    let frame_dim = cfg.frame_dim();
    let k0 = knots[KnotId::Outer.index()].place(anchors.p3, frame_dim);
    let k1 = knots[KnotId::Inner.index()].place(anchors.p1, frame_dim);
    if !k0.is_finite() || !k1.is_finite() {
        return Err(FaceError::geometry("knot control points are not finite"));
    }

    Ok(FrameSolution {
        anchors,
        arc,
        frame_dim,
        k0,
        k1,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    pub fn is_mirrored(self) -> bool {
        matches!(self, Self::Right)
    }

    /// The eyes tilt in opposite directions for the same signal.
    pub fn rotation_sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Filled elliptical wedge; `width`/`height` are diameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcShape {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub start: f64,
    pub stop: f64,
}

/// Metal rim: bottom curve, rounded corner and the quad joining rim to box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RimLayer {
    pub curve: [Point; 4],
    pub corner: ArcShape,
    pub quad: [Point; 4],
}

/// Box body, corner fan and bottom curve of a fill layer (backdrop or sclera).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillLayer {
    pub body: [Point; 3],
    pub fan: [Point; 3],
    pub corner: ArcShape,
    pub curve: [Point; 4],
}

/// One eye's frame, mirrored and rotated into canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeFrameLayers {
    pub side: Side,
    pub arc_center: Point,
    pub rim: RimLayer,
    pub backdrop: FillLayer,
    pub sclera: FillLayer,
}

pub const RIM_CURVE_FILL: [Rgb8; 2] = [Rgb8::new(116, 54, 111), Rgb8::new(216, 150, 109)];
pub const RIM_BODY_FILL: [Rgb8; 2] = [Rgb8::new(235, 207, 180), Rgb8::new(116, 54, 111)];
pub const BACKDROP_FILL: Rgb8 = Rgb8::new(54, 20, 54);
pub const SCLERA_FILL: Rgb8 = Rgb8::new(210, 208, 195);

/// Lays out one eye's rim, backdrop and sclera.
///
/// `rotation` is the eye's raw signal in degrees; the side's sign is applied here.
pub fn build_layers(
    sol: &FrameSolution,
    cfg: &EyeFrameConfig,
    canvas: Canvas,
    side: Side,
    rotation: f64,
    pivot: Point,
) -> EyeFrameLayers {
    let angle = rotation * side.rotation_sign();
    let flip = |p: Point| if side.is_mirrored() { canvas.mirror_x(p) } else { p };
    let rot = |p: Point| rotate_about(p, pivot, angle);

    let FrameAnchors { p1, p2, p3 } = sol.anchors;
    let fw = cfg.frame_weight;
    let radius = sol.arc.radius;

    let sk0 = flip(sol.k0);
    let sk1 = flip(sol.k1);
    let (bp1, bp2, bp3) = (flip(p1), flip(p2), flip(p3));
    let center = rot(flip(sol.arc.center));
    // True polar angle of `p` about the arc center. Measuring against a unit
    // x offset instead skews the wedge ends and leaves seams at the corner.
    let arc_angle = |p: Point| angle_between(center, rot(p));
    // Reflection reverses winding, so the mirrored corner sweeps the other way.
    let corner = |from: Point, to: Point, width: f64, height: f64| {
        let (a, b) = if side.is_mirrored() { (to, from) } else { (from, to) };
        ArcShape {
            center,
            width,
            height,
            start: arc_angle(a),
            stop: arc_angle(b),
        }
    };

    let fp1 = flip(Point::new(p1.x + fw, p1.y - fw));
    let fp2 = flip(Point::new(p2.x, p2.y - fw));
    let fp3 = flip(Point::new(p3.x - fw, p3.y));
    let fk0 = add(fp3, scale(difference(bp3, sk0), RIM_KNOT_REACH));
    let fk1 = add(fp1, scale(difference(bp1, sk1), RIM_KNOT_REACH));
    let rim_d = (radius + fw) * 2.0;
    let rim = RimLayer {
        curve: [fp3, fk0, fk1, fp1].map(rot),
        corner: corner(fp3, fp2, rim_d, rim_d),
        quad: [fp1, bp1, fp3, fp2].map(rot),
    };

    let backdrop = FillLayer {
        body: [bp1, bp2, bp3].map(rot),
        fan: [rot(bp1), rot(bp2), center],
        corner: corner(bp3, bp2, radius * 2.0, radius * 2.0),
        curve: [bp3, sk0, sk1, bp1].map(rot),
    };

    // Sclera margins are hand-tuned per side and are not mirror images.
    let (inset_x, inset_y, inner_shift) = match side {
        Side::Left => (fw * 0.3, fw * 0.5, 0.0),
        Side::Right => (0.0, fw * 0.3, fw * 0.75),
    };
    let sp1 = Point::new(bp1.x + inner_shift, bp1.y + fw * 0.65);
    let sp2 = Point::new(bp2.x, bp2.y + inset_y);
    let sp3 = Point::new(bp3.x + inset_x, bp3.y);
    let sclera = FillLayer {
        body: [sp1, sp2, sp3].map(rot),
        fan: [rot(sp1), rot(sp2), center],
        corner: corner(
            bp3,
            sp2,
            (radius - inset_x) * 2.0,
            (radius - inset_y) * 2.0,
        ),
        curve: [sp3, sk0, sk1, sp1].map(rot),
    };

    EyeFrameLayers {
        side,
        arc_center: center,
        rim,
        backdrop,
        sclera,
    }
}

impl EyeFrameLayers {
    /// Back-to-front: rim curve, rim body, backdrop, sclera.
    pub fn draw_ops(&self) -> Vec<DrawOp> {
        let i = self.side.index();
        let mut ops = Vec::with_capacity(11);
        ops.push(DrawOp::Bezier {
            points: self.rim.curve,
            fill: RIM_CURVE_FILL[i],
        });
        ops.push(arc_op(self.rim.corner, RIM_BODY_FILL[i]));
        ops.push(DrawOp::Quad {
            points: self.rim.quad,
            fill: RIM_BODY_FILL[i],
        });
        push_fill_layer(&mut ops, &self.backdrop, BACKDROP_FILL);
        push_fill_layer(&mut ops, &self.sclera, SCLERA_FILL);
        ops
    }
}

fn arc_op(arc: ArcShape, fill: Rgb8) -> DrawOp {
    DrawOp::Arc {
        center: arc.center,
        width: arc.width,
        height: arc.height,
        start: arc.start,
        stop: arc.stop,
        fill,
    }
}

fn push_fill_layer(ops: &mut Vec<DrawOp>, layer: &FillLayer, fill: Rgb8) {
    ops.push(DrawOp::Triangle {
        points: layer.body,
        fill,
    });
    ops.push(DrawOp::Triangle {
        points: layer.fan,
        fill,
    });
    ops.push(arc_op(layer.corner, fill));
    ops.push(DrawOp::Bezier {
        points: layer.curve,
        fill,
    });
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::*;
    use crate::{geometry::knot::DEFAULT_KNOTS, render::path::arc_sweep};

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    fn same_angle(a: f64, b: f64) -> bool {
        let d = (a - b).rem_euclid(TAU);
        d < 1e-9 || (TAU - d) < 1e-9
    }

    fn pivot(canvas: Canvas) -> Point {
        Point::new(canvas.center_x(), canvas.elevation_y(0.675))
    }

    #[test]
    fn default_anchors_match_reference_layout() {
        let a = EyeFrameConfig::default().anchors(Canvas::default());
        assert!(close(a.p1, Point::new(277.5, 27.5)));
        assert!(close(a.p2, Point::new(132.5, 27.5)));
        assert!(close(a.p3, Point::new(57.5, 102.5)));
    }

    #[test]
    fn default_corner_is_a_quarter_circle() {
        let cfg = EyeFrameConfig::default();
        let a = cfg.anchors(Canvas::default());
        let arc = solve_arc(a.p2, a.p3, cfg.arc_span).unwrap();
        assert!((arc.openness - 1.0).abs() < 1e-12);
        assert!((arc.radius - 75.0).abs() < 1e-9);
        assert!(close(arc.center, Point::new(132.5, 102.5)));
        assert!(same_angle(angle_between(arc.center, a.p3), PI));
        assert!(same_angle(angle_between(arc.center, a.p2), -FRAC_PI_2));
    }

    #[test]
    fn arc_radius_never_undercuts_half_chord() {
        let cases = [
            (Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0),
            (Point::new(0.0, 0.0), Point::new(3.0, 4.0), 50.0),
            (Point::new(-40.0, 7.0), Point::new(120.0, -33.0), 0.25),
            (Point::new(132.5, 27.5), Point::new(57.5, 102.5), 75.0),
        ];
        for (p2, p3, span) in cases {
            let arc = solve_arc(p2, p3, span).unwrap();
            assert!(arc.radius >= squared_length(arc.dir).sqrt());
            // Both ends of the chord sit on the circle.
            let r2 = arc.radius * arc.radius;
            assert!((squared_length(difference(arc.center, p2)) - r2).abs() < 1e-6 * r2);
            assert!((squared_length(difference(arc.center, p3)) - r2).abs() < 1e-6 * r2);
        }
    }

    #[test]
    fn coincident_anchors_fail_fast() {
        let p = Point::new(5.0, 5.0);
        let err = solve_arc(p, p, 75.0).unwrap_err();
        assert!(matches!(err, FaceError::Geometry(_)));
    }

    #[test]
    fn collapsed_corner_is_degenerate_geometry() {
        // p2 and p3 coincide once the arc has nothing to span.
        let cfg = EyeFrameConfig {
            eye_box_width: 75.0,
            arc_span: 0.0,
            ..EyeFrameConfig::default()
        };
        assert!(cfg.validate().is_err());
        let err = solve_frame(&cfg, Canvas::default(), &DEFAULT_KNOTS).unwrap_err();
        assert!(matches!(err, FaceError::Geometry(_)));
    }

    #[test]
    fn corner_tighter_than_half_the_rim_is_rejected() {
        let cfg = EyeFrameConfig {
            arc_span: 7.0,
            frame_weight: 15.0,
            ..EyeFrameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(FaceError::Validation(_))));

        let edge = EyeFrameConfig {
            arc_span: 7.5,
            ..cfg
        };
        edge.validate().unwrap();
        let canvas = Canvas::default();
        let sol = solve_frame(&edge, canvas, &DEFAULT_KNOTS).unwrap();
        for side in Side::BOTH {
            let layers = build_layers(&sol, &edge, canvas, side, 0.0, pivot(canvas));
            assert!(layers.sclera.corner.width >= 0.0);
            assert!(layers.sclera.corner.height >= 0.0);
        }
    }

    #[test]
    fn knots_hang_off_their_anchors() {
        let cfg = EyeFrameConfig::default();
        let sol = solve_frame(&cfg, Canvas::default(), &DEFAULT_KNOTS).unwrap();
        let expect_k0 = DEFAULT_KNOTS[0].place(sol.anchors.p3, 165.0);
        assert!(close(sol.k0, expect_k0));
        let expect_k1 = DEFAULT_KNOTS[1].place(sol.anchors.p1, 165.0);
        assert!(close(sol.knot_point(KnotId::Inner), expect_k1));
        assert_eq!(sol.frame_dim, 165.0);
    }

    #[test]
    fn right_frame_mirrors_left_without_rotation() {
        let canvas = Canvas::default();
        let cfg = EyeFrameConfig::default();
        let knots = [
            Knot {
                angle: 70.0,
                length: 0.5,
            },
            Knot {
                angle: 100.0,
                length: 0.6,
            },
        ];
        let sol = solve_frame(&cfg, canvas, &knots).unwrap();
        let left = build_layers(&sol, &cfg, canvas, Side::Left, 0.0, pivot(canvas));
        let right = build_layers(&sol, &cfg, canvas, Side::Right, 0.0, pivot(canvas));

        fn mirrors(canvas: Canvas, right: &[Point], left: &[Point]) -> bool {
            right.len() == left.len()
                && right
                    .iter()
                    .zip(left)
                    .all(|(r, l)| close(*r, canvas.mirror_x(*l)))
        }

        assert!(close(right.arc_center, canvas.mirror_x(left.arc_center)));
        assert!(mirrors(canvas, &right.rim.curve, &left.rim.curve));
        assert!(mirrors(canvas, &right.rim.quad, &left.rim.quad));
        assert!(mirrors(canvas, &right.backdrop.body, &left.backdrop.body));
        assert!(mirrors(canvas, &right.backdrop.fan, &left.backdrop.fan));
        assert!(mirrors(canvas, &right.backdrop.curve, &left.backdrop.curve));

        // Mirrored corners cover the same quarter turn, reflected.
        for (l, r) in [
            (left.rim.corner, right.rim.corner),
            (left.backdrop.corner, right.backdrop.corner),
        ] {
            assert!((arc_sweep(l.start, l.stop) - arc_sweep(r.start, r.stop)).abs() < 1e-9);
            assert!(same_angle(r.start, PI - l.stop));
            assert!(same_angle(r.stop, PI - l.start));
        }
    }

    #[test]
    fn rotation_moves_every_vertex_about_the_pivot() {
        let canvas = Canvas::default();
        let cfg = EyeFrameConfig::default();
        let sol = solve_frame(&cfg, canvas, &DEFAULT_KNOTS).unwrap();
        let c = pivot(canvas);
        let still = build_layers(&sol, &cfg, canvas, Side::Left, 0.0, c);
        let tilted = build_layers(&sol, &cfg, canvas, Side::Left, 12.5, c);

        // The left eye applies the signal negated.
        for (a, b) in still.rim.curve.iter().zip(tilted.rim.curve.iter()) {
            assert!(close(rotate_about(*a, c, -12.5), *b));
        }
        assert!(close(rotate_about(still.arc_center, c, -12.5), tilted.arc_center));
        // Distances to the pivot are preserved.
        let d0 = squared_length(difference(c, still.sclera.body[1]));
        let d1 = squared_length(difference(c, tilted.sclera.body[1]));
        assert!((d0 - d1).abs() < 1e-6);
    }

    #[test]
    fn draw_ops_paint_back_to_front() {
        let canvas = Canvas::default();
        let cfg = EyeFrameConfig::default();
        let sol = solve_frame(&cfg, canvas, &DEFAULT_KNOTS).unwrap();
        let layers = build_layers(&sol, &cfg, canvas, Side::Right, 3.0, pivot(canvas));
        let fills: Vec<_> = layers.draw_ops().iter().filter_map(DrawOp::fill).collect();
        assert_eq!(fills.len(), 11);
        assert_eq!(fills[0], RIM_CURVE_FILL[1]);
        assert_eq!(fills[1], RIM_BODY_FILL[1]);
        assert_eq!(fills[2], RIM_BODY_FILL[1]);
        assert!(fills[3..7].iter().all(|f| *f == BACKDROP_FILL));
        assert!(fills[7..].iter().all(|f| *f == SCLERA_FILL));
        assert!(layers.draw_ops().iter().all(DrawOp::is_finite));
    }
}
