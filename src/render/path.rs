//! Outlines for the immediate-mode primitives, built with kurbo.

use std::f64::consts::TAU;

use kurbo::{Arc, BezPath, Ellipse, Shape as _, Vec2};

use crate::foundation::core::Point;

const TOLERANCE: f64 = 0.1;

pub fn ellipse_path(center: Point, width: f64, height: f64) -> BezPath {
    Ellipse::new(center, Vec2::new(width / 2.0, height / 2.0), 0.0).to_path(TOLERANCE)
}

/// Clockwise sweep from `start` to `stop`, wrapping a negative span by a full turn.
pub fn arc_sweep(start: f64, stop: f64) -> f64 {
    let span = stop - start;
    if span >= TAU {
        return TAU;
    }
    span.rem_euclid(TAU)
}

/// Pie wedge: center, out along `start`, around the ellipse, back to center.
pub fn arc_pie_path(center: Point, width: f64, height: f64, start: f64, stop: f64) -> BezPath {
    let radii = Vec2::new(width / 2.0, height / 2.0);
    let sweep = arc_sweep(start, stop);
    let mut path = BezPath::new();
    if sweep == 0.0 {
        return path;
    }

    let arc = Arc {
        center,
        radii,
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    path.move_to(center);
    path.line_to(center + Vec2::new(radii.x * start.cos(), radii.y * start.sin()));
    path.extend(arc.append_iter(TOLERANCE));
    path.close_path();
    path
}

pub fn bezier_path(points: [Point; 4]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(points[0]);
    path.curve_to(points[1], points[2], points[3]);
    path.close_path();
    path
}

pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    path
}

pub fn rect_path(origin: Point, width: f64, height: f64) -> BezPath {
    kurbo::Rect::from_origin_size(origin, (width, height)).to_path(TOLERANCE)
}

pub fn line_path(from: Point, to: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}
