//! 2D point algebra.
//!
//! Points double as vectors here. [`difference`] is asymmetric: it returns the
//! vector *from* `p0` *to* `p1`, and every caller relies on that order.

use crate::foundation::core::Point;

#[inline]
pub fn add(p0: Point, p1: Point) -> Point {
    Point::new(p0.x + p1.x, p0.y + p1.y)
}

#[inline]
pub fn scale(p: Point, k: f64) -> Point {
    Point::new(p.x * k, p.y * k)
}

/// `p1 - p0`.
#[inline]
pub fn difference(p0: Point, p1: Point) -> Point {
    Point::new(p1.x - p0.x, p1.y - p0.y)
}

#[inline]
pub fn dot(p0: Point, p1: Point) -> f64 {
    p0.x * p1.x + p0.y * p1.y
}

#[inline]
pub fn squared_length(p: Point) -> f64 {
    p.x * p.x + p.y * p.y
}

#[inline]
pub fn distance(p0: Point, p1: Point) -> f64 {
    squared_length(difference(p0, p1)).sqrt()
}

#[inline]
pub fn midpoint(p0: Point, p1: Point) -> Point {
    scale(add(p0, p1), 0.5)
}

/// Angle (radians) of the vector from `p0` to `p1`.
#[inline]
pub fn angle_between(p0: Point, p1: Point) -> f64 {
    let d = difference(p0, p1);
    d.y.atan2(d.x)
}

/// Unit direction for an angle given in degrees.
#[inline]
pub fn direction_deg(angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(rad.cos(), rad.sin())
}

/// Rotates `point` about `center` by `angle_deg` degrees (clockwise on a y-down canvas).
pub fn rotate_about(point: Point, center: Point, angle_deg: f64) -> Point {
    let local = difference(center, point);
    let (s, c) = angle_deg.to_radians().sin_cos();
    let rotated = Point::new(
        dot(local, Point::new(c, -s)),
        dot(local, Point::new(s, c)),
    );
    add(rotated, center)
}
