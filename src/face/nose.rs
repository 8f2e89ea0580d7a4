use std::f64::consts::PI;

use crate::{
    foundation::{
        core::{Canvas, Point, Rgb8},
        error::{FaceError, FaceResult},
    },
    render::plan::DrawOp,
};

const BASE_FILL: Rgb8 = Rgb8::new(150, 71, 101);
const BASE_SEAM: (Rgb8, Rgb8) = (Rgb8::new(91, 35, 72), Rgb8::new(152, 87, 108));
const SHADOW_FILL: Rgb8 = Rgb8::new(110, 43, 96);
const SHADOW_SEAM: (Rgb8, Rgb8) = (Rgb8::new(87, 32, 72), Rgb8::new(128, 72, 106));

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoseConfig {
    pub width: f64,
    /// Overall height including both rounded caps.
    pub height: f64,
    pub elevation: f64,
}

impl Default for NoseConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 90.0,
            elevation: 0.675,
        }
    }
}

impl NoseConfig {
    pub fn validate(&self) -> FaceResult<()> {
        if ![self.width, self.height, self.elevation]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(FaceError::validation("nose values must be finite"));
        }
        if self.width <= 0.0 {
            return Err(FaceError::validation("nose width must be > 0"));
        }
        if self.height < self.width {
            return Err(FaceError::validation(
                "nose height must be at least its width (room for both caps)",
            ));
        }
        Ok(())
    }
}

/// Nose draw ops plus the point every eye rotates about.
#[derive(Clone, Debug)]
pub struct NoseOutput {
    pub ops: Vec<DrawOp>,
    pub pivot: Point,
}

/// A capsule with a darker right half and a two-tone seam across the middle.
pub fn draw_nose(cfg: &NoseConfig, canvas: Canvas) -> NoseOutput {
    let x = canvas.center_x();
    let y = canvas.elevation_y(cfg.elevation);
    let w = cfg.width;
    let cap = w / 2.0;
    let body = cfg.height - cap * 2.0;
    let top = y - body / 2.0;
    let top_cap = Point::new(x, top + 1.0);
    let bottom_cap = Point::new(x, y + body / 2.0 - 1.0);

    let arc = |center: Point, start: f64, stop: f64, fill: Rgb8| DrawOp::Arc {
        center,
        width: w,
        height: cap * 2.0,
        start,
        stop,
        fill,
    };
    let seam = |from_x: f64, dy: f64, stroke: Rgb8, width: f64| DrawOp::Line {
        from: Point::new(from_x, y + dy),
        to: Point::new(x + cap, y + dy),
        stroke,
        width,
    };

    let ops = vec![
        DrawOp::Rect {
            origin: Point::new(x - cap, top),
            width: w,
            height: body,
            fill: BASE_FILL,
        },
        arc(top_cap, PI, 2.0 * PI, BASE_FILL),
        arc(bottom_cap, 0.0, PI, BASE_FILL),
        seam(x - cap, -1.0, BASE_SEAM.0, 3.0),
        seam(x - cap, 1.0, BASE_SEAM.1, 2.0),
        DrawOp::Rect {
            origin: Point::new(x, top),
            width: cap,
            height: body,
            fill: SHADOW_FILL,
        },
        arc(top_cap, 1.5 * PI, 2.0 * PI, SHADOW_FILL),
        arc(bottom_cap, 0.0, PI / 2.0, SHADOW_FILL),
        seam(x, -1.0, SHADOW_SEAM.0, 3.0),
        seam(x, 1.0, SHADOW_SEAM.1, 2.0),
    ];

    NoseOutput {
        ops,
        pivot: Point::new(x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_sits_on_the_nose_center() {
        let out = draw_nose(&NoseConfig::default(), Canvas::default());
        assert!((out.pivot.x - 300.0).abs() < 1e-9);
        assert!((out.pivot.y - 97.5).abs() < 1e-9);
    }

    #[test]
    fn base_is_drawn_before_shadow() {
        let out = draw_nose(&NoseConfig::default(), Canvas::default());
        assert_eq!(out.ops.len(), 10);
        let fills: Vec<_> = out.ops.iter().filter_map(DrawOp::fill).collect();
        assert_eq!(fills[..3], [BASE_FILL; 3]);
        assert_eq!(fills[3..], [SHADOW_FILL; 3]);
        match out.ops[0] {
            DrawOp::Rect { width, height, .. } => {
                assert_eq!(width, 50.0);
                assert_eq!(height, 40.0);
            }
            ref other => panic!("expected body rect, got {other:?}"),
        }
    }

    #[test]
    fn seams_are_square_strokes_across_the_body() {
        let out = draw_nose(&NoseConfig::default(), Canvas::default());
        let lines: Vec<_> = out
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(matches!(lines[0], DrawOp::Line { width, .. } if *width == 3.0));
    }

    #[test]
    fn short_nose_is_rejected() {
        let cfg = NoseConfig {
            width: 50.0,
            height: 40.0,
            ..NoseConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(NoseConfig::default().validate().is_ok());
    }
}
