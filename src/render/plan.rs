use crate::foundation::{
    core::{Canvas, Cursor, Point, Rgb8},
    error::{FaceError, FaceResult},
};

/// One immediate-mode drawing instruction. Filled shapes carry their fill,
/// lines their stroke; nothing is stroked unless it is a `Line`.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Ellipse {
        center: Point,
        width: f64, // diameters
        height: f64,
        fill: Rgb8,
    },
    /// Pie wedge; angles in radians, clockwise on the y-down canvas.
    Arc {
        center: Point,
        width: f64,
        height: f64,
        start: f64,
        stop: f64,
        fill: Rgb8,
    },
    /// Cubic from `points[0]` to `points[3]`, closed by its chord.
    Bezier {
        points: [Point; 4],
        fill: Rgb8,
    },
    Rect {
        origin: Point, // top-left
        width: f64,
        height: f64,
        fill: Rgb8,
    },
    Quad {
        points: [Point; 4],
        fill: Rgb8,
    },
    Triangle {
        points: [Point; 3],
        fill: Rgb8,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Rgb8,
        width: f64,
    },
}

impl DrawOp {
    pub fn points(&self) -> Vec<Point> {
        match self {
            Self::Clear => Vec::new(),
            Self::Ellipse { center, .. } | Self::Arc { center, .. } => vec![*center],
            Self::Rect { origin, .. } => vec![*origin],
            Self::Bezier { points, .. } | Self::Quad { points, .. } => points.to_vec(),
            Self::Triangle { points, .. } => points.to_vec(),
            Self::Line { from, to, .. } => vec![*from, *to],
        }
    }

    pub fn fill(&self) -> Option<Rgb8> {
        match self {
            Self::Ellipse { fill, .. }
            | Self::Arc { fill, .. }
            | Self::Bezier { fill, .. }
            | Self::Rect { fill, .. }
            | Self::Quad { fill, .. }
            | Self::Triangle { fill, .. } => Some(*fill),
            Self::Clear | Self::Line { .. } => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        let scalars_ok = match self {
            Self::Ellipse { width, height, .. } | Self::Rect { width, height, .. } => {
                width.is_finite() && height.is_finite()
            }
            Self::Arc {
                width,
                height,
                start,
                stop,
                ..
            } => width.is_finite() && height.is_finite() && start.is_finite() && stop.is_finite(),
            Self::Line { width, .. } => width.is_finite(),
            Self::Clear | Self::Bezier { .. } | Self::Quad { .. } | Self::Triangle { .. } => true,
        };
        scalars_ok && self.points().iter().all(|p| p.is_finite())
    }
}

/// Everything one frame asks of the host surface, in painter's order.
#[derive(Clone, Debug)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub time: f64, // animation clock seconds this frame was evaluated at
    pub ops: Vec<DrawOp>,
    pub cursor: Cursor,
}

/// Immediate-mode drawing primitives provided by the host.
pub trait DrawSurface {
    fn fill_color(&mut self, color: Rgb8);
    fn stroke_color(&mut self, color: Rgb8);
    fn stroke_width(&mut self, width: f64);
    fn no_stroke(&mut self);
    fn clear(&mut self);
    fn ellipse(&mut self, center: Point, width: f64, height: f64);
    fn arc(&mut self, center: Point, width: f64, height: f64, start: f64, stop: f64);
    fn bezier(&mut self, points: [Point; 4]);
    fn rect(&mut self, origin: Point, width: f64, height: f64);
    fn quad(&mut self, points: [Point; 4]);
    fn triangle(&mut self, points: [Point; 3]);
    fn line(&mut self, from: Point, to: Point);
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Replays `plan` against `surface`. A plan holding non-finite geometry is
/// rejected before anything is drawn.
pub fn execute_plan(surface: &mut dyn DrawSurface, plan: &FramePlan) -> FaceResult<()> {
    if let Some(idx) = plan.ops.iter().position(|op| !op.is_finite()) {
        return Err(FaceError::geometry(format!(
            "draw op {idx} has non-finite coordinates"
        )));
    }

    surface.no_stroke();
    for op in &plan.ops {
        match *op {
            DrawOp::Clear => surface.clear(),
            DrawOp::Ellipse {
                center,
                width,
                height,
                fill,
            } => {
                surface.fill_color(fill);
                surface.ellipse(center, width, height);
            }
            DrawOp::Arc {
                center,
                width,
                height,
                start,
                stop,
                fill,
            } => {
                surface.fill_color(fill);
                surface.arc(center, width, height, start, stop);
            }
            DrawOp::Bezier { points, fill } => {
                surface.fill_color(fill);
                surface.bezier(points);
            }
            DrawOp::Rect {
                origin,
                width,
                height,
                fill,
            } => {
                surface.fill_color(fill);
                surface.rect(origin, width, height);
            }
            DrawOp::Quad { points, fill } => {
                surface.fill_color(fill);
                surface.quad(points);
            }
            DrawOp::Triangle { points, fill } => {
                surface.fill_color(fill);
                surface.triangle(points);
            }
            DrawOp::Line {
                from,
                to,
                stroke,
                width,
            } => {
                surface.stroke_color(stroke);
                surface.stroke_width(width);
                surface.line(from, to);
                surface.no_stroke();
            }
        }
    }
    surface.set_cursor(plan.cursor);
    Ok(())
}
