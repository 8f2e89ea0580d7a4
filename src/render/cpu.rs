use crate::{
    foundation::{
        core::{BezPath, Canvas, Cursor, Point, Rgb8},
        error::{FaceError, FaceResult},
    },
    render::{
        FrameRGBA, RenderSettings,
        path::{arc_pie_path, bezier_path, ellipse_path, line_path, polygon_path, rect_path},
        plan::DrawSurface,
    },
};

/// `DrawSurface` rasterized on the CPU with vello_cpu.
pub struct CpuSurface {
    width: u16,
    height: u16,
    settings: RenderSettings,
    ctx: vello_cpu::RenderContext,
    fill: Rgb8,
    stroke: Option<Rgb8>,
    stroke_width: f64,
    cursor: Cursor,
}

impl CpuSurface {
    pub fn new(canvas: Canvas, settings: RenderSettings) -> FaceResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FaceError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FaceError::render("surface height exceeds u16"))?;

        Ok(Self {
            width,
            height,
            settings,
            ctx: vello_cpu::RenderContext::new(width, height),
            fill: Rgb8::new(255, 255, 255),
            stroke: None,
            stroke_width: 1.0,
            cursor: Cursor::Arrow,
        })
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Rasterizes everything drawn since the last `clear`.
    pub fn finish(&mut self) -> FaceResult<FrameRGBA> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let data = pixmap.data_as_u8_slice().to_vec();
        let expected = usize::from(self.width) * usize::from(self.height) * 4;
        if data.len() != expected {
            return Err(FaceError::render(format!(
                "pixmap size mismatch: got {} bytes, expected {expected}",
                data.len()
            )));
        }

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        })
    }

    fn fill_path(&mut self, path: &BezPath) {
        if path.is_empty() {
            return;
        }
        let c = self.fill;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }
}

impl DrawSurface for CpuSurface {
    fn fill_color(&mut self, color: Rgb8) {
        self.fill = color;
    }

    fn stroke_color(&mut self, color: Rgb8) {
        self.stroke = Some(color);
    }

    fn stroke_width(&mut self, width: f64) {
        self.stroke_width = width;
    }

    fn no_stroke(&mut self) {
        self.stroke = None;
    }

    fn clear(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn ellipse(&mut self, center: Point, width: f64, height: f64) {
        self.fill_path(&ellipse_path(center, width, height));
    }

    fn arc(&mut self, center: Point, width: f64, height: f64, start: f64, stop: f64) {
        self.fill_path(&arc_pie_path(center, width, height, start, stop));
    }

    fn bezier(&mut self, points: [Point; 4]) {
        self.fill_path(&bezier_path(points));
    }

    fn rect(&mut self, origin: Point, width: f64, height: f64) {
        self.fill_path(&rect_path(origin, width, height));
    }

    fn quad(&mut self, points: [Point; 4]) {
        self.fill_path(&polygon_path(&points));
    }

    fn triangle(&mut self, points: [Point; 3]) {
        self.fill_path(&polygon_path(&points));
    }

    fn line(&mut self, from: Point, to: Point) {
        let Some(c) = self.stroke else {
            return;
        };
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(self.stroke_width)
                .with_caps(vello_cpu::kurbo::Cap::Square),
        );
        self.ctx.stroke_path(&bezpath_to_cpu(&line_path(from, to)));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
