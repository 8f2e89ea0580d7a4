use crate::foundation::error::{FaceError, FaceResult};

pub use kurbo::{BezPath, Point, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
        }
    }
}

impl Canvas {
    pub fn validate(self) -> FaceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FaceError::validation("canvas width/height must be non-zero"));
        }
        Ok(())
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Horizontal centerline; both eyes mirror across it.
    pub fn center_x(self) -> f64 {
        self.width_f64() / 2.0
    }

    /// Y coordinate of something placed `elevation` (0 = bottom, 1 = top) up the canvas.
    pub fn elevation_y(self, elevation: f64) -> f64 {
        self.height_f64() * (1.0 - elevation)
    }

    /// Reflects `p` across the vertical centerline (`x -> width - x`).
    pub fn mirror_x(self, p: Point) -> Point {
        Point::new(self.width_f64() - p.x, p.y)
    }
}

/// Opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pointer input polled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Option<Point>, // None when the pointer is outside the host surface
    pub pressed: bool,
}

impl PointerState {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some(Point::new(x, y)),
            pressed: false,
        }
    }

    pub fn pressed_at(x: f64, y: f64) -> Self {
        Self {
            position: Some(Point::new(x, y)),
            pressed: true,
        }
    }
}

/// Cursor affordance requested from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Cursor {
    #[default]
    Arrow,
    Hand,
}
