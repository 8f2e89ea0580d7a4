use crate::{
    face::{controls::ControlsConfig, eyes::EyeConfig, nose::NoseConfig},
    foundation::{
        core::Canvas,
        error::{FaceError, FaceResult},
    },
    geometry::{
        eye_frame::EyeFrameConfig,
        knot::{DEFAULT_KNOTS, Knot},
    },
};

/// Everything that shapes the face, plus the knots it starts with.
///
/// Missing JSON fields fall back to the reference face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub canvas: Canvas,
    pub nose: NoseConfig,
    pub eye_frame: EyeFrameConfig,
    pub eyes: EyeConfig,
    pub controls: ControlsConfig,
    pub knots: [Knot; 2],
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            nose: NoseConfig::default(),
            eye_frame: EyeFrameConfig::default(),
            eyes: EyeConfig::default(),
            controls: ControlsConfig::default(),
            knots: DEFAULT_KNOTS,
        }
    }
}

impl FaceConfig {
    pub fn validate(&self) -> FaceResult<()> {
        self.canvas.validate()?;
        self.nose.validate()?;
        self.eye_frame.validate()?;
        self.eyes.validate()?;
        self.controls.validate()?;
        if !self.knots.iter().all(|k| k.is_finite()) {
            return Err(FaceError::validation("knot angle/length must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        FaceConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: FaceConfig = serde_json::from_value(serde_json::json!({
            "canvas": { "width": 800, "height": 400 },
            "controls": { "enabled": false },
            "eye_frame": { "frame_weight": 10.0 }
        }))
        .unwrap();
        assert_eq!(cfg.canvas.width, 800);
        assert!(!cfg.controls.enabled);
        assert_eq!(cfg.controls.grab_radius, 15.0);
        assert_eq!(cfg.eye_frame.frame_weight, 10.0);
        assert_eq!(cfg.eye_frame.arc_span, 75.0);
        assert_eq!(cfg.knots, DEFAULT_KNOTS);
        cfg.validate().unwrap();
    }

    #[test]
    fn nested_errors_surface() {
        let mut cfg = FaceConfig::default();
        cfg.eye_frame.arc_span = -1.0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("arc_span"));

        let mut cfg = FaceConfig::default();
        cfg.knots[1].length = f64::INFINITY;
        assert!(cfg.validate().is_err());
    }
}
