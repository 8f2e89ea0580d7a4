pub mod cpu;
pub mod path;
pub mod plan;

/// Rasterized frame, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn unpremultiplied(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Straight RGBA painted on every `clear`; `None` leaves the canvas transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpremultiply_restores_straight_color() {
        let frame = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![128, 0, 64, 128, 10, 20, 30, 255],
            premultiplied: true,
        };
        assert_eq!(frame.unpremultiplied(), vec![255, 0, 128, 128, 10, 20, 30, 255]);
        assert_eq!(frame.pixel(1, 0), Some([10, 20, 30, 255]));
        assert_eq!(frame.pixel(2, 0), None);
    }
}
