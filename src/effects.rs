//! Ready-made effects used by the `opcfx` binary and as reference
//! implementations of the [`Effect`] contract.

use crate::{color::LinearRgb, effect::Effect, layout::PixelInfo};

/// Constant color on every active pixel. Stateless.
#[derive(Clone, Copy, Debug)]
pub struct Solid {
    pub color: LinearRgb,
}

impl Solid {
    pub fn new(color: LinearRgb) -> Self {
        Self { color }
    }
}

impl Effect for Solid {
    fn calculate_pixel(&self, _pixel: &PixelInfo, _meta: &serde_json::Value) -> LinearRgb {
        self.color
    }
}

/// Sinusoidal brightness wave traveling along the x axis.
#[derive(Clone, Copy, Debug)]
pub struct Wave {
    pub color: LinearRgb,
    /// Cycles per second.
    pub speed: f32,
    /// Spatial period in layout units.
    pub wavelength: f32,
    phase: f32,
}

impl Wave {
    pub fn new(color: LinearRgb, speed: f32, wavelength: f32) -> Self {
        Self {
            color,
            speed,
            wavelength,
            phase: 0.0,
        }
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self::new(LinearRgb::splat(1.0), 0.5, 4.0)
    }
}

impl Effect for Wave {
    fn next_frame(&mut self, time_delta: f32) {
        // Keep the phase in [0, 1) so long runs don't lose f32 precision.
        self.phase = (self.phase + time_delta * self.speed).rem_euclid(1.0);
    }

    fn calculate_pixel(&self, pixel: &PixelInfo, _meta: &serde_json::Value) -> LinearRgb {
        let cycles = pixel.x / self.wavelength - self.phase;
        let level = 0.5 + 0.5 * (cycles * std::f32::consts::TAU).sin();
        LinearRgb::new(
            self.color.r * level,
            self.color.g * level,
            self.color.b * level,
        )
    }
}

/// Hue sweep across space, cycling over time.
#[derive(Clone, Copy, Debug)]
pub struct Rainbow {
    /// Hue cycles per second.
    pub speed: f32,
    /// Layout distance covered by one full hue cycle.
    pub spread: f32,
    phase: f32,
}

impl Rainbow {
    pub fn new(speed: f32, spread: f32) -> Self {
        Self {
            speed,
            spread,
            phase: 0.0,
        }
    }
}

impl Default for Rainbow {
    fn default() -> Self {
        Self::new(0.2, 8.0)
    }
}

impl Effect for Rainbow {
    fn next_frame(&mut self, time_delta: f32) {
        self.phase = (self.phase + time_delta * self.speed).rem_euclid(1.0);
    }

    fn calculate_pixel(&self, pixel: &PixelInfo, _meta: &serde_json::Value) -> LinearRgb {
        let hue = (pixel.x + pixel.y) / self.spread + self.phase;
        hsv_to_rgb(hue, 1.0, 1.0)
    }
}

/// Standard HSV to RGB with hue wrapped into [0, 1).
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> LinearRgb {
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    LinearRgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pixel_at(x: f32) -> PixelInfo {
        PixelInfo::from_entry(0, &json!({ "point": [x, 0.0, 0.0] }))
    }

    #[test]
    fn solid_ignores_position_and_time() {
        let mut fx = Solid::new(LinearRgb::new(0.2, 0.4, 0.6));
        fx.next_frame(123.0);
        let meta = json!({});
        assert_eq!(fx.calculate_pixel(&pixel_at(0.0), &meta), fx.color);
        assert_eq!(fx.calculate_pixel(&pixel_at(99.0), &meta), fx.color);
    }

    #[test]
    fn wave_is_deterministic_for_fixed_state() {
        let fx = Wave::default();
        let meta = json!({});
        let a = fx.calculate_pixel(&pixel_at(1.5), &meta);
        let b = fx.calculate_pixel(&pixel_at(1.5), &meta);
        assert_eq!(a, b);
    }

    #[test]
    fn wave_zero_step_does_not_advance_phase() {
        let mut fx = Wave::default();
        let meta = json!({});
        let before = fx.calculate_pixel(&pixel_at(0.7), &meta);
        fx.next_frame(0.0);
        let after = fx.calculate_pixel(&pixel_at(0.7), &meta);
        assert_eq!(before, after);
    }

    #[test]
    fn rainbow_phase_wraps() {
        let mut fx = Rainbow::new(1.0, 8.0);
        for _ in 0..10 {
            fx.next_frame(0.35);
        }
        assert!((0.0..1.0).contains(&fx.phase));
    }

    #[test]
    fn hsv_primaries() {
        // Compare quantized bytes; f32 hue math leaves sub-quantum residue.
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0).quantize(), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0).quantize(), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0).quantize(), [0, 0, 255]);
        // Hue wraps.
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
    }
}
