/// Linear RGB intensity triple as produced by effects.
///
/// Channels are nominally in [0, 1] but effects that composite additively may
/// overshoot; clamping happens during quantization, not here.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub fn quantize(self) -> [u8; 3] {
        [
            quantize_channel(self.r),
            quantize_channel(self.g),
            quantize_channel(self.b),
        ]
    }
}

/// Convert one linear channel to an output byte.
///
/// Round half up (`v * 255 + 0.5`, truncated toward zero), then clamp to
/// 0..=255. Deployed controllers were calibrated against exactly this
/// order of operations, so it must not be "fixed".
pub fn quantize_channel(v: f32) -> u8 {
    let scaled = (v * 255.0 + 0.5) as i32;
    scaled.clamp(0, 255) as u8
}
