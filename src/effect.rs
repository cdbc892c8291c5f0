use crate::{color::LinearRgb, layout::PixelInfo};

/// A pluggable per-pixel animation strategy.
///
/// The runner calls [`next_frame`](Effect::next_frame) exactly once per frame
/// (before any pixel, even when the layout is empty), then
/// [`calculate_pixel`](Effect::calculate_pixel) once per active pixel.
pub trait Effect {
    /// Advance internal animation state by `time_delta` seconds.
    fn next_frame(&mut self, time_delta: f32) {
        let _ = time_delta;
    }

    /// Compute one pixel's color from the current state, the pixel's
    /// position, and its raw layout metadata.
    ///
    /// Must be deterministic given the same internal state and callable for
    /// pixels in any order. Results may overshoot [0, 1]; the runner clamps
    /// during quantization, so additive compositing keeps full precision.
    fn calculate_pixel(&self, pixel: &PixelInfo, meta: &serde_json::Value) -> LinearRgb;
}
