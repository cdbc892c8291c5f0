use std::{
    path::Path,
    thread,
    time::{Duration, Instant},
};

use crate::{
    color::LinearRgb,
    effect::Effect,
    error::{OpcfxError, OpcfxResult},
    layout::{Layout, PixelInfo},
    opc::{self, TcpTransport, Transport},
};

/// Longest time step an effect will ever observe, in seconds.
///
/// A stall (startup, debugger pause, system sleep) produces one clamped step
/// instead of a giant, visually jarring jump.
pub const MAX_TIME_DELTA: f32 = 0.1;

/// OPC payload lengths are 16-bit, at 3 bytes per pixel.
pub const MAX_PIXELS: usize = (u16::MAX as usize) / 3;

/// Drives an [`Effect`] over a pixel [`Layout`] and streams frames to a
/// transport at a bounded rate.
///
/// Single-threaded by design: the only suspension point is the rate-limiting
/// sleep at the end of a frame step. Construction before configuration is
/// safe; with no layout or no effect, a frame step is a complete no-op.
pub struct EffectRunner<'fx> {
    min_time_delta: f32,
    last_frame: Option<Instant>,
    layout: Option<Layout>,
    pixels: Vec<PixelInfo>,
    frame_buffer: Vec<u8>,
    effect: Option<&'fx mut dyn Effect>,
    transport: Box<dyn Transport>,
}

impl Default for EffectRunner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'fx> EffectRunner<'fx> {
    pub fn new() -> Self {
        Self::with_transport(Box::new(TcpTransport::new()))
    }

    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            min_time_delta: 0.0,
            last_frame: None,
            layout: None,
            pixels: Vec::new(),
            frame_buffer: Vec::new(),
            effect: None,
            transport,
        }
    }

    /// Resolve the OPC server address (`HOST` or `HOST:PORT`).
    pub fn set_server(&mut self, hostport: &str) -> OpcfxResult<()> {
        self.transport.resolve(hostport)
    }

    /// Cap the frame rate. The runner never renders faster than `fps`
    /// frames per second; it may render slower.
    pub fn set_max_frame_rate(&mut self, fps: f32) -> OpcfxResult<()> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(OpcfxError::validation("max frame rate must be > 0"));
        }
        self.min_time_delta = fps.recip();
        Ok(())
    }

    /// Load a layout file and rebuild the pixel list and frame buffer.
    ///
    /// On any failure the previous layout stays in effect.
    pub fn set_layout(&mut self, path: &Path) -> OpcfxResult<()> {
        let layout = Layout::from_path(path)?;
        self.install_layout(layout)
    }

    /// Install an already-parsed layout. Replaces the pixel list and resizes
    /// the frame buffer atomically; the header is written once here and only
    /// payload bytes change per frame.
    pub fn install_layout(&mut self, layout: Layout) -> OpcfxResult<()> {
        if layout.len() > MAX_PIXELS {
            return Err(OpcfxError::layout(format!(
                "{} pixels exceeds the OPC frame limit of {MAX_PIXELS}",
                layout.len()
            )));
        }

        let pixels = layout.pixels();
        let payload_len = (pixels.len() * 3) as u16;
        let mut frame_buffer = vec![0u8; opc::HEADER_LEN + payload_len as usize];
        opc::write_header(
            &mut frame_buffer,
            opc::BROADCAST_CHANNEL,
            opc::SET_PIXEL_COLORS,
            payload_len,
        );

        tracing::info!(pixels = pixels.len(), "layout installed");
        self.layout = Some(layout);
        self.pixels = pixels;
        self.frame_buffer = frame_buffer;
        Ok(())
    }

    /// Set the active effect. The runner borrows it; its animation state
    /// remains inspectable by the caller once the runner is dropped.
    pub fn set_effect(&mut self, effect: &'fx mut dyn Effect) {
        self.effect = Some(effect);
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn pixels(&self) -> &[PixelInfo] {
        &self.pixels
    }

    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// One frame driven by the wall clock: measure the elapsed time since
    /// the previous step, clamp it to [`MAX_TIME_DELTA`], and render. The
    /// first step, having no predecessor, uses the clamp value.
    pub fn step(&mut self) {
        let now = Instant::now();
        let time_delta = match self.last_frame {
            Some(prev) => now.duration_since(prev).as_secs_f32().min(MAX_TIME_DELTA),
            None => MAX_TIME_DELTA,
        };
        self.last_frame = Some(now);
        self.step_with(time_delta);
    }

    /// One frame with an explicit time delta, for deterministic use.
    ///
    /// Renders every pixel into the frame buffer, hands the buffer to the
    /// transport, then sleeps off any remainder of the minimum frame
    /// interval. No-op until both an effect and a layout are configured.
    pub fn step_with(&mut self, time_delta: f32) {
        let (Some(effect), Some(layout)) = (self.effect.as_deref_mut(), self.layout.as_ref())
        else {
            return;
        };

        effect.next_frame(time_delta);

        for pixel in &self.pixels {
            let rgb = if pixel.active {
                effect.calculate_pixel(pixel, layout.entry(pixel.index))
            } else {
                LinearRgb::BLACK
            };
            let at = opc::HEADER_LEN + pixel.index * 3;
            self.frame_buffer[at..at + 3].copy_from_slice(&rgb.quantize());
        }

        self.transport.write_frame(&self.frame_buffer);

        if time_delta < self.min_time_delta {
            thread::sleep(Duration::from_secs_f32(self.min_time_delta - time_delta));
        }
    }

    /// Render frames forever. Termination is by process kill.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }
}
