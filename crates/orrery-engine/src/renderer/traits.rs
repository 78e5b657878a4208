//! Renderer trait for native hosts.
//!
//! In the browser all drawing happens in TypeScript, which reads the same
//! buffers straight out of WASM memory. This trait is the contract for a
//! Rust-side surface (native window, headless capture, tests).

use super::camera::CameraUniform;
use super::instance::RenderInstance;
use crate::systems::lighting::PointLight;
use crate::systems::points::PointVertex;

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawTiming {
    /// Time spent submitting draw calls (microseconds).
    pub draw_us: u32,
}

/// Everything a surface needs to draw one frame.
pub struct FrameData<'a> {
    /// Opaque instances, then transparent ones from `transparent_split`.
    pub instances: &'a [RenderInstance],
    pub transparent_split: u32,
    pub lights: &'a [PointLight],
    /// Ambient RGB, pre-multiplied by intensity.
    pub ambient: [f32; 3],
    pub points: &'a [PointVertex],
    /// Backdrop point color (RGB) and size.
    pub point_color: [f32; 3],
    pub point_size: f32,
    pub camera: CameraUniform,
}

/// A place frames get drawn.
pub trait RenderSurface {
    /// Backend identifier (e.g. "webgl", "wgpu", "headless").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData) -> DrawTiming;

    /// Handle window resize.
    fn resize(&mut self, width: u32, height: u32);
}
