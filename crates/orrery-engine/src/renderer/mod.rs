pub mod camera;
pub mod controls;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{DrawTiming, FrameData, RenderSurface};
