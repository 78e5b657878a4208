pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{AssetHandle, EntityId, GameEvent};
pub use components::entity::{Entity, Visual};
pub use components::mesh::{Color, MeshComponent, Shape};
pub use components::model::ModelComponent;
pub use core::scene::Scene;
pub use core::time::Clock;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::controls::OrbitControls;
pub use renderer::traits::{DrawTiming, FrameData, RenderSurface};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::loader::{AssetError, AssetLoader, AssetSource, LoadResult, LoadedModel};
pub use assets::manifest::ModelManifest;
pub use assets::registry::ModelRegistry;
pub use bridge::protocol::{FrameCounts, ProtocolLayout, HEADER_FLOATS};
pub use systems::lighting::{PointLight, LightState};
pub use systems::overlay::Overlay;
pub use systems::points::{PointCloud, PointVertex};
pub use systems::raycast::{nearest_hit, raycast, Ray, RayHit};
pub use systems::rng::Rng;
