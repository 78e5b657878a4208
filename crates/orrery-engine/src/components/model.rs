use crate::api::types::AssetHandle;

/// A host-rendered model, referenced by the handle the asset loader assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelComponent {
    pub handle: AssetHandle,
    /// Enclosing-sphere radius in model units (before entity scale).
    pub bounding_radius: f32,
}

impl ModelComponent {
    pub fn new(handle: AssetHandle, bounding_radius: f32) -> Self {
        Self { handle, bounding_radius }
    }
}
