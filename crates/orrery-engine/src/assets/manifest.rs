use serde::{Deserialize, Serialize};

/// Description of a loadable 3D model.
/// Fetched as JSON by the host; the host renders the nodes, the engine only
/// needs the bounds for placement and picking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Radius of a sphere enclosing the whole model, in model units.
    pub bounding_radius: f32,
    /// Mesh nodes making up the model.
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
}

/// One mesh node inside a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Human-readable name (e.g., "atmosphere").
    pub name: String,
    /// Relative path to the mesh binary (e.g., "earth.bin").
    pub mesh: String,
    /// Optional texture path.
    #[serde(default)]
    pub texture: Option<String>,
    /// Node-local uniform scale (default: 1).
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl ModelManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether the bounds are usable for placement and picking.
    pub fn has_valid_bounds(&self) -> bool {
        self.bounding_radius.is_finite() && self.bounding_radius > 0.0
    }
}
