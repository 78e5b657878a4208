use crate::api::types::AssetHandle;

/// Registry of successfully loaded models.
/// Maps the handles given to game code back to the asset paths the host
/// fetched, so the renderer knows which model to draw for an instance.
pub struct ModelRegistry {
    paths: Vec<String>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Register a loaded path. Registering the same path twice returns the
    /// existing handle.
    pub fn register(&mut self, path: &str) -> AssetHandle {
        if let Some(idx) = self.paths.iter().position(|p| p == path) {
            return AssetHandle(idx as u32);
        }
        self.paths.push(path.to_owned());
        AssetHandle(self.paths.len() as u32 - 1)
    }

    /// Look up the path for a handle. Returns None if unknown.
    pub fn path(&self, handle: AssetHandle) -> Option<&str> {
        self.paths.get(handle.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
