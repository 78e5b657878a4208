//! Pull-based asset loading.
//!
//! The engine never performs IO itself. Game code calls [`AssetLoader::request`];
//! the host picks requests up with [`AssetLoader::next_request`], fetches them,
//! and reports back through [`AssetLoader::complete`]. Results wait in the
//! loader until game code collects them with [`AssetLoader::take`].

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::api::types::AssetHandle;
use crate::assets::manifest::ModelManifest;
use crate::assets::registry::ModelRegistry;

/// Why a model could not be turned into something renderable.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The host could not fetch the asset (404, network error, ...).
    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },
    /// The asset was fetched but is not a model manifest.
    #[error("malformed model manifest {path}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The manifest parsed but its bounds are unusable.
    #[error("model manifest {path} has unusable bounding radius {radius}")]
    InvalidBounds { path: String, radius: f32 },
    /// The host reported a completion nobody asked for.
    #[error("completion reported for {path}, which was never requested")]
    Unrequested { path: String },
}

/// A model that loaded and validated.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub handle: AssetHandle,
    pub manifest: ModelManifest,
}

pub type LoadResult = Result<LoadedModel, AssetError>;

/// Something that can produce asset bodies synchronously
/// (native hosts, tests). Browser hosts go through `next_request`/`complete`.
pub trait AssetSource {
    fn fetch(&mut self, path: &str) -> Result<String, String>;
}

impl AssetSource for HashMap<String, String> {
    fn fetch(&mut self, path: &str) -> Result<String, String> {
        self.get(path)
            .cloned()
            .ok_or_else(|| format!("{path} not found"))
    }
}

pub struct AssetLoader {
    /// Requested, not yet picked up by the host.
    queued: VecDeque<String>,
    /// Picked up by the host, awaiting completion.
    in_flight: Vec<String>,
    finished: HashMap<String, LoadResult>,
    models: ModelRegistry,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            in_flight: Vec::new(),
            finished: HashMap::new(),
            models: ModelRegistry::new(),
        }
    }

    /// Ask the host to load `path`.
    pub fn request(&mut self, path: &str) {
        log::debug!("Requesting {path}");
        self.queued.push_back(path.to_owned());
    }

    /// Hand the oldest queued request to the host.
    pub fn next_request(&mut self) -> Option<String> {
        let path = self.queued.pop_front()?;
        self.in_flight.push(path.clone());
        Some(path)
    }

    /// True when nothing is queued or in flight.
    pub fn is_idle(&self) -> bool {
        self.queued.is_empty() && self.in_flight.is_empty()
    }

    /// Host-reported download progress. Logging only.
    pub fn progress(&self, path: &str, loaded: f64, total: f64) {
        if total > 0.0 {
            log::info!("Loading {path}: {:.2}%", loaded / total * 100.0);
        }
    }

    /// Record the outcome of a request: `Ok(body)` with the fetched text or
    /// `Err(reason)` from the host. Parsing and validation happen here, so a
    /// successful fetch of garbage still ends up as an `AssetError`.
    pub fn complete(&mut self, path: &str, outcome: Result<&str, &str>) -> Result<(), AssetError> {
        if !self.take_outstanding(path) {
            let err = AssetError::Unrequested { path: path.to_owned() };
            log::warn!("{err}");
            return Err(err);
        }

        let result = match outcome {
            Ok(body) => self.parse(path, body),
            Err(reason) => Err(AssetError::Load {
                path: path.to_owned(),
                reason: reason.to_owned(),
            }),
        };
        match &result {
            Ok(_) => log::info!("Successfully loaded {path}"),
            Err(err) => log::error!("Error loading {path}: {err}"),
        }
        self.finished.insert(path.to_owned(), result);
        Ok(())
    }

    /// Collect the result for `path`, if it has finished.
    pub fn take(&mut self, path: &str) -> Option<LoadResult> {
        self.finished.remove(path)
    }

    /// Serve every queued request from `source` immediately.
    /// Returns the number of requests served.
    pub fn serve(&mut self, source: &mut impl AssetSource) -> usize {
        let mut served = 0;
        while let Some(path) = self.next_request() {
            let fetched = source.fetch(&path);
            // `path` was just moved in flight, so this cannot be Unrequested.
            let _ = self.complete(&path, fetched.as_deref().map_err(String::as_str));
            served += 1;
        }
        served
    }

    /// Handles of everything loaded so far.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    fn take_outstanding(&mut self, path: &str) -> bool {
        if let Some(idx) = self.in_flight.iter().position(|p| p == path) {
            self.in_flight.swap_remove(idx);
            return true;
        }
        if let Some(idx) = self.queued.iter().position(|p| p == path) {
            self.queued.remove(idx);
            return true;
        }
        false
    }

    fn parse(&mut self, path: &str, body: &str) -> LoadResult {
        let manifest = ModelManifest::from_json(body).map_err(|source| AssetError::Malformed {
            path: path.to_owned(),
            source,
        })?;
        if !manifest.has_valid_bounds() {
            return Err(AssetError::InvalidBounds {
                path: path.to_owned(),
                radius: manifest.bounding_radius,
            });
        }
        let handle = self.models.register(path);
        Ok(LoadedModel { handle, manifest })
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}
