//! Turns a body name and asset path into exactly one visual.
//!
//! Loading goes through the engine's asset loader. Anything that goes wrong
//! along the way ends in a placeholder sphere, so resolution has no error case.

use std::task::Poll;

use orrery_engine::{AssetLoader, Color, LoadedModel, MeshComponent, ModelComponent, Visual};

use crate::bodies::{style_for_name, BodyStyle, DEFAULT_STYLE};

/// Phong exponent of placeholder spheres.
pub const PLACEHOLDER_SHININESS: f32 = 25.0;

/// A resolved visual and the uniform scale to spawn it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub visual: Visual,
    pub scale: f32,
}

/// Placeholder sphere for `name`, styled from the style table.
pub fn placeholder(name: &str) -> Renderable {
    placeholder_from_style(style_for_name(name))
}

/// Placeholder sphere for a style record. A record with an unusable size
/// degrades to the default size and color, without glow.
pub fn placeholder_from_style(style: &BodyStyle) -> Renderable {
    let usable = style.size.is_finite() && style.size > 0.0;
    let (size, color, glows) = if usable {
        (style.size, style.color, style.light_source)
    } else {
        log::warn!("Unusable placeholder size {}, using default sphere", style.size);
        (DEFAULT_STYLE.size, DEFAULT_STYLE.color, false)
    };

    let color = Color::from_hex(color);
    let mut mesh = MeshComponent::sphere(size, color).with_shininess(PLACEHOLDER_SHININESS);
    if glows {
        mesh = mesh.with_emissive(color);
    }
    Renderable {
        visual: Visual::Mesh(mesh),
        scale: 1.0,
    }
}

fn from_model(loaded: &LoadedModel, style: &BodyStyle) -> Renderable {
    Renderable {
        visual: Visual::Model(ModelComponent::new(
            loaded.handle,
            loaded.manifest.bounding_radius,
        )),
        scale: style.model_scale,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    NotStarted,
    Requested,
}

/// One pending resolution. Poll it until it is ready; the first poll issues
/// the load.
#[derive(Debug, Clone)]
pub struct ResolveTask {
    name: &'static str,
    path: &'static str,
    state: TaskState,
}

impl ResolveTask {
    pub fn new(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            state: TaskState::NotStarted,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn poll(&mut self, assets: &mut AssetLoader) -> Poll<Renderable> {
        let style = style_for_name(self.name);
        match self.state {
            TaskState::NotStarted => {
                if style.always_placeholder {
                    log::info!("Creating default sphere for {}", self.name);
                    return Poll::Ready(placeholder_from_style(style));
                }
                assets.request(self.path);
                self.state = TaskState::Requested;
                Poll::Pending
            }
            TaskState::Requested => match assets.take(self.path) {
                None => Poll::Pending,
                Some(Ok(loaded)) => Poll::Ready(from_model(&loaded, style)),
                Some(Err(err)) => {
                    log::warn!("Failed to load {} model, creating fallback: {err}", self.name);
                    Poll::Ready(placeholder_from_style(style))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::Shape;

    fn sphere_of(renderable: &Renderable) -> (f32, u32, Option<u32>, f32) {
        match &renderable.visual {
            Visual::Mesh(mesh) => match mesh.shape {
                Shape::Sphere { radius, .. } => (
                    radius,
                    mesh.color.to_hex(),
                    mesh.emissive.map(Color::to_hex),
                    mesh.shininess,
                ),
                other => panic!("expected sphere, got {other:?}"),
            },
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    fn finish(task: &mut ResolveTask, assets: &mut AssetLoader) -> Renderable {
        for _ in 0..4 {
            if let Poll::Ready(r) = task.poll(assets) {
                return r;
            }
            while let Some(path) = assets.next_request() {
                assets.complete(&path, Err("404 Not Found")).unwrap();
            }
        }
        panic!("task never finished");
    }

    #[test]
    fn unknown_name_gets_default_sphere() {
        let r = placeholder("Pluto");
        assert_eq!(sphere_of(&r), (3.0, 0xFFFFFF, None, PLACEHOLDER_SHININESS));
        assert_eq!(r.scale, 1.0);
    }

    #[test]
    fn light_source_glows_in_its_own_color() {
        let (size, color, emissive, _) = sphere_of(&placeholder("sun"));
        assert_eq!(size, 20.0);
        assert_eq!(color, 0xFDB813);
        assert_eq!(emissive, Some(0xFDB813));
    }

    #[test]
    fn unusable_size_degrades_to_neutral_default() {
        for size in [f32::NAN, f32::INFINITY, 0.0, -4.0] {
            let style = BodyStyle {
                size,
                color: 0x123456,
                light_source: true,
                ..DEFAULT_STYLE
            };
            let r = placeholder_from_style(&style);
            assert_eq!(sphere_of(&r), (3.0, 0xFFFFFF, None, PLACEHOLDER_SHININESS));
        }
    }

    #[test]
    fn mars_with_invalid_path_is_red_sphere() {
        let mut assets = AssetLoader::new();
        let mut task = ResolveTask::new("Mars", "no/such/path.json");
        let r = finish(&mut task, &mut assets);
        assert_eq!(sphere_of(&r), (4.0, 0xCD5C5C, None, PLACEHOLDER_SHININESS));
    }

    #[test]
    fn always_placeholder_never_requests() {
        let mut assets = AssetLoader::new();
        let mut task = ResolveTask::new("Mercury", "models/planets/b_mercury/model.json");
        assert!(task.poll(&mut assets).is_ready());
        assert!(assets.is_idle());
    }

    #[test]
    fn failed_load_falls_back_to_styled_sphere() {
        let mut assets = AssetLoader::new();
        let mut task = ResolveTask::new("Earth", "models/planets/d_earth/model.json");
        assert!(task.poll(&mut assets).is_pending());
        let path = assets.next_request().unwrap();
        assert!(task.poll(&mut assets).is_pending(), "still waiting on the host");

        assets.complete(&path, Ok("not json")).unwrap();
        let r = match task.poll(&mut assets) {
            Poll::Ready(r) => r,
            Poll::Pending => panic!("should be ready"),
        };
        assert_eq!(sphere_of(&r).1, 0x6B93D6);
    }

    #[test]
    fn loaded_model_gets_body_scale() {
        let mut assets = AssetLoader::new();
        let mut task = ResolveTask::new("Neptune", "models/planets/i_neptune/model.json");
        assert!(task.poll(&mut assets).is_pending());
        let path = assets.next_request().unwrap();
        assets.complete(&path, Ok(r#"{ "bounding_radius": 20 }"#)).unwrap();

        match task.poll(&mut assets) {
            Poll::Ready(Renderable { visual: Visual::Model(model), scale }) => {
                assert_eq!(model.bounding_radius, 20.0);
                assert_eq!(scale, 0.6);
            }
            other => panic!("expected model, got {other:?}"),
        }
    }

    #[test]
    fn unknown_body_model_keeps_unit_scale() {
        let mut assets = AssetLoader::new();
        let mut task = ResolveTask::new("Pluto", "models/pluto.json");
        assert!(task.poll(&mut assets).is_pending());
        let path = assets.next_request().unwrap();
        assets.complete(&path, Ok(r#"{ "bounding_radius": 1 }"#)).unwrap();
        match task.poll(&mut assets) {
            Poll::Ready(r) => assert_eq!(r.scale, 1.0),
            Poll::Pending => panic!("should be ready"),
        }
    }
}
