use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::mesh::{MeshComponent, Shape};
use crate::components::model::ModelComponent;

/// The one renderable an entity owns.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Engine-described primitive (sphere, ring, dashed circle).
    Mesh(MeshComponent),
    /// Host-rendered model loaded from a manifest.
    Model(ModelComponent),
}

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Euler rotation (x, y, z) in radians.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Visual. Entities without one are invisible and unpickable.
    pub visual: Option<Visual>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            visual: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = Some(visual);
        self
    }

    /// World-space radius of the sphere used for ray picking.
    /// `None` for entities that cannot be picked (no visual, flat outlines).
    pub fn bounding_radius(&self) -> Option<f32> {
        let local = match self.visual.as_ref()? {
            Visual::Mesh(mesh) => match mesh.shape {
                Shape::Sphere { radius, .. } => radius,
                Shape::Ring { .. } | Shape::DashedCircle { .. } => return None,
            },
            Visual::Model(model) => model.bounding_radius,
        };
        Some(local * self.scale.abs().max_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AssetHandle;
    use crate::components::mesh::Color;

    #[test]
    fn sphere_bounding_radius_follows_scale() {
        let e = Entity::new(EntityId(1))
            .with_uniform_scale(2.0)
            .with_visual(Visual::Mesh(MeshComponent::sphere(3.0, Color::WHITE)));
        assert_eq!(e.bounding_radius(), Some(6.0));
    }

    #[test]
    fn model_bounding_radius_follows_scale() {
        let e = Entity::new(EntityId(1))
            .with_uniform_scale(0.1)
            .with_visual(Visual::Model(ModelComponent::new(AssetHandle(0), 40.0)));
        let r = e.bounding_radius().unwrap();
        assert!((r - 4.0).abs() < 1e-5);
    }

    #[test]
    fn rings_and_empty_entities_are_not_pickable() {
        let ring = Entity::new(EntityId(1))
            .with_visual(Visual::Mesh(MeshComponent::ring(9.5, 10.5, Color::WHITE)));
        assert_eq!(ring.bounding_radius(), None);
        assert_eq!(Entity::new(EntityId(2)).bounding_radius(), None);
    }
}
