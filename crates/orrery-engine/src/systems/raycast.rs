//! Ray casting against entity bounding spheres.

use glam::Vec3;

use crate::api::types::EntityId;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length (zero for a degenerate ray, which never hits).
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Distance along `ray` to the first intersection with a sphere, if any.
/// A ray starting inside the sphere hits its far side.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    if radius <= 0.0 || ray.direction == Vec3::ZERO {
        return None;
    }
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// Every active entity with a pickable visual that `ray` hits, nearest first.
pub fn raycast(ray: &Ray, scene: &Scene) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = scene
        .iter()
        .filter(|e| e.active)
        .filter_map(|e| {
            let radius = e.bounding_radius()?;
            let distance = intersect_sphere(ray, e.pos, radius)?;
            Some(RayHit {
                id: e.id,
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

pub fn nearest_hit(ray: &Ray, scene: &Scene) -> Option<RayHit> {
    raycast(ray, scene).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::{Entity, Visual};
    use crate::components::mesh::{Color, MeshComponent};

    fn ball(scene: &mut Scene, id: u32, pos: Vec3, radius: f32) -> EntityId {
        scene.spawn(
            Entity::new(EntityId(id))
                .with_pos(pos)
                .with_visual(Visual::Mesh(MeshComponent::sphere(radius, Color::WHITE))),
        )
    }

    #[test]
    fn sphere_in_front_is_hit_at_near_surface() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = intersect_sphere(&ray, Vec3::new(0.0, 0.0, -10.0), 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_is_missed() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(intersect_sphere(&ray, Vec3::new(0.0, 0.0, 10.0), 2.0).is_none());
    }

    #[test]
    fn ray_inside_sphere_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_sphere(&ray, Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_ray_never_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(intersect_sphere(&ray, Vec3::ZERO, 3.0).is_none());
    }

    #[test]
    fn raycast_sorts_nearest_first() {
        let mut scene = Scene::new();
        let far = ball(&mut scene, 1, Vec3::new(0.0, 0.0, -50.0), 2.0);
        let near = ball(&mut scene, 2, Vec3::new(0.0, 0.0, -20.0), 2.0);
        ball(&mut scene, 3, Vec3::new(40.0, 0.0, -20.0), 2.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hits = raycast(&ray, &scene);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, near);
        assert_eq!(hits[1].id, far);
        assert_eq!(nearest_hit(&ray, &scene).map(|h| h.id), Some(near));
    }

    #[test]
    fn inactive_and_visual_less_entities_are_skipped() {
        let mut scene = Scene::new();
        let id = ball(&mut scene, 1, Vec3::new(0.0, 0.0, -20.0), 2.0);
        scene.get_mut(id).unwrap().active = false;
        scene.spawn(Entity::new(EntityId(2)).with_pos(Vec3::new(0.0, 0.0, -10.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(nearest_hit(&ray, &scene).is_none());
    }
}
