//! Backdrop point cloud (starfield).

use bytemuck::{Pod, Zeroable};

use crate::components::mesh::Color;
use crate::systems::rng::Rng;

/// One backdrop point. Wire format: `[x, y, z]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PointVertex {
    pub const FLOATS: usize = 3;
}

/// A static set of points drawn with one color and size.
/// Not part of the scene: points are never picked or animated.
#[derive(Debug, Clone)]
pub struct PointCloud {
    points: Vec<PointVertex>,
    pub color: Color,
    /// Point size in world units.
    pub size: f32,
}

impl PointCloud {
    /// Replace the cloud with `count` points uniform in a cube of half-edge
    /// `extent` centered on the origin.
    pub fn scatter(&mut self, count: usize, extent: f32, rng: &mut Rng) {
        self.points.clear();
        self.points.reserve(count);
        for _ in 0..count {
            self.points.push(PointVertex {
                x: rng.symmetric(extent),
                y: rng.symmetric(extent),
                z: rng.symmetric(extent),
            });
        }
    }

    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            color: Color::WHITE,
            size: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_fills_cube() {
        let mut cloud = PointCloud::default();
        cloud.scatter(1000, 1500.0, &mut Rng::new(1));
        assert_eq!(cloud.len(), 1000);
        assert!(cloud
            .points()
            .iter()
            .all(|p| p.x.abs() <= 1500.0 && p.y.abs() <= 1500.0 && p.z.abs() <= 1500.0));
    }

    #[test]
    fn scatter_replaces_previous_points() {
        let mut cloud = PointCloud::default();
        cloud.scatter(10, 1.0, &mut Rng::new(1));
        cloud.scatter(3, 1.0, &mut Rng::new(1));
        assert_eq!(cloud.len(), 3);
    }

    #[test]
    fn same_seed_same_sky() {
        let mut a = PointCloud::default();
        let mut b = PointCloud::default();
        a.scatter(50, 10.0, &mut Rng::new(99));
        b.scatter(50, 10.0, &mut Rng::new(99));
        assert_eq!(a.points(), b.points());
    }
}
