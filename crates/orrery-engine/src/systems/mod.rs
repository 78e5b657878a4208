pub mod lighting;
pub mod overlay;
pub mod points;
pub mod raycast;
pub mod render;
pub mod rng;
