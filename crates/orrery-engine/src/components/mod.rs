pub mod entity;
pub mod mesh;
pub mod model;
