use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod composer;
pub mod game;
pub mod motion;
pub mod picking;
pub mod resolver;

orrery_web::export_game!(game::SolarSystem, "solar-system");
