mod component;
pub mod config;
mod generate;
mod geometry;
mod group;
mod render;
mod state;

pub use component::ConstellationCanvas;
pub use config::{ConstellationConfig, GenerationStrategy};
