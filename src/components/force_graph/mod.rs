mod component;
mod handle;
mod render;
mod state;
pub mod style;
mod types;

pub use component::ForceGraphCanvas;
pub use types::GraphData;
