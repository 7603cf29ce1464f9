mod component;
mod render;
mod simulation;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use state::ForceGraphState;
pub use types::{GraphData, GraphLink, GraphNode};
