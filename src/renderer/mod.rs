//! WebGPU rendering module
//!
//! Turns a read-only [`crate::sim::RenderFrame`] into flat-colored quads.
//! Text (score, timer, end-of-round message) is left to the HUD.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, field_to_ndc};
pub use shapes::frame_vertices;
pub use vertex::Vertex;
