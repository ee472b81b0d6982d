//! wgpu rendering module
//!
//! Draws a single precomputed circle mesh once per ball, offset and tinted
//! through a per-draw uniform.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{circle_fan, fan_indices};
pub use vertex::{BallUniform, Vertex};
