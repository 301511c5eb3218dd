//! WebGPU rendering module
//!
//! Every frame is tessellated on the CPU into a colored triangle list and
//! drawn in a single pass.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
