//! WebGPU rendering for the scroll companion
//!
//! Every primitive is a screen-aligned quad; the fragment shader turns it
//! into a solid or softly glowing disc.

pub mod companion;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use companion::{CompanionRenderer, CompanionScene};
pub use pipeline::RenderState;
pub use vertex::Vertex;
