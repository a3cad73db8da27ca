//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat triangle list in screen
//! pixels and mapped to NDC on upload.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
