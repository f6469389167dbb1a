//! GPU resource management
//!
//! Handles the depth buffer and the global uniform bind groups.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUniform, LightingState, LIGHT_POSITION};
pub use texture_resource::TextureResource;
