//! Core rendering functionality
//!
//! Handles render pipelines, GPU resource management, and frame rendering.

pub mod flat_renderer;
pub mod instanced_renderer;
pub mod pipeline_manager;
pub mod render_engine;
pub mod vehicle_renderer;

// Re-export main types
pub use flat_renderer::FlatRenderer;
pub use instanced_renderer::{batch_commands, InstanceData, InstancedRenderer};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use vehicle_renderer::VehicleRenderer;
