//! WGPU utility functions and helpers
//!
//! Provides convenient wrappers and builders for common wgpu operations.

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::{ArrayBuffer, UniformBuffer};
