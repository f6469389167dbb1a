//! # Graphics Module
//!
//! This module contains all graphics-related functionality of the viewer:
//! procedural meshes, vehicle composition, cameras, viewports and the wgpu
//! rendering layer.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Unit primitive meshes, built once at startup
//! - **Scene** ([`scene`]) - Vehicle state and transform composition into draw lists
//! - **Camera System** ([`camera`]) - Fly camera with orbit mode
//! - **Viewports** ([`viewport`]) - Single and quad view layouts
//! - **Rendering Pipeline** ([`rendering`]) - Instanced Phong rendering and the flat 2D renderer
//! - **Resource Management** ([`resources`]) - Depth buffer and global uniforms
//!
//! Geometry, scene, camera and viewport code is GPU-free; only [`rendering`]
//! and [`resources`] touch wgpu objects.
//!
//! ## Usage
//!
//! ```
//! use hoverbus::gfx::{geometry::{ShapeLibrary, Tessellation}, scene::{Scene, VehicleKind}};
//! use hoverbus::simulation::drive::DriveParams;
//!
//! let library = ShapeLibrary::new(&Tessellation::coarse());
//! let mut scene = Scene::new(VehicleKind::HoverBus, DriveParams::default());
//! let draw_list = scene.compose();
//! assert!(draw_list.iter().all(|cmd| library.mesh(cmd.shape).vertex_count() > 0));
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod viewport;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
pub use viewport::{layout_viewports, Viewport, ViewportLayout};
