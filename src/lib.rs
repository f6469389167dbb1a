//! Hoverbus
//!
//! A real-time viewer for a procedurally built city bus and its flying
//! hover-bus variant, plus a small 2D aeroplane demo, on wgpu and winit.
//!
//! Everything a frame draws is a list of primitive shapes with world
//! transforms. The vehicles are composed from hinged transform hierarchies
//! that follow the interactive state (doors, windows, fan, lights).

pub mod aeroplane;
pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod prelude;
pub mod simulation;
pub mod ui;
pub mod wgpu_utils;

pub use app::HoverbusApp;
pub use error::{HoverbusError, Result};

/// Runs the bus viewer with default settings.
pub fn run() -> Result<()> {
    HoverbusApp::new(config::ViewerConfig::default())?.run()
}
