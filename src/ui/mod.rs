//! # User Interface Module
//!
//! Dear ImGui overlay for the vehicle viewer.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, input capture
//!   and per-frame rendering
//! - [`panel`] - The "Vehicle" panel
//!
//! Pointer events the overlay wants are not forwarded to the vehicle and
//! camera controls. Key presses it wants are dropped, key releases never are.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::{vehicle_panel, PanelView};
