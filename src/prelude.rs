//! # Hoverbus Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use hoverbus::prelude::*;
//!
//! fn main() -> hoverbus::Result<()> {
//!     let config = ViewerConfig::default()
//!         .with_vehicle(VehicleKind::HoverBus)
//!         .with_layout(ViewportLayout::Quad);
//!     HoverbusApp::new(config)?.run()
//! }
//! ```

pub use crate::aeroplane::{build_aeroplane, AeroplaneApp, AeroplaneState};
pub use crate::app::{HoverbusApp, ViewerState};
pub use crate::config::{AeroplaneConfig, ViewerConfig};
pub use crate::error::{HoverbusError, Result};
pub use crate::gfx::{
    camera::{Camera, FlyCamera},
    geometry::{ShapeKind, ShapeLibrary, Tessellation},
    resources::LightingState,
    scene::{DrawCommand, DrawList, Scene, VehicleKind},
    viewport::{layout_viewports, ViewportLayout},
};
pub use crate::input::{Action, AeroplaneAction, InputManager};
pub use crate::simulation::{DriveInput, DriveParams, DriveState};

pub use cgmath::{Matrix4, Vector3};
