//! # 2D Aeroplane Demo
//!
//! A top-down aeroplane drawn as flat-colored triangles, with an exploded
//! view, stepped rotation, continuous zoom and bounded panning.
//!
//! - [`builder`] - Triangle helpers and the aeroplane mesh
//! - [`state`] - Interactive transform
//! - [`app`] - Window and event loop
//!
//! ```
//! use hoverbus::aeroplane::{build_aeroplane, AeroplaneState};
//!
//! let assembled = build_aeroplane(false);
//! let exploded = build_aeroplane(true);
//! // Drop shadows are only drawn when assembled
//! assert!(assembled.len() > exploded.len());
//!
//! let mut state = AeroplaneState::new();
//! state.change_scale(1.0, 100.0);
//! assert_eq!(state.scale, 3.0);
//! ```

pub mod app;
pub mod builder;
pub mod state;

pub use app::AeroplaneApp;
pub use builder::{add_ellipse, add_nose, add_quad, add_tail, add_triangle, build_aeroplane, PartOffsets};
pub use state::AeroplaneState;
