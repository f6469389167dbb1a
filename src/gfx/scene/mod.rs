//! # Scene Composition Module
//!
//! This module turns vehicle state into draw commands. Vehicles are fixed
//! transform hierarchies of unit primitives: each part's world matrix is the
//! product of its ancestors' transforms and its own `T * R * S`.
//!
//! ## Key Components
//!
//! - [`Scene`] - Vehicle states, driving model and the per-frame draw list
//! - [`BusState`] / [`HoverState`] - Interactive toggles and animation phases
//! - [`DrawSink`] / [`DrawList`] - Receivers of `(shape, world, color)` commands
//! - [`Vertex3D`] - GPU vertex format shared by every primitive mesh
//!
//! ## Usage
//!
//! ```
//! use cgmath::{Matrix4, SquareMatrix};
//! use hoverbus::gfx::scene::{compose_bus, BusState, DrawList};
//!
//! let mut state = BusState::new();
//! state.toggle_front_door();
//!
//! let mut list = DrawList::new();
//! compose_bus(&state, Matrix4::identity(), &mut list);
//! assert!(!list.is_empty());
//! ```

pub mod bus;
pub mod hover_bus;
pub mod scene;
pub mod transform;
pub mod vertex;
pub mod world;

// Re-export main types
pub use bus::{compose_bus, BusState, WINDOW_COUNT};
pub use hover_bus::{compose_hover_bus, HoverState};
pub use scene::Scene;
pub use transform::{pivot, trs, Axis, DrawCommand, DrawList, DrawSink, Rotation};
pub use vertex::{ColorVertex, Vertex3D};
pub use world::compose_world;

/// Which vehicle the scene shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleKind {
    #[default]
    Bus,
    HoverBus,
}

impl VehicleKind {
    pub fn toggled(self) -> Self {
        match self {
            VehicleKind::Bus => VehicleKind::HoverBus,
            VehicleKind::HoverBus => VehicleKind::Bus,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleKind::Bus => "Bus",
            VehicleKind::HoverBus => "Hover bus",
        }
    }
}
