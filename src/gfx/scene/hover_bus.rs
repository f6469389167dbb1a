//! Hover-bus composer: the bus shell on hover pads, pushed by two flaming rear thrusters.

use cgmath::{Matrix4, Vector3};

use super::bus::{compose_interior, compose_shell, BusState};
use super::transform::{trs, Axis, DrawSink, Rotation};
use crate::gfx::geometry::ShapeKind;

/// Radians per second of the flame flicker.
pub const FLAME_RATE: f32 = 12.0;
/// Radians per second of the hover bob.
pub const HOVER_RATE: f32 = 2.0;

/// Height the hull floats above wheel level.
pub const HOVER_LIFT: f32 = 0.5;
pub const BOB_AMPLITUDE: f32 = 0.08;

const PAD_COLOR: [f32; 3] = [0.2, 0.22, 0.28];
const PAD_RING_COLOR: [f32; 3] = [0.3, 0.8, 1.0];
const NOZZLE_COLOR: [f32; 3] = [0.35, 0.35, 0.4];
const GLOW_COLOR: [f32; 3] = [1.0, 0.8, 0.4];

/// Outer to inner flame layers: (length, width, color).
const FLAME_LAYERS: [(f32, f32, [f32; 3]); 3] = [
    (0.9, 0.5, [1.0, 0.45, 0.1]),
    (0.7, 0.38, [1.0, 0.7, 0.2]),
    (0.5, 0.26, [1.0, 0.95, 0.6]),
];

const PAD_POSITIONS: [(f32, f32); 4] = [(-2.5, -1.1), (-2.5, 1.1), (3.0, -1.1), (3.0, 1.1)];
const THRUSTER_Z: [f32; 2] = [-0.9, 0.9];
const NOZZLE_X: f32 = 4.3;

/// Animation phases of the hover bus. Both only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    pub flame_phase: f32,
    pub hover_phase: f32,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.flame_phase += FLAME_RATE * dt;
        self.hover_phase += HOVER_RATE * dt;
    }

    /// Vertical offset of the hull relative to a wheeled bus.
    pub fn hover_offset(&self) -> f32 {
        HOVER_LIFT + BOB_AMPLITUDE * self.hover_phase.sin()
    }

    /// Length multiplier of flame layer `layer`, in [0.85, 1.15].
    pub fn flame_scale(&self, layer: usize) -> f32 {
        1.0 + 0.15 * (self.flame_phase + layer as f32 * 1.3).sin()
    }

    pub fn glow_scale(&self) -> f32 {
        1.0 + 0.1 * (self.flame_phase * 1.7).sin()
    }
}

/// Emits the hover bus: bobbing hull, pads and thrusters.
pub fn compose_hover_bus(
    bus: &BusState,
    hover: &HoverState,
    parent: Matrix4<f32>,
    sink: &mut impl DrawSink,
) {
    let hull = parent * Matrix4::from_translation(Vector3::new(0.0, hover.hover_offset(), 0.0));

    compose_shell(bus, hull, sink);
    compose_interior(bus, hull, sink);

    for (x, z) in PAD_POSITIONS {
        sink.draw(
            ShapeKind::Cylinder,
            hull * trs(
                Vector3::new(x, -1.15, z),
                Rotation::identity(),
                Vector3::new(1.0, 0.2, 1.0),
            ),
            PAD_COLOR,
        );
        sink.draw(
            ShapeKind::Torus,
            hull * trs(
                Vector3::new(x, -1.25, z),
                Rotation::identity(),
                Vector3::new(1.8, 1.8, 1.8),
            ),
            PAD_RING_COLOR,
        );
    }

    for z in THRUSTER_Z {
        compose_thruster(hover, hull, z, sink);
    }
}

/// Nozzle along +X, layered flame cones and the glow ball at the exhaust.
fn compose_thruster(hover: &HoverState, hull: Matrix4<f32>, z: f32, sink: &mut impl DrawSink) {
    sink.draw(
        ShapeKind::Cylinder,
        hull * trs(
            Vector3::new(NOZZLE_X, 0.0, z),
            Rotation::about(Axis::Z, 90.0),
            Vector3::new(0.7, 0.6, 0.7),
        ),
        NOZZLE_COLOR,
    );

    let exhaust = NOZZLE_X + 0.3;
    for (layer, (length, width, color)) in FLAME_LAYERS.into_iter().enumerate() {
        let length = length * hover.flame_scale(layer);
        // Cone apex is +Y, turned to point backwards along +X
        sink.draw(
            ShapeKind::Cone,
            hull * trs(
                Vector3::new(exhaust + length * 0.5, 0.0, z),
                Rotation::about(Axis::Z, -90.0),
                Vector3::new(width, length, width),
            ),
            color,
        );
    }

    let glow = 0.45 * hover.glow_scale();
    sink.draw(
        ShapeKind::Sphere,
        hull * trs(
            Vector3::new(exhaust + 0.05, 0.0, z),
            Rotation::identity(),
            Vector3::new(glow, glow, glow),
        ),
        GLOW_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::DrawList;
    use cgmath::{Point3, SquareMatrix, Transform};

    #[test]
    fn phases_advance_at_fixed_rates() {
        let mut hover = HoverState::new();
        hover.update(0.5);
        assert!((hover.flame_phase - 6.0).abs() < 1e-6);
        assert!((hover.hover_phase - 1.0).abs() < 1e-6);
    }

    #[test]
    fn phases_never_decrease() {
        let mut hover = HoverState::new();
        let mut last = hover;
        for dt in [0.016, -0.2, 0.0, f32::NAN, 0.033, f32::INFINITY, 0.1] {
            hover.update(dt);
            assert!(hover.flame_phase >= last.flame_phase);
            assert!(hover.hover_phase >= last.hover_phase);
            last = hover;
        }
        assert!(hover.flame_phase.is_finite());
    }

    #[test]
    fn flame_scales_stay_in_band() {
        let mut hover = HoverState::new();
        for _ in 0..200 {
            hover.update(0.037);
            for layer in 0..FLAME_LAYERS.len() {
                let s = hover.flame_scale(layer);
                assert!((0.85 - 1e-6..=1.15 + 1e-6).contains(&s));
            }
        }
    }

    #[test]
    fn hover_bus_has_pads_and_thrusters_but_no_wheels() {
        let mut list = DrawList::new();
        compose_hover_bus(
            &BusState::new(),
            &HoverState::new(),
            Matrix4::identity(),
            &mut list,
        );

        // 24 shell + 34 interior + 8 pad parts + 2 x (nozzle + 3 flames + glow)
        assert_eq!(list.len(), 76);
        assert_eq!(list.count(ShapeKind::Cone), 6);
        assert_eq!(list.count(ShapeKind::Sphere), 2);
        // steering wheel + 4 pad rings
        assert_eq!(list.count(ShapeKind::Torus), 5);
        // steering column + fan hub + 4 pads + 2 nozzles
        assert_eq!(list.count(ShapeKind::Cylinder), 8);
    }

    #[test]
    fn flames_point_backwards() {
        let hover = HoverState::new();
        let mut list = DrawList::new();
        compose_thruster(&hover, Matrix4::identity(), 0.9, &mut list);

        let apex = Point3::new(0.0, 0.5, 0.0);
        let base = Point3::new(0.0, -0.5, 0.0);
        for cone in list.iter().filter(|c| c.shape == ShapeKind::Cone) {
            let tip = cone.model.transform_point(apex);
            let root = cone.model.transform_point(base);
            assert!(tip.x > root.x);
            assert!((tip.z - 0.9).abs() < 1e-5);
        }
    }

    #[test]
    fn hull_bobs_around_lift_height() {
        let mut hover = HoverState::new();
        for _ in 0..100 {
            hover.update(0.05);
            let offset = hover.hover_offset();
            assert!(offset >= HOVER_LIFT - BOB_AMPLITUDE - 1e-6);
            assert!(offset <= HOVER_LIFT + BOB_AMPLITUDE + 1e-6);
        }
    }
}
