//! # Bus Composer
//!
//! Hardcoded transform hierarchy of the city bus. The bus is built around its
//! local origin with the front facing -X, the chassis spanning 8 x 2 x 3 units
//! and the wheels touching y = -1.6.
//!
//! The composer never owns geometry: each part is one `(shape, world, color)`
//! command pushed into a [`DrawSink`].

use cgmath::{Matrix4, Vector3};

use super::transform::{pivot, place, trs, Axis, DrawSink, Rotation};
use crate::gfx::geometry::ShapeKind;

/// Side windows: indices 0..6 on the left (-Z), 6..12 on the right (+Z).
pub const WINDOW_COUNT: usize = 12;
pub const WINDOWS_PER_SIDE: usize = WINDOW_COUNT / 2;

/// Degrees per second of the ceiling fan.
pub const FAN_SPEED: f32 = 200.0;
/// Fully open door angle.
pub const DOOR_OPEN_ANGLE: f32 = 90.0;
/// Distance an open window slides down.
pub const WINDOW_SLIDE: f32 = 0.4;

pub const FRONT_DOOR_HINGE: [f32; 3] = [-3.5, 0.0, 1.5];
pub const MIDDLE_DOOR_HINGE: [f32; 3] = [0.5, 0.0, 1.5];

const BODY_COLOR: [f32; 3] = [0.9, 0.9, 0.9];
const UPPER_BODY_COLOR: [f32; 3] = [0.85, 0.85, 0.85];
const CABIN_COLOR: [f32; 3] = [0.88, 0.88, 0.88];
const ROOF_COLOR: [f32; 3] = [0.95, 0.95, 0.95];
const WINDOW_COLOR: [f32; 3] = [0.3, 0.5, 0.7];
const DOOR_COLOR: [f32; 3] = [0.7, 0.7, 0.7];
const WHEEL_COLOR: [f32; 3] = [0.15, 0.15, 0.15];
const SEAT_COLOR: [f32; 3] = [0.2, 0.3, 0.6];
const FLOOR_COLOR: [f32; 3] = [0.4, 0.35, 0.3];
const STEERING_COLOR: [f32; 3] = [0.1, 0.1, 0.1];
const DASHBOARD_COLOR: [f32; 3] = [0.25, 0.25, 0.25];
const FAN_HUB_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
const FAN_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
const HEADLIGHT_COLOR: [f32; 3] = [1.0, 1.0, 0.7];
const TAILLIGHT_COLOR: [f32; 3] = [0.8, 0.1, 0.1];
const LIGHT_ON_COLOR: [f32; 3] = [1.0, 1.0, 0.8];
const LIGHT_OFF_COLOR: [f32; 3] = [0.3, 0.3, 0.3];

/// Interactive state of the bus, read by the composer every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BusState {
    /// Degrees, 0 closed .. 90 open
    pub front_door_angle: f32,
    pub middle_door_angle: f32,
    /// Open fraction per side window, 0 closed .. 1 open
    pub window_open: [f32; WINDOW_COUNT],
    /// Degrees in [0, 360)
    pub fan_rotation: f32,
    pub fan_spinning: bool,
    pub light_on: bool,
}

impl Default for BusState {
    fn default() -> Self {
        Self {
            front_door_angle: 0.0,
            middle_door_angle: 0.0,
            window_open: [0.0; WINDOW_COUNT],
            fan_rotation: 0.0,
            fan_spinning: false,
            light_on: true,
        }
    }
}

fn snap_door(angle: f32) -> f32 {
    if angle < DOOR_OPEN_ANGLE / 2.0 {
        DOOR_OPEN_ANGLE
    } else {
        0.0
    }
}

impl BusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_front_door(&mut self) {
        self.front_door_angle = snap_door(self.front_door_angle);
    }

    pub fn toggle_middle_door(&mut self) {
        self.middle_door_angle = snap_door(self.middle_door_angle);
    }

    /// Flips one side window between closed and open. Indices past the last
    /// window are ignored.
    pub fn toggle_window(&mut self, index: usize) {
        if let Some(open) = self.window_open.get_mut(index) {
            *open = if *open < 0.5 { 1.0 } else { 0.0 };
        }
    }

    pub fn toggle_fan(&mut self) {
        self.fan_spinning = !self.fan_spinning;
    }

    pub fn toggle_light(&mut self) {
        self.light_on = !self.light_on;
    }

    /// Advances the fan by `FAN_SPEED * dt` when `spinning`, wrapping into [0, 360).
    pub fn update_fan(&mut self, dt: f32, spinning: bool) {
        if spinning && dt.is_finite() && dt > 0.0 {
            self.fan_rotation = (self.fan_rotation + FAN_SPEED * dt).rem_euclid(360.0);
        }
    }

    /// Per-frame update driven by the state's own fan switch.
    pub fn update(&mut self, dt: f32) {
        self.update_fan(dt, self.fan_spinning);
    }

    pub fn open_window_count(&self) -> usize {
        self.window_open.iter().filter(|open| **open >= 0.5).count()
    }
}

/// Translation and scale of side window `index` at open fraction `open`.
///
/// The pane slides down by `0.4 * open` and shrinks by the same amount.
pub fn window_placement(index: usize, open: f32) -> (Vector3<f32>, Vector3<f32>) {
    let column = (index % WINDOWS_PER_SIDE) as f32;
    let side = if index < WINDOWS_PER_SIDE { -1.0 } else { 1.0 };
    let slide = open * WINDOW_SLIDE;

    (
        Vector3::new(-2.0 + column * 1.2, 1.8 - slide, side * 1.41),
        Vector3::new(1.0, 0.9 - slide, 0.05),
    )
}

/// World transform of a door hinged at `hinge`, swung open by `angle` degrees.
///
/// The door's hinge-side edge sits on the pivot, so it maps to `parent * hinge`
/// for every angle.
pub fn door_transform(parent: Matrix4<f32>, hinge: Vector3<f32>, angle: f32) -> Matrix4<f32> {
    let frame = pivot(parent, hinge, Axis::Y, angle);
    frame * trs(
        Vector3::new(0.5, 0.0, 0.0),
        Rotation::identity(),
        Vector3::new(1.0, 1.8, 0.08),
    )
}

/// Emits the full bus: shell, wheels and interior.
pub fn compose_bus(state: &BusState, parent: Matrix4<f32>, sink: &mut impl DrawSink) {
    compose_shell(state, parent, sink);
    compose_wheels(parent, sink);
    compose_interior(state, parent, sink);
}

fn cube(
    sink: &mut impl DrawSink,
    parent: Matrix4<f32>,
    translation: [f32; 3],
    scale: [f32; 3],
    color: [f32; 3],
) {
    sink.draw(
        ShapeKind::Cube,
        place(parent, translation.into(), scale.into()),
        color,
    );
}

/// Body panels, roof, glazing, doors and lights. Everything outside except the wheels.
pub fn compose_shell(state: &BusState, parent: Matrix4<f32>, sink: &mut impl DrawSink) {
    // Main body
    cube(sink, parent, [0.0, 0.0, 0.0], [8.0, 2.0, 3.0], BODY_COLOR);
    cube(sink, parent, [0.5, 1.75, 0.0], [7.0, 1.5, 2.8], UPPER_BODY_COLOR);
    cube(sink, parent, [-4.5, 0.5, 0.0], [1.5, 1.8, 2.8], CABIN_COLOR);
    cube(sink, parent, [0.5, 2.7, 0.0], [7.2, 0.3, 3.0], ROOF_COLOR);

    for (index, open) in state.window_open.iter().enumerate() {
        let (translation, scale) = window_placement(index, *open);
        sink.draw(
            ShapeKind::Cube,
            place(parent, translation, scale),
            WINDOW_COLOR,
        );
    }

    // Windshield and rear window
    cube(sink, parent, [-5.26, 1.0, 0.0], [0.05, 1.5, 2.2], WINDOW_COLOR);
    cube(sink, parent, [4.01, 1.8, 0.0], [0.05, 1.2, 2.0], WINDOW_COLOR);

    sink.draw(
        ShapeKind::Cube,
        door_transform(parent, FRONT_DOOR_HINGE.into(), state.front_door_angle),
        DOOR_COLOR,
    );
    sink.draw(
        ShapeKind::Cube,
        door_transform(parent, MIDDLE_DOOR_HINGE.into(), state.middle_door_angle),
        DOOR_COLOR,
    );

    for z in [-1.0, 1.0] {
        cube(sink, parent, [-5.3, 0.2, z], [0.1, 0.3, 0.4], HEADLIGHT_COLOR);
        cube(sink, parent, [4.01, 0.2, z], [0.1, 0.3, 0.4], TAILLIGHT_COLOR);
    }
}

/// Four wheels: cylinders turned onto the Z axis.
pub fn compose_wheels(parent: Matrix4<f32>, sink: &mut impl DrawSink) {
    for (x, z) in [(-2.5, -1.7), (-2.5, 1.7), (3.0, -1.7), (3.0, 1.7)] {
        let model = parent
            * trs(
                Vector3::new(x, -1.0, z),
                Rotation::about(Axis::X, 90.0),
                Vector3::new(1.2, 0.4, 1.2),
            );
        sink.draw(ShapeKind::Cylinder, model, WHEEL_COLOR);
    }
}

fn seat(parent: Matrix4<f32>, x: f32, side: f32, sink: &mut impl DrawSink) {
    const SEAT_Y: f32 = -0.3;
    sink.draw(
        ShapeKind::Cube,
        place(parent, Vector3::new(x, SEAT_Y, side * 0.9), Vector3::new(0.8, 0.4, 0.8)),
        SEAT_COLOR,
    );
    sink.draw(
        ShapeKind::Cube,
        place(
            parent,
            Vector3::new(x, SEAT_Y + 0.5, side * 1.15),
            Vector3::new(0.8, 0.6, 0.15),
        ),
        SEAT_COLOR,
    );
}

/// Floor, passenger seats, driver area, ceiling fan and ceiling lights.
pub fn compose_interior(state: &BusState, parent: Matrix4<f32>, sink: &mut impl DrawSink) {
    sink.draw(
        ShapeKind::Cube,
        place(parent, Vector3::new(0.5, -0.9, 0.0), Vector3::new(6.8, 0.1, 2.6)),
        FLOOR_COLOR,
    );

    for side in [-1.0, 1.0] {
        for row in 0..5 {
            seat(parent, -1.5 + row as f32 * 1.1, side, sink);
        }
    }

    // Driver area
    sink.draw(
        ShapeKind::Cube,
        place(parent, Vector3::new(-4.8, 0.3, 0.0), Vector3::new(0.5, 0.8, 2.0)),
        DASHBOARD_COLOR,
    );
    sink.draw(
        ShapeKind::Cube,
        place(parent, Vector3::new(-4.0, -0.3, -0.5), Vector3::new(0.9, 0.5, 0.9)),
        SEAT_COLOR,
    );
    sink.draw(
        ShapeKind::Cube,
        place(parent, Vector3::new(-4.0, 0.3, -0.9), Vector3::new(0.9, 0.7, 0.15)),
        SEAT_COLOR,
    );

    // Steering column and wheel
    sink.draw(
        ShapeKind::Cylinder,
        parent
            * trs(
                Vector3::new(-4.5, 0.6, -0.5),
                Rotation::about(Axis::Z, -30.0),
                Vector3::new(0.08, 0.5, 0.08),
            ),
        STEERING_COLOR,
    );
    sink.draw(
        ShapeKind::Torus,
        parent
            * trs(
                Vector3::new(-4.35, 0.85, -0.5),
                Rotation::about(Axis::Z, -30.0).then(Axis::X, 90.0),
                Vector3::new(0.8, 0.8, 0.8),
            ),
        STEERING_COLOR,
    );

    compose_fan(state.fan_rotation, parent, sink);

    let light = if state.light_on {
        LIGHT_ON_COLOR
    } else {
        LIGHT_OFF_COLOR
    };
    for i in 0..3 {
        sink.draw(
            ShapeKind::Cube,
            place(
                parent,
                Vector3::new(-1.5 + i as f32 * 2.0, 2.45, 0.0),
                Vector3::new(0.8, 0.1, 0.3),
            ),
            light,
        );
    }
}

/// Hub and four blades spinning about the ceiling mount.
fn compose_fan(rotation: f32, parent: Matrix4<f32>, sink: &mut impl DrawSink) {
    let base = pivot(parent, Vector3::new(0.5, 2.4, 0.0), Axis::Y, rotation);

    sink.draw(
        ShapeKind::Cylinder,
        base * Matrix4::from_nonuniform_scale(0.2, 0.15, 0.2),
        FAN_HUB_COLOR,
    );

    for blade in 0..4 {
        let arm = base * Rotation::about(Axis::Y, 90.0 * blade as f32).matrix();
        let model = arm
            * trs(
                Vector3::new(0.4, 0.0, 0.0),
                Rotation::identity(),
                Vector3::new(0.6, 0.05, 0.15),
            );
        sink.draw(ShapeKind::Cube, model, FAN_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::DrawList;
    use cgmath::{InnerSpace, Point3, SquareMatrix, Transform};

    fn distance(a: Point3<f32>, b: Point3<f32>) -> f32 {
        (a - b).magnitude()
    }

    #[test]
    fn door_toggle_snaps_between_closed_and_open() {
        let mut state = BusState::new();
        state.toggle_front_door();
        assert_eq!(state.front_door_angle, 90.0);
        state.toggle_front_door();
        assert_eq!(state.front_door_angle, 0.0);

        state.middle_door_angle = 30.0;
        state.toggle_middle_door();
        assert_eq!(state.middle_door_angle, 90.0);
        state.middle_door_angle = 60.0;
        state.toggle_middle_door();
        assert_eq!(state.middle_door_angle, 0.0);
    }

    #[test]
    fn door_hinge_edge_stays_on_pivot() {
        let parent = Matrix4::from_translation(Vector3::new(2.0, 1.0, -3.0));
        let expected = parent.transform_point(Point3::new(-3.5, 0.0, 1.5));

        for step in 0..=9 {
            let angle = step as f32 * 10.0;
            let door = door_transform(parent, FRONT_DOOR_HINGE.into(), angle);
            for y in [-0.5, 0.0, 0.5] {
                let edge = door.transform_point(Point3::new(-0.5, y, 0.0));
                let hinge_line = expected + Vector3::new(0.0, y * 1.8, 0.0);
                assert!(distance(edge, hinge_line) < 1e-5);
            }
        }
    }

    #[test]
    fn open_door_swings_free_edge_outward() {
        let closed = door_transform(Matrix4::identity(), FRONT_DOOR_HINGE.into(), 0.0);
        let open = door_transform(Matrix4::identity(), FRONT_DOOR_HINGE.into(), 90.0);
        let free_edge = Point3::new(0.5, 0.0, 0.0);

        assert!(distance(closed.transform_point(free_edge), Point3::new(-2.5, 0.0, 1.5)) < 1e-5);
        assert!(distance(open.transform_point(free_edge), Point3::new(-3.5, 0.0, 0.5)) < 1e-5);
    }

    #[test]
    fn window_toggle_slides_pane_down() {
        let mut state = BusState::new();
        let (closed_t, closed_s) = window_placement(2, state.window_open[2]);

        state.toggle_window(2);
        assert_eq!(state.window_open[2], 1.0);
        let (open_t, open_s) = window_placement(2, state.window_open[2]);

        assert!((closed_t.y - open_t.y - 0.4).abs() < 1e-6);
        assert!((closed_s.y - 0.9).abs() < 1e-6);
        assert!((open_s.y - 0.5).abs() < 1e-6);
        assert_eq!(closed_t.x, open_t.x);
    }

    #[test]
    fn window_toggle_ignores_out_of_range_index() {
        let mut state = BusState::new();
        state.toggle_window(WINDOW_COUNT);
        state.toggle_window(usize::MAX);
        assert_eq!(state, BusState::new());
    }

    #[test]
    fn right_side_windows_mirror_left() {
        let (left, _) = window_placement(1, 0.0);
        let (right, _) = window_placement(1 + WINDOWS_PER_SIDE, 0.0);
        assert_eq!(left.x, right.x);
        assert_eq!(left.z, -right.z);
    }

    #[test]
    fn fan_completes_a_turn_in_one_point_eight_seconds() {
        let mut state = BusState::new();
        for _ in 0..180 {
            state.update_fan(0.01, true);
        }
        let angle = state.fan_rotation;
        assert!((0.0..360.0).contains(&angle));
        assert!(angle.min(360.0 - angle) < 1e-2, "fan ended at {angle}");

        let mut state = BusState::new();
        state.update_fan(1.8, true);
        assert!(state.fan_rotation.min(360.0 - state.fan_rotation) < 1e-3);
    }

    #[test]
    fn fan_holds_still_when_switched_off() {
        let mut state = BusState::new();
        state.update_fan(0.5, false);
        assert_eq!(state.fan_rotation, 0.0);

        state.toggle_fan();
        state.update(0.5);
        assert!((state.fan_rotation - 100.0).abs() < 1e-4);
    }

    #[test]
    fn bus_emits_every_part() {
        let mut list = DrawList::new();
        compose_bus(&BusState::new(), Matrix4::identity(), &mut list);

        assert_eq!(list.len(), 62);
        assert_eq!(list.count(ShapeKind::Cylinder), 6);
        assert_eq!(list.count(ShapeKind::Torus), 1);
        assert_eq!(list.count(ShapeKind::Cube), 55);
    }

    #[test]
    fn ceiling_lights_follow_switch() {
        let mut state = BusState::new();
        state.toggle_light();

        let mut list = DrawList::new();
        compose_interior(&state, Matrix4::identity(), &mut list);
        let lights = &list.commands()[list.len() - 3..];
        assert!(lights.iter().all(|c| c.color == LIGHT_OFF_COLOR));
        assert!(list.iter().all(|c| c.color != LIGHT_ON_COLOR));
    }
}
