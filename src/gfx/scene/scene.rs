use cgmath::{Matrix4, Vector3};

use super::{
    bus::{compose_bus, BusState},
    hover_bus::{compose_hover_bus, HoverState},
    transform::DrawList,
    world::compose_world,
    VehicleKind,
};
use crate::simulation::drive::{DriveInput, DriveParams, DriveState};

/// Vehicle state plus the per-frame draw list it is composed into
pub struct Scene {
    pub vehicle: VehicleKind,
    pub bus: BusState,
    pub hover: HoverState,
    pub drive: DriveState,
    draw_list: DrawList,
}

impl Scene {
    pub fn new(vehicle: VehicleKind, drive_params: DriveParams) -> Self {
        Self {
            vehicle,
            bus: BusState::new(),
            hover: HoverState::new(),
            drive: DriveState::new(drive_params),
            draw_list: DrawList::new(),
        }
    }

    /// Advances animations and the driving model by `dt` seconds.
    ///
    /// Only the hover bus can change altitude; lift input is dropped for the bus.
    pub fn update(&mut self, input: DriveInput, dt: f32) {
        self.bus.update(dt);
        self.hover.update(dt);

        let input = match self.vehicle {
            VehicleKind::Bus => DriveInput { lift: 0.0, ..input },
            VehicleKind::HoverBus => input,
        };
        self.drive.update(input, dt);
    }

    /// Switches between the bus and the hover bus. The bus lands immediately.
    pub fn toggle_vehicle(&mut self) {
        self.vehicle = self.vehicle.toggled();
        if self.vehicle == VehicleKind::Bus {
            self.drive.altitude = self.drive.params.min_altitude;
        }
        log::info!("Vehicle: {}", self.vehicle.name());
    }

    pub fn root_transform(&self) -> Matrix4<f32> {
        self.drive.root_transform()
    }

    /// Point the orthographic views are centered on.
    pub fn focus_point(&self) -> Vector3<f32> {
        self.drive.position + Vector3::new(0.0, self.drive.altitude + 1.0, 0.0)
    }

    /// Rebuilds the draw list for the current state.
    pub fn compose(&mut self) -> &DrawList {
        self.draw_list.clear();
        compose_world(&mut self.draw_list);

        let root = self.root_transform();
        match self.vehicle {
            VehicleKind::Bus => compose_bus(&self.bus, root, &mut self.draw_list),
            VehicleKind::HoverBus => {
                compose_hover_bus(&self.bus, &self.hover, root, &mut self.draw_list)
            }
        }

        &self.draw_list
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::ShapeKind;

    #[test]
    fn compose_switches_with_vehicle_kind() {
        let mut scene = Scene::new(VehicleKind::Bus, DriveParams::default());
        assert_eq!(scene.compose().len(), 2 + 62);
        assert_eq!(scene.draw_list().count(ShapeKind::Cone), 0);

        scene.toggle_vehicle();
        assert_eq!(scene.compose().len(), 2 + 76);
        assert_eq!(scene.draw_list().count(ShapeKind::Cone), 6);
    }

    #[test]
    fn bus_ignores_lift() {
        let lift = DriveInput {
            lift: 1.0,
            ..Default::default()
        };

        let mut scene = Scene::new(VehicleKind::Bus, DriveParams::default());
        scene.update(lift, 0.5);
        assert_eq!(scene.drive.altitude, 0.0);

        scene.toggle_vehicle();
        scene.update(lift, 0.5);
        assert!(scene.drive.altitude > 0.0);

        scene.toggle_vehicle();
        assert_eq!(scene.drive.altitude, 0.0);
    }

    #[test]
    fn update_spins_fan_only_when_switched_on() {
        let mut scene = Scene::new(VehicleKind::Bus, DriveParams::default());
        scene.update(DriveInput::default(), 0.1);
        assert_eq!(scene.bus.fan_rotation, 0.0);

        scene.bus.toggle_fan();
        scene.update(DriveInput::default(), 0.1);
        assert!((scene.bus.fan_rotation - 20.0).abs() < 1e-4);
    }
}
