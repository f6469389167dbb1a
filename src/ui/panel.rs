//! Overlay panels
//!
//! Panels never mutate state directly. Buttons and checkboxes push the same
//! [`Action`]s the keyboard produces, and the app applies them in one place.

use crate::gfx::resources::global_bindings::LightingState;
use crate::gfx::scene::{Scene, VehicleKind, WINDOW_COUNT};
use crate::gfx::viewport::{Viewport, ViewportLayout};
use crate::input::Action;

/// Read-only view of everything the vehicle panel displays.
pub struct PanelView<'a> {
    pub scene: &'a Scene,
    pub lighting: &'a LightingState,
    pub layout: ViewportLayout,
    pub camera_position: [f32; 3],
    pub viewports: &'a [Viewport],
    pub instances: usize,
    pub frame_time: f32,
}

/// Checkbox that reports a toggle request instead of writing the flag.
fn toggle(ui: &imgui::Ui, label: &str, current: bool, action: Action, requests: &mut Vec<Action>) {
    let mut value = current;
    if ui.checkbox(label, &mut value) {
        requests.push(action);
    }
}

/// Vehicle panel: state readout plus the keyboard toggles as widgets.
///
/// Returns the actions requested this frame, in click order.
pub fn vehicle_panel(ui: &imgui::Ui, view: &PanelView<'_>) -> Vec<Action> {
    let mut requests = Vec::new();
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return requests;
    }

    let scene = view.scene;
    let bus = &scene.bus;
    let drive = &scene.drive;

    ui.window("Vehicle")
        .size([320.0, 520.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .collapsible(true)
        .build(|| {
            ui.text(format!("Vehicle: {}", scene.vehicle.name()));
            ui.text(format!("Speed: {:.2}", drive.speed));
            ui.text(format!("Heading: {:.1} deg", drive.heading));
            ui.text(format!(
                "Position: ({:.1}, {:.1}, {:.1})",
                drive.position.x, drive.position.y, drive.position.z
            ));
            if scene.vehicle == VehicleKind::HoverBus {
                ui.text(format!("Altitude: {:.2}", drive.altitude));
            }
            let [x, y, z] = view.camera_position;
            ui.text(format!("Camera: ({x:.1}, {y:.1}, {z:.1})"));
            ui.text(format!("Frame: {:.2} ms", view.frame_time * 1000.0));
            ui.text(format!("Instances: {}", view.instances));
            for viewport in view.viewports {
                let rect = viewport.rect;
                ui.text(format!("{}: {}x{}", viewport.kind.label(), rect.width, rect.height));
            }

            ui.separator();
            if ui.button(format!("Switch to {} (T)", scene.vehicle.toggled().name())) {
                requests.push(Action::VehicleKind);
            }
            let layout_label = match view.layout {
                ViewportLayout::Single => "Quad view (V)",
                ViewportLayout::Quad => "Single view (V)",
            };
            if ui.button(layout_label) {
                requests.push(Action::ViewportLayout);
            }
            ui.same_line();
            if ui.button("Reset (Backspace)") {
                requests.push(Action::Reset);
            }

            if ui.collapsing_header("Cabin", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                toggle(ui, "Front door (1)", bus.front_door_angle > 0.0, Action::FrontDoor, &mut requests);
                toggle(ui, "Middle door (2)", bus.middle_door_angle > 0.0, Action::MiddleDoor, &mut requests);
                toggle(ui, "Ceiling fan (G)", bus.fan_spinning, Action::Fan, &mut requests);
                toggle(ui, "Cabin lights (L)", bus.light_on, Action::CabinLights, &mut requests);
                ui.text(format!(
                    "Windows open: {}/{}",
                    bus.open_window_count(),
                    WINDOW_COUNT
                ));
                for index in 0..WINDOW_COUNT {
                    if index % 6 != 0 {
                        ui.same_line();
                    }
                    let mut open = bus.window_open[index] >= 0.5;
                    if ui.checkbox(format!("##window{index}"), &mut open) {
                        requests.push(Action::Window(index));
                    }
                }
            }

            if ui.collapsing_header("Lighting", imgui::TreeNodeFlags::DEFAULT_OPEN) {
                let lighting = view.lighting;
                toggle(ui, "Point light (F1)", lighting.point_light, Action::PointLight, &mut requests);
                toggle(ui, "Ambient (F2)", lighting.ambient, Action::Ambient, &mut requests);
                toggle(ui, "Diffuse (F3)", lighting.diffuse, Action::Diffuse, &mut requests);
                toggle(ui, "Specular (F4)", lighting.specular, Action::Specular, &mut requests);
            }
        });

    requests
}
