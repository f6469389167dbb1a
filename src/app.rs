use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::{HoverbusError, Result};
use crate::gfx::{
    camera::{Camera, CameraController, CameraManager, FlyCamera},
    geometry::ShapeLibrary,
    rendering::{RenderEngine, VehicleRenderer},
    resources::LightingState,
    scene::Scene,
    viewport::{layout_viewports, Viewport, ViewportLayout},
};
use crate::input::{Action, InputManager};
use crate::ui::{vehicle_panel, PanelView, UiManager};

const CONTROLS: &[&str] = &[
    "Camera: W/S/A/D/E/R move, X/Y/Z pitch/yaw/roll (Shift reverses), F orbit",
    "Drive: arrow keys, PageUp/PageDown altitude (hover bus)",
    "Bus: 1/2 doors, 3-8 and Shift+3-8 windows, G fan, L cabin lights",
    "View: V quad viewports, T bus / hover bus, F1-F4 lighting terms",
    "Backspace resets camera and vehicle, Esc quits",
];

/// Creates a window of the given physical size.
pub(crate) fn create_window(
    event_loop: &ActiveEventLoop,
    title: &str,
    width: u32,
    height: u32,
) -> Result<Arc<Window>> {
    let attributes = WindowAttributes::default()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(width, height));
    Ok(Arc::new(event_loop.create_window(attributes)?))
}

/// GPU-free viewer state: everything a frame needs besides the window and
/// the wgpu objects.
pub struct ViewerState {
    pub scene: Scene,
    pub camera: CameraManager,
    pub input: InputManager<Action>,
    pub lighting: LightingState,
    pub layout: ViewportLayout,
}

fn on_off(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Self {
        let aspect = config.width as f32 / config.height.max(1) as f32;
        Self {
            scene: Scene::new(config.vehicle, config.drive),
            camera: CameraManager::new(FlyCamera::new(aspect), CameraController::default()),
            input: InputManager::new(),
            lighting: LightingState::default(),
            layout: config.layout,
        }
    }

    /// Applies one toggle. Returns false when the viewer should exit.
    ///
    /// Held actions are read from the input manager each frame and are
    /// ignored here.
    pub fn apply_action(&mut self, action: Action) -> bool {
        let bus = &mut self.scene.bus;
        match action {
            Action::FrontDoor => bus.toggle_front_door(),
            Action::MiddleDoor => bus.toggle_middle_door(),
            Action::Window(index) => bus.toggle_window(index),
            Action::Fan => bus.toggle_fan(),
            Action::CabinLights => bus.toggle_light(),
            Action::ViewportLayout => {
                self.layout = self.layout.toggled();
                log::info!("Viewport layout: {:?}", self.layout);
            }
            Action::VehicleKind => self.scene.toggle_vehicle(),
            Action::PointLight => {
                self.lighting.point_light = !self.lighting.point_light;
                log::info!("Point light: {}", on_off(self.lighting.point_light));
            }
            Action::Ambient => {
                self.lighting.ambient = !self.lighting.ambient;
                log::info!("Ambient: {}", on_off(self.lighting.ambient));
            }
            Action::Diffuse => {
                self.lighting.diffuse = !self.lighting.diffuse;
                log::info!("Diffuse: {}", on_off(self.lighting.diffuse));
            }
            Action::Specular => {
                self.lighting.specular = !self.lighting.specular;
                log::info!("Specular: {}", on_off(self.lighting.specular));
            }
            Action::Reset => {
                self.camera.camera.reset_to_default();
                self.scene.drive.reset();
                log::info!("Camera and vehicle reset");
            }
            Action::Exit => return false,
            _ => {}
        }
        true
    }

    /// Applies queued toggles, then advances camera, animations and driving
    /// by `dt` seconds. Returns false when an exit was requested.
    pub fn step(&mut self, dt: f32) -> bool {
        for action in self.input.drain_toggles() {
            if !self.apply_action(action) {
                return false;
            }
        }
        self.camera.update(&self.input, dt);
        self.scene.update(self.input.drive_input(), dt);
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    pub fn viewports(&self, width: u32, height: u32) -> Vec<Viewport> {
        layout_viewports(
            self.layout,
            width,
            height,
            &self.camera.camera,
            self.scene.focus_point(),
        )
    }
}

pub struct HoverbusApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    vehicle_renderer: Option<VehicleRenderer>,
    ui_manager: Option<UiManager>,
    viewer: ViewerState,
    library: ShapeLibrary,
    last_frame: Instant,
    frame_time: f32,
    error: Option<HoverbusError>,
}

impl HoverbusApp {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let library = ShapeLibrary::new(&config.tessellation);
        let viewer = ViewerState::new(&config);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                vehicle_renderer: None,
                ui_manager: None,
                viewer,
                library,
                last_frame: Instant::now(),
                frame_time: 0.0,
                error: None,
            },
        })
    }

    /// Runs the event loop until the window closes or Escape is pressed.
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        for line in CONTROLS {
            log::info!("{line}");
        }
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = &self.config;
        let window = create_window(event_loop, &config.title, config.width, config.height)?;
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let mut engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            config.vsync,
        ))?;
        engine.set_clear_color(config.clear_color);

        let vehicle_renderer = VehicleRenderer::new(&mut engine, &self.library)?;
        self.viewer.resize(width, height);

        if config.show_ui {
            let mut ui_manager = UiManager::new(
                engine.device(),
                engine.queue(),
                engine.surface_format(),
                &window,
            );
            ui_manager.update_display_size(width, height);
            self.ui_manager = Some(ui_manager);
        }

        log::info!(
            "Viewer ready: {}x{} {:?}",
            width,
            height,
            engine.surface_format()
        );
        self.vehicle_renderer = Some(vehicle_renderer);
        self.render_engine = Some(engine);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: HoverbusError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(render_engine), Some(vehicle_renderer), Some(window)) = (
            self.render_engine.as_mut(),
            self.vehicle_renderer.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        // Clicks meant for the overlay stop here. Key releases always reach
        // the controls so nothing stays held while the cursor is on a panel.
        let mut keyboard_captured = false;
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            let captured = ui_manager.handle_input(window, &ui_event);
            match event {
                WindowEvent::KeyboardInput { .. } => keyboard_captured = captured,
                _ if captured => return,
                _ => {}
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.viewer.input.on_key_event(&event, keyboard_captured);
            }
            WindowEvent::Focused(false) => {
                self.viewer.input.release_all();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_engine.resize(width, height);
                self.viewer.resize(width, height);
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;
                self.frame_time = dt;

                if !self.viewer.step(dt) {
                    event_loop.exit();
                    return;
                }

                let (width, height) = render_engine.get_surface_size();
                let viewports = self.viewer.viewports(width, height);
                let draw_list = self.viewer.scene.compose();
                vehicle_renderer.prepare(render_engine, &viewports, draw_list, &self.viewer.lighting);

                let mut requests = Vec::new();
                let instances = vehicle_renderer.instance_count();
                let viewports_ref = &viewports;
                let viewer = &self.viewer;
                let frame_time = self.frame_time;
                let window = window.clone();
                let ui = self.ui_manager.as_mut().map(|ui_manager| {
                    let requests = &mut requests;
                    move |device: &wgpu::Device,
                          queue: &wgpu::Queue,
                          encoder: &mut wgpu::CommandEncoder,
                          view: &wgpu::TextureView| {
                        let panel = PanelView {
                            scene: &viewer.scene,
                            lighting: &viewer.lighting,
                            layout: viewer.layout,
                            camera_position: viewer.camera.camera.eye().into(),
                            viewports: viewports_ref,
                            instances,
                            frame_time,
                        };
                        ui_manager.draw(device, queue, encoder, &window, view, |ui| {
                            *requests = vehicle_panel(ui, &panel);
                        });
                    }
                });

                let vehicle_renderer = &*vehicle_renderer;
                let result = render_engine.render_frame(
                    |pass, pipelines| vehicle_renderer.draw(pass, pipelines, &viewports),
                    ui,
                );
                match result {
                    Err(HoverbusError::Surface(e)) => {
                        log::warn!("Skipping frame: {e}");
                    }
                    Err(e) => {
                        self.fail(event_loop, e);
                        return;
                    }
                    Ok(()) => {}
                }

                for action in requests {
                    if !self.viewer.apply_action(action) {
                        event_loop.exit();
                        return;
                    }
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::VehicleKind;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    fn viewer() -> ViewerState {
        ViewerState::new(&ViewerConfig::default())
    }

    #[test]
    fn toggles_reach_the_scene() {
        let mut viewer = viewer();
        assert!(viewer.apply_action(Action::FrontDoor));
        assert!(viewer.apply_action(Action::Window(7)));
        assert!(viewer.apply_action(Action::Fan));
        assert!(viewer.apply_action(Action::VehicleKind));

        assert!(viewer.scene.bus.front_door_angle > 0.0);
        assert_eq!(viewer.scene.bus.open_window_count(), 1);
        assert!(viewer.scene.bus.fan_spinning);
        assert_eq!(viewer.scene.vehicle, VehicleKind::HoverBus);
    }

    #[test]
    fn lighting_and_layout_toggles() {
        let mut viewer = viewer();
        viewer.apply_action(Action::Specular);
        viewer.apply_action(Action::ViewportLayout);
        assert!(!viewer.lighting.specular);
        assert!(viewer.lighting.diffuse);
        assert_eq!(viewer.layout, ViewportLayout::Quad);
        assert_eq!(viewer.viewports(800, 600).len(), 4);
    }

    #[test]
    fn escape_stops_the_step() {
        let mut viewer = viewer();
        viewer.input.on_key(KeyCode::Escape, ElementState::Pressed, false);
        assert!(!viewer.step(0.016));
    }

    #[test]
    fn step_drives_the_vehicle() {
        let mut viewer = viewer();
        viewer.input.on_key(KeyCode::ArrowUp, ElementState::Pressed, false);
        let start = viewer.scene.drive.position;
        for _ in 0..30 {
            assert!(viewer.step(1.0 / 30.0));
        }
        assert!(viewer.scene.drive.speed > 0.0);
        assert_ne!(viewer.scene.drive.position, start);
    }

    #[test]
    fn reset_restores_camera_and_vehicle() {
        let mut viewer = viewer();
        viewer.input.on_key(KeyCode::ArrowUp, ElementState::Pressed, false);
        viewer.input.on_key(KeyCode::KeyW, ElementState::Pressed, false);
        for _ in 0..30 {
            viewer.step(1.0 / 30.0);
        }
        viewer.apply_action(Action::FrontDoor);
        assert_ne!(viewer.camera.camera.position, FlyCamera::new(1.0).position);

        viewer.input.release_all();
        viewer.input.on_key(KeyCode::Backspace, ElementState::Pressed, false);
        assert!(viewer.step(0.0));

        let drive = &viewer.scene.drive;
        assert_eq!(drive.speed, 0.0);
        assert_eq!(drive.position, crate::simulation::DriveState::new(drive.params).position);
        assert_eq!(viewer.camera.camera.position, FlyCamera::new(1.0).position);
        // Cabin toggles are not part of the reset
        assert!(viewer.scene.bus.front_door_angle > 0.0);
    }

    #[test]
    fn release_behind_the_overlay_stops_the_camera() {
        let mut viewer = viewer();
        viewer.input.on_key(KeyCode::KeyW, ElementState::Pressed, false);
        assert!(viewer.input.is_active(Action::MoveForward));

        viewer.input.on_captured_key(KeyCode::KeyW, ElementState::Released);
        assert!(!viewer.input.is_active(Action::MoveForward));

        let before = viewer.camera.camera.position;
        viewer.step(0.5);
        assert_eq!(viewer.camera.camera.position, before);
    }

    #[test]
    fn held_keys_are_not_toggles() {
        let mut viewer = viewer();
        assert!(viewer.apply_action(Action::MoveForward));
        assert_eq!(viewer.scene.bus, crate::gfx::scene::BusState::new());
    }
}
