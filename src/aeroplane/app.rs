use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use super::{build_aeroplane, AeroplaneState};
use crate::app::create_window;
use crate::config::AeroplaneConfig;
use crate::error::{HoverbusError, Result};
use crate::gfx::rendering::{FlatRenderer, RenderEngine};
use crate::input::{AeroplaneAction, InputManager};

const CONTROLS: &[&str] = &[
    "D - Toggle disassembly view",
    "R - Rotate (15 degrees each press)",
    "+ / - - Zoom in / out",
    "Arrow keys - Move the plane",
    "Esc - Exit",
];

pub struct AeroplaneApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AeroplaneConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    renderer: Option<FlatRenderer>,
    state: AeroplaneState,
    input: InputManager<AeroplaneAction>,
    last_frame: Instant,
    error: Option<HoverbusError>,
}

impl AeroplaneApp {
    pub fn new(config: AeroplaneConfig) -> Result<Self> {
        Ok(Self {
            event_loop: Some(EventLoop::new()?),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                renderer: None,
                state: AeroplaneState::new(),
                input: InputManager::new(),
                last_frame: Instant::now(),
                error: None,
            },
        })
    }

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
            window,
            width,
            height,
            config.vsync,
        ))?;
        engine.set_clear_color(config.clear_color);

        let renderer = FlatRenderer::new(&mut engine, &build_aeroplane(self.state.exploded))?;
        self.renderer = Some(renderer);
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
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(render_engine), Some(renderer)) =
            (self.render_engine.as_mut(), self.renderer.as_mut())
        else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.input.on_key_event(&event, false),
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                for action in self.input.drain_toggles() {
                    match action {
                        AeroplaneAction::ToggleExploded => {
                            self.state.toggle_exploded();
                            renderer
                                .set_vertices(render_engine.device(), &build_aeroplane(self.state.exploded));
                        }
                        AeroplaneAction::Rotate => self.state.rotate_step(),
                        AeroplaneAction::Exit => {
                            event_loop.exit();
                            return;
                        }
                        _ => {}
                    }
                }
                self.state.update(&self.input, dt);
                renderer.update_transform(render_engine.queue(), self.state.transform());

                let renderer = &*renderer;
                let result = render_engine.render_frame(
                    |pass, pipelines| renderer.draw(pass, pipelines),
                    None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
                );
                match result {
                    Err(HoverbusError::Surface(e)) => log::warn!("Skipping frame: {e}"),
                    Err(e) => self.fail(event_loop, e),
                    Ok(()) => {}
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
