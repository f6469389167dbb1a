//! ImGui overlay integration
//!
//! Owns the ImGui context, the winit platform glue and the wgpu renderer that
//! draws the overlay on top of the finished scene.

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::time::Instant;
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::Window,
};

use crate::error::{HoverbusError, Result};

const FONT_SIZE: f32 = 20.0;

/// ImGui UI manager
///
/// DPI scaling is locked to 1.0 so the overlay matches the physical surface
/// size used by the viewports.
pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
}

impl UiManager {
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: FONT_SIZE,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
        }
    }

    /// Must be called when the render target size changes.
    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Forwards pointer, keyboard and focus events to ImGui.
    ///
    /// Returns true if the overlay wants this kind of input: the keyboard
    /// flag for key events, the mouse flag for pointer events. Focus changes
    /// are never claimed.
    pub fn handle_input<T>(&mut self, window: &Window, event: &Event<T>) -> bool {
        let Event::WindowEvent {
            event: window_event,
            ..
        } = event
        else {
            return false;
        };

        match window_event {
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. } => {
                self.platform
                    .handle_event(self.context.io_mut(), window, event);
                self.context.io().want_capture_mouse
            }
            WindowEvent::KeyboardInput { .. } => {
                self.platform
                    .handle_event(self.context.io_mut(), window, event);
                self.context.io().want_capture_keyboard
            }
            WindowEvent::Focused(_) => {
                self.platform
                    .handle_event(self.context.io_mut(), window, event);
                false
            }
            _ => false,
        }
    }

    /// Starts a frame and runs `run_ui` to build it.
    pub fn update_logic<F>(&mut self, window: &Window, run_ui: F)
    where
        F: FnOnce(&imgui::Ui),
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        if let Err(e) = self.platform.prepare_frame(self.context.io_mut(), window) {
            log::warn!("Failed to prepare UI frame: {e}");
        }

        let ui = self.context.new_frame();
        run_ui(&ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(&ui, window);
        }
    }

    /// Renders the frame built by the last `update_logic` call over the
    /// existing contents of `color_attachment`.
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) -> Result<()> {
        let draw_data = self.context.render();

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return Ok(());
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.renderer
            .render(draw_data, queue, device, &mut render_pass)
            .map_err(|e| HoverbusError::Ui(e.to_string()))
    }

    /// `update_logic` followed by `render_display_only`. Overlay failures are
    /// logged and the frame continues without the overlay.
    pub fn draw<F>(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        window: &Window,
        color_attachment: &TextureView,
        run_ui: F,
    ) where
        F: FnOnce(&imgui::Ui),
    {
        self.update_logic(window, run_ui);
        if let Err(e) = self.render_display_only(device, queue, encoder, color_attachment) {
            log::error!("{e}");
        }
    }
}
