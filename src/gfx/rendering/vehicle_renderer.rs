//! Phong-lit instanced drawing of the vehicle scene into one or more viewports.

use crate::error::Result;
use crate::gfx::{
    geometry::ShapeLibrary,
    resources::{GlobalBindings, GlobalUniform, LightingState},
    scene::{transform::DrawList, vertex::Vertex3D},
    viewport::Viewport,
};

use super::{
    instanced_renderer::{InstanceData, InstancedRenderer},
    pipeline_manager::{PipelineConfig, PipelineManager},
    render_engine::RenderEngine,
};

pub const VEHICLE_PIPELINE: &str = "Vehicle";

pub struct VehicleRenderer {
    global_bindings: GlobalBindings,
    instanced: InstancedRenderer,
}

impl VehicleRenderer {
    /// Uploads the shape meshes and registers the vehicle pipeline.
    pub fn new(engine: &mut RenderEngine, library: &ShapeLibrary) -> Result<Self> {
        let global_bindings = GlobalBindings::new(engine.device());
        let instanced = InstancedRenderer::new(engine.device(), library);

        let config = PipelineConfig::default_with_shader("shader.wgsl")
            .with_label("Vehicle Pipeline")
            .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()])
            .with_vertex_layouts(vec![
                Vertex3D::desc(),
                InstanceData::vertex_buffer_layout(),
            ])
            .with_depth_format(engine.depth_format())
            .with_color_format(engine.surface_format());

        let pipelines = &mut engine.pipeline_manager;
        pipelines.load_shader("shader.wgsl", include_str!("shader.wgsl"));
        pipelines.register_pipeline(VEHICLE_PIPELINE, config);
        pipelines.create_all_pipelines()?;

        Ok(Self {
            global_bindings,
            instanced,
        })
    }

    /// Uploads per-viewport uniforms and this frame's instances.
    pub fn prepare(
        &mut self,
        engine: &RenderEngine,
        viewports: &[Viewport],
        draw_list: &DrawList,
        lighting: &LightingState,
    ) {
        self.global_bindings
            .ensure_slots(engine.device(), viewports.len());
        for (slot, viewport) in viewports.iter().enumerate() {
            let uniform = GlobalUniform::new(viewport.view_proj, viewport.eye, lighting);
            self.global_bindings.update(engine.queue(), slot, uniform);
        }

        self.instanced
            .prepare(engine.device(), engine.queue(), draw_list);
    }

    /// Records the scene once per viewport.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipelines: &PipelineManager,
        viewports: &[Viewport],
    ) -> Result<()> {
        render_pass.set_pipeline(pipelines.pipeline(VEHICLE_PIPELINE)?);

        for (slot, viewport) in viewports.iter().enumerate() {
            let Some(bind_group) = self.global_bindings.bind_group(slot) else {
                continue;
            };
            let rect = viewport.rect;
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            render_pass.set_viewport(
                rect.x as f32,
                rect.y as f32,
                rect.width as f32,
                rect.height as f32,
                0.0,
                1.0,
            );
            render_pass.set_scissor_rect(rect.x, rect.y, rect.width, rect.height);
            render_pass.set_bind_group(0, bind_group, &[]);
            self.instanced.render(render_pass);
        }

        Ok(())
    }

    pub fn instance_count(&self) -> usize {
        self.instanced.instance_count()
    }
}
