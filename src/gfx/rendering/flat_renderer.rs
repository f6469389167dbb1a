//! Unlit per-vertex-color renderer for the 2D aeroplane demo.
//!
//! Triangles are drawn in submission order with depth testing effectively
//! off, so later layers paint over earlier ones.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::error::Result;
use crate::gfx::scene::vertex::ColorVertex;
use crate::wgpu_utils::{binding_types, BindGroupBuilder, BindGroupLayoutBuilder, UniformBuffer};

use super::{
    pipeline_manager::{PipelineConfig, PipelineManager},
    render_engine::RenderEngine,
};

pub const FLAT_PIPELINE: &str = "Flat";

/// Model transform applied to every vertex of the flat mesh.
///
/// MUST match `Transform` in `flat.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatUniform {
    pub transform: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for FlatUniform {
    fn from(transform: Matrix4<f32>) -> Self {
        Self {
            transform: transform.into(),
        }
    }
}

pub struct FlatRenderer {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    transform: UniformBuffer<FlatUniform>,
    bind_group: wgpu::BindGroup,
}

fn create_vertex_buffer(device: &wgpu::Device, vertices: &[ColorVertex]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Flat Vertex Buffer"),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

impl FlatRenderer {
    pub fn new(engine: &mut RenderEngine, vertices: &[ColorVertex]) -> Result<Self> {
        let device = engine.device();
        let layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(device, "Flat Transform Layout");

        let transform = UniformBuffer::new_with_data(
            device,
            &FlatUniform::from(<Matrix4<f32> as cgmath::SquareMatrix>::identity()),
        );
        let bind_group = BindGroupBuilder::new(&layout)
            .resource(transform.binding_resource())
            .create(device, "Flat Transform Bind Group");
        let vertex_buffer = create_vertex_buffer(device, vertices);

        let config = PipelineConfig::default_with_shader("flat.wgsl")
            .with_label("Flat Pipeline")
            .with_cull_mode(None)
            .with_bind_group_layouts(vec![layout.layout.clone()])
            .with_vertex_layouts(vec![ColorVertex::desc()])
            .with_depth_format(engine.depth_format())
            .with_depth_compare(wgpu::CompareFunction::Always)
            .with_color_format(engine.surface_format());

        let pipelines = &mut engine.pipeline_manager;
        pipelines.load_shader("flat.wgsl", include_str!("flat.wgsl"));
        pipelines.register_pipeline(FLAT_PIPELINE, config);
        pipelines.create_all_pipelines()?;

        Ok(Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            transform,
            bind_group,
        })
    }

    /// Replaces the mesh, e.g. after switching between assembled and exploded.
    pub fn set_vertices(&mut self, device: &wgpu::Device, vertices: &[ColorVertex]) {
        self.vertex_buffer = create_vertex_buffer(device, vertices);
        self.vertex_count = vertices.len() as u32;
    }

    pub fn update_transform(&mut self, queue: &wgpu::Queue, transform: Matrix4<f32>) {
        self.transform.update_content(queue, transform.into());
    }

    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipelines: &PipelineManager,
    ) -> Result<()> {
        if self.vertex_count == 0 {
            return Ok(());
        }
        render_pass.set_pipeline(pipelines.pipeline(FLAT_PIPELINE)?);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn uniform_is_column_major() {
        let uniform = FlatUniform::from(Matrix4::from_translation(Vector3::new(0.5, -0.25, 0.0)));
        assert_eq!(uniform.transform[3], [0.5, -0.25, 0.0, 1.0]);
        assert_eq!(std::mem::size_of::<FlatUniform>(), 64);
    }
}
