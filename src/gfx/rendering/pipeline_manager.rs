//! Render pipeline management for wgpu
//!
//! Pipelines are registered as configurations and created lazily, or all at
//! once during startup with [`PipelineManager::create_all_pipelines`].

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::error::{HoverbusError, Result};

/// Configuration for creating a render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub vertex_layouts: Vec<VertexBufferLayout<'static>>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub depth_compare: CompareFunction,
    pub color_format: TextureFormat,
    pub multisample: MultisampleState,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "shader.wgsl".to_string(),
            bind_group_layouts: Vec::new(),
            vertex_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: Some(Face::Back),
            depth_format: None,
            depth_compare: CompareFunction::Less,
            color_format: TextureFormat::Bgra8Unorm,
            multisample: MultisampleState::default(),
        }
    }
}

impl PipelineConfig {
    pub fn default_with_shader(shader: &str) -> Self {
        Self {
            shader: shader.to_string(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    /// Vertex buffer layouts in slot order
    pub fn with_vertex_layouts(mut self, layouts: Vec<VertexBufferLayout<'static>>) -> Self {
        self.vertex_layouts = layouts;
        self
    }

    /// Enables depth testing against a depth buffer of `format`
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    /// Depth comparison; `Always` draws in submission order
    pub fn with_depth_compare(mut self, compare: CompareFunction) -> Self {
        self.depth_compare = compare;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }
}

/// Render pipelines registered by name and created in one batch
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
    pending_pipelines: Vec<String>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
            pending_pipelines: Vec::new(),
        }
    }

    /// Registers a pipeline configuration without creating it
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
        self.pending_pipelines.push(name.to_string());
    }

    /// Compiles a WGSL shader module under `name`
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let shader_module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        self.shader_modules.insert(name.to_string(), shader_module);
    }

    /// Returns an already created pipeline
    pub fn pipeline(&self, name: &str) -> Result<&RenderPipeline> {
        self.pipelines
            .get(name)
            .ok_or_else(|| HoverbusError::PipelineNotFound(name.to_string()))
    }

    /// Creates all pending pipelines immediately
    pub fn create_all_pipelines(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_pipelines);

        for name in pending {
            if let Some(config) = self.pipeline_configs.get(&name).cloned() {
                let pipeline = self.create_pipeline_from_config(&name, &config)?;
                log::debug!("Created pipeline '{}'", name);
                self.pipelines.insert(name, pipeline);
            }
        }

        Ok(())
    }

    fn create_pipeline_from_config(
        &self,
        name: &str,
        config: &PipelineConfig,
    ) -> Result<RenderPipeline> {
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| HoverbusError::ShaderNotFound(config.shader.clone()))?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let color_targets = [Some(ColorTargetState {
            format: config.color_format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })];

        let depth_stencil = config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: config.depth_compare,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &config.vertex_layouts,
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &color_targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: config.multisample,
                multiview: None,
                cache: None,
            });

        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Vertex3D;

    #[test]
    fn builder_sets_fields() {
        let config = PipelineConfig::default_with_shader("flat")
            .with_label("Flat")
            .with_cull_mode(None)
            .with_vertex_layouts(vec![Vertex3D::desc()])
            .with_depth_format(TextureFormat::Depth32Float)
            .with_color_format(TextureFormat::Rgba8Unorm);

        assert_eq!(config.shader, "flat");
        assert_eq!(config.label, "Flat");
        assert_eq!(config.cull_mode, None);
        assert_eq!(config.vertex_layouts.len(), 1);
        assert_eq!(config.depth_format, Some(TextureFormat::Depth32Float));
        assert_eq!(config.color_format, TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn default_culls_back_faces_without_depth() {
        let config = PipelineConfig::default();
        assert_eq!(config.cull_mode, Some(Face::Back));
        assert!(config.depth_format.is_none());
        assert_eq!(config.depth_compare, CompareFunction::Less);
        assert_eq!(config.primitive_topology, PrimitiveTopology::TriangleList);
    }
}
