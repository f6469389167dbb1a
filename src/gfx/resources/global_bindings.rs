//! Global uniform bindings for camera and lighting data
//!
//! Every viewport gets its own uniform buffer and bind group: all viewports
//! are recorded into one command encoder, so they cannot share a buffer that
//! is rewritten between passes.

use cgmath::{Matrix4, Point3};

use crate::{
    gfx::camera::convert_matrix4_to_array,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Default point light position, above and to the side of the vehicle.
pub const LIGHT_POSITION: [f32; 3] = [10.0, 15.0, 10.0];

/// Global uniform buffer content.
///
/// MUST match the `Globals` struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniform {
    view_proj: [[f32; 4]; 4],
    view_position: [f32; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
    /// Point light, ambient, diffuse and specular factors (0 or 1)
    lighting: [f32; 4],
}

impl GlobalUniform {
    pub fn new(view_proj: Matrix4<f32>, eye: Point3<f32>, lighting: &LightingState) -> Self {
        let [lx, ly, lz] = lighting.light_position;
        Self {
            view_proj: convert_matrix4_to_array(view_proj),
            view_position: [eye.x, eye.y, eye.z, 1.0],
            light_position: [lx, ly, lz, 1.0],
            light_color: [1.0, 1.0, 1.0, 1.0],
            lighting: lighting.factors(),
        }
    }
}

/// Lighting terms that can be switched on and off at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingState {
    pub point_light: bool,
    pub ambient: bool,
    pub diffuse: bool,
    pub specular: bool,
    pub light_position: [f32; 3],
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            point_light: true,
            ambient: true,
            diffuse: true,
            specular: true,
            light_position: LIGHT_POSITION,
        }
    }
}

impl LightingState {
    pub fn factors(&self) -> [f32; 4] {
        let f = |on: bool| if on { 1.0 } else { 0.0 };
        [
            f(self.point_light),
            f(self.ambient),
            f(self.diffuse),
            f(self.specular),
        ]
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUniform>;

/// Bind group layout for slot 0 and one uniform buffer per viewport
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    slots: Vec<(GlobalUBO, wgpu::BindGroup)>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            slots: Vec::new(),
        }
    }

    /// Makes sure at least `count` viewport slots exist.
    pub fn ensure_slots(&mut self, device: &wgpu::Device, count: usize) {
        while self.slots.len() < count {
            let ubo = GlobalUBO::new(device);
            let bind_group = BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, &format!("Globals Bind Group {}", self.slots.len()));
            self.slots.push((ubo, bind_group));
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, slot: usize, content: GlobalUniform) {
        if let Some((ubo, _)) = self.slots.get_mut(slot) {
            ubo.update_content(queue, content);
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self, slot: usize) -> Option<&wgpu::BindGroup> {
        self.slots.get(slot).map(|(_, bind_group)| bind_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn uniform_layout_is_128_bytes() {
        assert_eq!(std::mem::size_of::<GlobalUniform>(), 128);
    }

    #[test]
    fn lighting_factors_follow_toggles() {
        let mut lighting = LightingState::default();
        assert_eq!(lighting.factors(), [1.0; 4]);

        lighting.diffuse = false;
        lighting.point_light = false;
        assert_eq!(lighting.factors(), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn uniform_carries_eye_and_light() {
        let uniform = GlobalUniform::new(
            Matrix4::identity(),
            Point3::new(1.0, 2.0, 3.0),
            &LightingState::default(),
        );
        assert_eq!(uniform.view_position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.light_position, [10.0, 15.0, 10.0, 1.0]);
        assert_eq!(uniform.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
