//! Instanced rendering of draw lists
//!
//! Each shape kind has one static vertex buffer. Every frame the draw list is
//! grouped by shape into a single instance buffer, so a frame costs one draw
//! call per shape kind regardless of how many parts the vehicle has.

use std::ops::Range;

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;
use wgpu::{Buffer, Device, Queue, RenderPass};

use crate::gfx::geometry::{ShapeKind, ShapeLibrary};
use crate::gfx::scene::transform::{DrawCommand, DrawList};
use crate::wgpu_utils::ArrayBuffer;

/// Per-instance data: world matrix, normal matrix and flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub color: [f32; 3],
}

/// Inverse-transpose of the upper 3x3 block, which keeps normals
/// perpendicular to surfaces under non-uniform scale.
fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(
        model.x.truncate(),
        model.y.truncate(),
        model.z.truncate(),
    );
    match linear.invert() {
        Some(inverse) => inverse.transpose(),
        None => linear,
    }
}

impl InstanceData {
    pub fn from_command(command: &DrawCommand) -> Self {
        Self {
            model: command.model.into(),
            normal: normal_matrix(&command.model).into(),
            color: command.color,
        }
    }

    /// Instance attributes start at location 3, after the per-vertex ones.
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
            6 => Float32x4,
            7 => Float32x3,
            8 => Float32x3,
            9 => Float32x3,
            10 => Float32x3,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// A draw list regrouped by shape kind.
///
/// `ranges[kind.index()]` selects that shape's instances; within a shape the
/// emission order is preserved.
#[derive(Debug, Clone, Default)]
pub struct InstanceBatches {
    pub instances: Vec<InstanceData>,
    pub ranges: [Range<u32>; 5],
}

pub fn batch_commands(commands: &[DrawCommand]) -> InstanceBatches {
    let mut counts = [0u32; 5];
    for command in commands {
        counts[command.shape.index()] += 1;
    }

    let mut ranges: [Range<u32>; 5] = Default::default();
    let mut start = 0;
    for kind in ShapeKind::ALL {
        let end = start + counts[kind.index()];
        ranges[kind.index()] = start..end;
        start = end;
    }

    let mut cursors = ranges.clone().map(|range| range.start as usize);
    let mut instances: Vec<InstanceData> =
        vec![bytemuck::Zeroable::zeroed(); commands.len()];
    for command in commands {
        let cursor = &mut cursors[command.shape.index()];
        instances[*cursor] = InstanceData::from_command(command);
        *cursor += 1;
    }

    InstanceBatches { instances, ranges }
}

struct ShapeMesh {
    vertex_buffer: Buffer,
    vertex_count: u32,
}

/// Draws a [`DrawList`] with one instanced draw call per shape kind
pub struct InstancedRenderer {
    meshes: Vec<ShapeMesh>,
    instance_buffer: ArrayBuffer<InstanceData>,
    ranges: [Range<u32>; 5],
}

impl InstancedRenderer {
    /// Uploads every mesh of `library` into its own vertex buffer.
    pub fn new(device: &Device, library: &ShapeLibrary) -> Self {
        let meshes = library
            .iter()
            .map(|(kind, mesh)| ShapeMesh {
                vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Vertex Buffer", kind.name())),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                vertex_count: mesh.vertex_count() as u32,
            })
            .collect();

        Self {
            meshes,
            instance_buffer: ArrayBuffer::new(device, 128),
            ranges: Default::default(),
        }
    }

    /// Uploads this frame's instances.
    pub fn prepare(&mut self, device: &Device, queue: &Queue, draw_list: &DrawList) {
        let batches = batch_commands(draw_list.commands());
        self.instance_buffer
            .update_data(device, queue, &batches.instances);
        self.ranges = batches.ranges;
    }

    pub fn instance_count(&self) -> usize {
        self.instance_buffer.len()
    }

    /// Records the draw calls. The pipeline and bind groups must already be set.
    pub fn render(&self, render_pass: &mut RenderPass<'_>) {
        if self.instance_buffer.is_empty() {
            return;
        }
        render_pass.set_vertex_buffer(1, self.instance_buffer.buffer().slice(..));

        for kind in ShapeKind::ALL {
            let range = self.ranges[kind.index()].clone();
            if range.is_empty() {
                continue;
            }
            let mesh = &self.meshes[kind.index()];
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.draw(0..mesh.vertex_count, range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::DrawSink;
    use cgmath::{InnerSpace, Vector3};

    #[test]
    fn instance_layout_is_112_bytes() {
        assert_eq!(std::mem::size_of::<InstanceData>(), 112);
        assert_eq!(InstanceData::vertex_buffer_layout().array_stride, 112);
    }

    #[test]
    fn batching_groups_by_shape_and_keeps_order() {
        let mut list = DrawList::new();
        let at = |x: f32| Matrix4::from_translation(Vector3::new(x, 0.0, 0.0));
        list.draw(ShapeKind::Sphere, at(1.0), [1.0, 0.0, 0.0]);
        list.draw(ShapeKind::Cube, at(2.0), [0.0, 1.0, 0.0]);
        list.draw(ShapeKind::Sphere, at(3.0), [0.0, 0.0, 1.0]);
        list.draw(ShapeKind::Cone, at(4.0), [1.0, 1.0, 1.0]);

        let batches = batch_commands(list.commands());
        assert_eq!(batches.instances.len(), 4);
        assert_eq!(batches.ranges[ShapeKind::Cube.index()], 0..1);
        assert_eq!(batches.ranges[ShapeKind::Cylinder.index()], 1..1);
        assert_eq!(batches.ranges[ShapeKind::Sphere.index()], 1..3);
        assert_eq!(batches.ranges[ShapeKind::Cone.index()], 3..4);

        let xs: Vec<f32> = batches.instances.iter().map(|i| i.model[3][0]).collect();
        assert_eq!(xs, vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model = Matrix4::from_nonuniform_scale(2.0, 0.5, 1.0);
        let normal = normal_matrix(&model);

        // A slanted surface keeps its normal perpendicular after scaling
        let tangent = (model * Vector3::new(1.0, -1.0, 0.0).extend(0.0)).truncate();
        let face_normal = normal * Vector3::new(1.0, 1.0, 0.0).normalize();
        assert!(face_normal.dot(tangent).abs() < 1e-5);
    }

    #[test]
    fn empty_list_batches_to_nothing() {
        let batches = batch_commands(&[]);
        assert!(batches.instances.is_empty());
        assert!(batches.ranges.iter().all(|r| r.is_empty()));
    }
}
