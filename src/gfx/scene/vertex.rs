//! # Vertex Data Structures
//!
//! This module defines the vertex formats used by the hoverbus renderer.
//! Both are GPU-compatible (`#[repr(C)]` + `bytemuck::Pod`) so generated
//! geometry can be uploaded without conversion.

/// A 3D vertex with position, normal and texture coordinate.
///
/// Vertices are plain values: the procedural primitives duplicate them across
/// every triangle that touches the same geometric point instead of sharing
/// them through an index buffer.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
///
/// # Examples
///
/// ```
/// use hoverbus::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D::new([0.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.5, 0.5]);
/// assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Outward unit normal [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinate [u, v]
    pub tex_coords: [f32; 2],
}

impl Vertex3D {
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Normal (Float32x3)
    /// - Attribute 2: Texture coordinate (Float32x2)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// An unlit vertex carrying its own color, used by the flat 2D aeroplane demo.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    /// Returns the vertex buffer layout: position at location 0, color at 1.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_struct_size() {
        assert_eq!(std::mem::size_of::<Vertex3D>(), 32);
        assert_eq!(Vertex3D::desc().array_stride, 32);
        assert_eq!(std::mem::size_of::<ColorVertex>(), 24);
        assert_eq!(ColorVertex::desc().array_stride, 24);
    }
}
