//! # Procedural Geometry Generation
//!
//! This module generates the unit primitives every vehicle is assembled from,
//! so no external model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Cube**: static 36-vertex table, 1x1x1
//! - **Cylinder**: radius 0.5, height 1, axis Y, capped
//! - **Torus**: configurable main / tube radius, in the XZ plane
//! - **Sphere**: UV sphere of radius 0.5
//! - **Cone**: radius 0.5, height 1, apex on +Y, capped base
//!
//! All meshes are triangle soups: every consecutive triple of vertices is one
//! counter-clockwise triangle with outward normals. Sizes, positions and
//! orientations are never baked in; the scene composer applies them through
//! per-instance transforms.
//!
//! ## Usage
//!
//! ```
//! use hoverbus::gfx::geometry::{generate_cylinder, generate_sphere, ShapeKind, ShapeLibrary, Tessellation};
//!
//! let cylinder = generate_cylinder(4);
//! assert_eq!(cylinder.vertex_count(), 48);
//!
//! let sphere = generate_sphere(2, 4);
//! assert_eq!(sphere.triangle_count(), 16);
//!
//! let library = ShapeLibrary::new(&Tessellation::default());
//! assert_eq!(library.mesh(ShapeKind::Cube).vertex_count(), 36);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// The closed set of primitive shapes a scene can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Cube,
    Cylinder,
    Torus,
    Sphere,
    Cone,
}

impl ShapeKind {
    /// All shape kinds, in GPU upload order.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::Cylinder,
        ShapeKind::Torus,
        ShapeKind::Sphere,
        ShapeKind::Cone,
    ];

    /// Dense index of this kind, usable for per-shape arrays.
    pub const fn index(self) -> usize {
        match self {
            ShapeKind::Cube => 0,
            ShapeKind::Cylinder => 1,
            ShapeKind::Torus => 2,
            ShapeKind::Sphere => 3,
            ShapeKind::Cone => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Torus => "torus",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cone => "cone",
        }
    }
}

/// Generated geometry ready for GPU upload
///
/// Unindexed: `vertices.len()` is always a multiple of 3.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex3D>,
}

impl MeshData {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
        }
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterates the mesh as triangles (consecutive vertex triples).
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex3D]> + '_ {
        self.vertices.chunks_exact(3)
    }

    pub(crate) fn push_triangle(&mut self, a: Vertex3D, b: Vertex3D, c: Vertex3D) {
        self.vertices.extend_from_slice(&[a, b, c]);
    }
}

/// Tessellation parameters for every parametric primitive.
///
/// Defaults match the resolutions the viewer has always used: a 36-sector
/// cylinder and cone, a 24x12 steering-wheel torus and an 18x36 sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tessellation {
    pub cylinder_sectors: u32,
    pub torus_main_radius: f32,
    pub torus_tube_radius: f32,
    pub torus_main_segments: u32,
    pub torus_tube_segments: u32,
    pub sphere_stacks: u32,
    pub sphere_sectors: u32,
    pub cone_sectors: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            cylinder_sectors: 36,
            torus_main_radius: 0.3,
            torus_tube_radius: 0.05,
            torus_main_segments: 24,
            torus_tube_segments: 12,
            sphere_stacks: 18,
            sphere_sectors: 36,
            cone_sectors: 36,
        }
    }
}

impl Tessellation {
    /// Low-resolution preset, handy for software adapters.
    pub fn coarse() -> Self {
        Self {
            cylinder_sectors: 12,
            torus_main_segments: 12,
            torus_tube_segments: 6,
            sphere_stacks: 8,
            sphere_sectors: 12,
            cone_sectors: 12,
            ..Default::default()
        }
    }
}

/// Builds the mesh of one shape kind.
///
/// # Panics
/// Panics if the tessellation parameters for `kind` are below their minimum
/// (see the individual `generate_*` functions).
pub fn generate(kind: ShapeKind, tessellation: &Tessellation) -> MeshData {
    match kind {
        ShapeKind::Cube => generate_cube(),
        ShapeKind::Cylinder => generate_cylinder(tessellation.cylinder_sectors),
        ShapeKind::Torus => generate_torus(
            tessellation.torus_main_radius,
            tessellation.torus_tube_radius,
            tessellation.torus_main_segments,
            tessellation.torus_tube_segments,
        ),
        ShapeKind::Sphere => {
            generate_sphere(tessellation.sphere_stacks, tessellation.sphere_sectors)
        }
        ShapeKind::Cone => generate_cone(tessellation.cone_sectors),
    }
}

/// One immutable mesh per shape kind, built once at startup.
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    meshes: [MeshData; 5],
}

impl ShapeLibrary {
    pub fn new(tessellation: &Tessellation) -> Self {
        let meshes = ShapeKind::ALL.map(|kind| generate(kind, tessellation));
        for kind in ShapeKind::ALL {
            log::debug!(
                "Generated {} mesh: {} triangles",
                kind.name(),
                meshes[kind.index()].triangle_count()
            );
        }
        Self { meshes }
    }

    pub fn mesh(&self, kind: ShapeKind) -> &MeshData {
        &self.meshes[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeKind, &MeshData)> + '_ {
        ShapeKind::ALL.into_iter().map(move |kind| (kind, self.mesh(kind)))
    }
}
