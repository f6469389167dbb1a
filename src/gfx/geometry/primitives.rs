//! # Primitive Shape Generation
//!
//! Functions that tessellate the unit primitives into triangle soups.
//! All shapes are generated with outward normals, texture coordinates and
//! counter-clockwise winding when seen from outside.

use super::MeshData;
use crate::gfx::scene::vertex::Vertex3D;
use std::f32::consts::{FRAC_1_SQRT_2, PI, TAU};

/// Radius shared by the unit cylinder, cone and sphere
pub const UNIT_RADIUS: f32 = 0.5;
/// Half of the unit height of the cylinder and cone
pub const HALF_HEIGHT: f32 = 0.5;

/// Minimum angular subdivisions around a revolve axis
pub const MIN_SECTORS: u32 = 3;
/// Minimum polar bands of a sphere
pub const MIN_STACKS: u32 = 2;

/// Corner layout of one cube face: outward normal, then the four corners in
/// counter-clockwise order seen from outside.
type CubeFace = ([f32; 3], [[f32; 3]; 4]);

#[rustfmt::skip]
const CUBE_FACES: [CubeFace; 6] = [
    // Back face (negative Z)
    ([0.0, 0.0, -1.0], [[ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5]]),
    // Front face (positive Z)
    ([0.0, 0.0,  1.0], [[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]]),
    // Left face (negative X)
    ([-1.0, 0.0, 0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5]]),
    // Right face (positive X)
    ([ 1.0, 0.0, 0.0], [[ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5]]),
    // Bottom face (negative Y)
    ([0.0, -1.0, 0.0], [[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]]),
    // Top face (positive Y)
    ([0.0,  1.0, 0.0], [[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]]),
];

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Generate a unit cube centered at the origin
///
/// Returns 36 vertices (6 faces x 2 triangles) spanning -0.5..0.5 on all axes,
/// with axis-aligned normals and a full [0,1]² UV square on every face.
pub fn generate_cube() -> MeshData {
    let mut data = MeshData::with_capacity(36);

    for (normal, corners) in CUBE_FACES {
        let corner = |i: usize| Vertex3D::new(corners[i], normal, FACE_UVS[i]);
        data.push_triangle(corner(0), corner(1), corner(2));
        data.push_triangle(corner(0), corner(2), corner(3));
    }

    data
}

/// Point on the unit ring at `angle`, returned as (cos, sin).
fn ring(angle: f32) -> (f32, f32) {
    (angle.cos(), angle.sin())
}

/// Generate a capped cylinder of radius 0.5 and height 1 around the Y axis
///
/// # Arguments
/// * `sectors` - Number of angular steps around the axis
///
/// Each sector contributes a wall quad (two triangles) plus one triangle in
/// each cap, so the mesh holds `sectors * 12` vertices. Wall UVs run
/// `u = i / sectors` around and `v = 0..1` bottom to top; caps use a planar
/// mapping centered on (0.5, 0.5).
///
/// # Panics
/// Panics if `sectors < 3`.
pub fn generate_cylinder(sectors: u32) -> MeshData {
    assert!(
        sectors >= MIN_SECTORS,
        "cylinder needs at least {MIN_SECTORS} sectors, got {sectors}"
    );

    let mut data = MeshData::with_capacity(sectors as usize * 12);
    let step = TAU / sectors as f32;

    // Side wall
    for i in 0..sectors {
        let (c1, s1) = ring(i as f32 * step);
        let (c2, s2) = ring((i + 1) as f32 * step);
        let u1 = i as f32 / sectors as f32;
        let u2 = (i + 1) as f32 / sectors as f32;

        let bottom1 = Vertex3D::new(
            [UNIT_RADIUS * c1, -HALF_HEIGHT, UNIT_RADIUS * s1],
            [c1, 0.0, s1],
            [u1, 0.0],
        );
        let top1 = Vertex3D::new(
            [UNIT_RADIUS * c1, HALF_HEIGHT, UNIT_RADIUS * s1],
            [c1, 0.0, s1],
            [u1, 1.0],
        );
        let bottom2 = Vertex3D::new(
            [UNIT_RADIUS * c2, -HALF_HEIGHT, UNIT_RADIUS * s2],
            [c2, 0.0, s2],
            [u2, 0.0],
        );
        let top2 = Vertex3D::new(
            [UNIT_RADIUS * c2, HALF_HEIGHT, UNIT_RADIUS * s2],
            [c2, 0.0, s2],
            [u2, 1.0],
        );

        data.push_triangle(bottom1, top1, bottom2);
        data.push_triangle(bottom2, top1, top2);
    }

    // Top cap
    push_cap(&mut data, sectors, HALF_HEIGHT, 1.0);
    // Bottom cap
    push_cap(&mut data, sectors, -HALF_HEIGHT, -1.0);

    data
}

/// Triangle fan closing a revolve surface at height `y`, facing `facing` (±1) along Y.
fn push_cap(data: &mut MeshData, sectors: u32, y: f32, facing: f32) {
    let step = TAU / sectors as f32;
    let normal = [0.0, facing, 0.0];
    let center = Vertex3D::new([0.0, y, 0.0], normal, [0.5, 0.5]);

    for i in 0..sectors {
        let (c1, s1) = ring(i as f32 * step);
        let (c2, s2) = ring((i + 1) as f32 * step);
        let rim1 = Vertex3D::new(
            [UNIT_RADIUS * c1, y, UNIT_RADIUS * s1],
            normal,
            [0.5 + 0.5 * c1, 0.5 + 0.5 * s1],
        );
        let rim2 = Vertex3D::new(
            [UNIT_RADIUS * c2, y, UNIT_RADIUS * s2],
            normal,
            [0.5 + 0.5 * c2, 0.5 + 0.5 * s2],
        );

        if facing > 0.0 {
            data.push_triangle(center, rim2, rim1);
        } else {
            data.push_triangle(center, rim1, rim2);
        }
    }
}

/// Generate a torus lying in the XZ plane
///
/// # Arguments
/// * `main_radius` - Distance from the torus center to the tube center
/// * `tube_radius` - Radius of the tube
/// * `main_segments` - Segments around the main circle
/// * `tube_segments` - Segments around the tube cross-section
///
/// Normals are the tube's local outward direction and do not depend on
/// `main_radius`. UVs wrap `u = θ / 2π` around the main circle and
/// `v = φ / 2π` around the tube.
///
/// # Panics
/// Panics if either segment count is below 3 or either radius is not positive.
pub fn generate_torus(
    main_radius: f32,
    tube_radius: f32,
    main_segments: u32,
    tube_segments: u32,
) -> MeshData {
    assert!(
        main_segments >= MIN_SECTORS && tube_segments >= MIN_SECTORS,
        "torus needs at least {MIN_SECTORS} segments each way, got {main_segments}x{tube_segments}"
    );
    assert!(
        main_radius > 0.0 && tube_radius > 0.0,
        "torus radii must be positive, got main {main_radius}, tube {tube_radius}"
    );

    let mut data = MeshData::with_capacity((main_segments * tube_segments) as usize * 6);

    let point = |i: u32, j: u32| {
        let u = i as f32 / main_segments as f32;
        let v = j as f32 / tube_segments as f32;
        let (cos_theta, sin_theta) = ring(u * TAU);
        let (cos_phi, sin_phi) = ring(v * TAU);
        let ring_radius = main_radius + tube_radius * cos_phi;

        Vertex3D::new(
            [
                ring_radius * cos_theta,
                tube_radius * sin_phi,
                ring_radius * sin_theta,
            ],
            [cos_phi * cos_theta, sin_phi, cos_phi * sin_theta],
            [u, v],
        )
    };

    for i in 0..main_segments {
        for j in 0..tube_segments {
            let v1 = point(i, j);
            let v2 = point(i + 1, j);
            let v3 = point(i + 1, j + 1);
            let v4 = point(i, j + 1);

            data.push_triangle(v1, v3, v2);
            data.push_triangle(v1, v4, v3);
        }
    }

    data
}

/// Generate a UV sphere of radius 0.5 centered at the origin
///
/// # Arguments
/// * `stacks` - Number of bands from the north pole (+Y) to the south pole
/// * `sectors` - Number of steps around the Y axis
///
/// Every (stack, sector) cell emits two triangles, including the pole cells
/// where one of them collapses onto the pole. The mesh therefore always has
/// `stacks * sectors * 6` vertices.
///
/// # Panics
/// Panics if `stacks < 2` or `sectors < 3`.
pub fn generate_sphere(stacks: u32, sectors: u32) -> MeshData {
    assert!(
        stacks >= MIN_STACKS,
        "sphere needs at least {MIN_STACKS} stacks, got {stacks}"
    );
    assert!(
        sectors >= MIN_SECTORS,
        "sphere needs at least {MIN_SECTORS} sectors, got {sectors}"
    );

    let mut data = MeshData::with_capacity((stacks * sectors) as usize * 6);

    let point = |i: u32, j: u32| {
        let v = i as f32 / stacks as f32;
        let u = j as f32 / sectors as f32;
        let phi = v * PI;
        let (cos_theta, sin_theta) = ring(u * TAU);
        let (sin_phi, cos_phi) = (phi.sin(), phi.cos());
        let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];

        Vertex3D::new(normal.map(|n| n * UNIT_RADIUS), normal, [u, v])
    };

    for i in 0..stacks {
        for j in 0..sectors {
            let a = point(i, j);
            let b = point(i, j + 1);
            let c = point(i + 1, j + 1);
            let d = point(i + 1, j);

            data.push_triangle(a, b, c);
            data.push_triangle(a, c, d);
        }
    }

    data
}

/// Generate a capped cone of radius 0.5 and height 1, apex on +Y
///
/// # Arguments
/// * `sectors` - Number of angular steps around the axis
///
/// Side normals use a fixed 45° slope: `(cos θ, 1, sin θ) / √2`. The apex
/// vertex of each side triangle takes the normal at the segment's midpoint
/// angle. This approximation only holds for the unit proportions; a cone with
/// a different height / radius ratio needs the slope re-derived.
///
/// # Panics
/// Panics if `sectors < 3`.
pub fn generate_cone(sectors: u32) -> MeshData {
    assert!(
        sectors >= MIN_SECTORS,
        "cone needs at least {MIN_SECTORS} sectors, got {sectors}"
    );

    let mut data = MeshData::with_capacity(sectors as usize * 6);
    let step = TAU / sectors as f32;
    let slope_normal = |cos: f32, sin: f32| [FRAC_1_SQRT_2 * cos, FRAC_1_SQRT_2, FRAC_1_SQRT_2 * sin];

    for i in 0..sectors {
        let (c1, s1) = ring(i as f32 * step);
        let (c2, s2) = ring((i + 1) as f32 * step);
        let (cm, sm) = ring((i as f32 + 0.5) * step);
        let u1 = i as f32 / sectors as f32;
        let u2 = (i + 1) as f32 / sectors as f32;

        let base1 = Vertex3D::new(
            [UNIT_RADIUS * c1, -HALF_HEIGHT, UNIT_RADIUS * s1],
            slope_normal(c1, s1),
            [u1, 0.0],
        );
        let base2 = Vertex3D::new(
            [UNIT_RADIUS * c2, -HALF_HEIGHT, UNIT_RADIUS * s2],
            slope_normal(c2, s2),
            [u2, 0.0],
        );
        let apex = Vertex3D::new(
            [0.0, HALF_HEIGHT, 0.0],
            slope_normal(cm, sm),
            [(i as f32 + 0.5) / sectors as f32, 1.0],
        );

        data.push_triangle(base1, apex, base2);
    }

    // Base cap
    push_cap(&mut data, sectors, -HALF_HEIGHT, -1.0);

    data
}
