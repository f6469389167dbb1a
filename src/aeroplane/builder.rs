//! Triangle-soup construction of the top-down aeroplane.
//!
//! Parts are appended back to front: later triangles paint over earlier ones.

use std::f32::consts::PI;

use crate::gfx::scene::vertex::ColorVertex;

pub type Color = [f32; 3];
pub type Offset = [f32; 2];

const NO_OFFSET: Offset = [0.0, 0.0];

const BODY: Color = [0.88, 0.90, 0.92];
const SHADOW: Color = [0.70, 0.72, 0.76];
const WING: Color = [0.78, 0.80, 0.84];
const COCKPIT: Color = [0.28, 0.33, 0.42];
const ENGINE: Color = [0.48, 0.51, 0.56];
const STABILIZER: Color = [0.82, 0.84, 0.87];
const HIGHLIGHT: Color = [0.96, 0.97, 0.98];
const MID: Color = [0.90, 0.91, 0.93];
const EDGE: Color = [0.80, 0.82, 0.85];

const FUSELAGE_HALF_WIDTH: f32 = 0.07;
const FUSELAGE_TOP: f32 = 0.42;
const FUSELAGE_BOTTOM: f32 = -0.52;
const NOSE_HEIGHT: f32 = 0.25;
const TAIL_HEIGHT: f32 = 0.20;
const SHADOW_SHIFT: f32 = 0.018;

pub const NOSE_SEGMENTS: u32 = 20;
pub const TAIL_SEGMENTS: u32 = 16;

/// Per-component displacement used by the exploded view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartOffsets {
    pub left_wing: Offset,
    pub right_wing: Offset,
    pub left_tail_wing: Offset,
    pub right_tail_wing: Offset,
    pub nose: Offset,
    pub rear_tail: Offset,
    pub left_engine: Offset,
    pub right_engine: Offset,
    pub stabilizer: Offset,
    pub cockpit: Offset,
}

impl PartOffsets {
    pub const ASSEMBLED: Self = Self {
        left_wing: NO_OFFSET,
        right_wing: NO_OFFSET,
        left_tail_wing: NO_OFFSET,
        right_tail_wing: NO_OFFSET,
        nose: NO_OFFSET,
        rear_tail: NO_OFFSET,
        left_engine: NO_OFFSET,
        right_engine: NO_OFFSET,
        stabilizer: NO_OFFSET,
        cockpit: NO_OFFSET,
    };

    pub const EXPLODED: Self = Self {
        left_wing: [-0.20, 0.08],
        right_wing: [0.20, 0.08],
        left_tail_wing: [-0.15, -0.12],
        right_tail_wing: [0.15, -0.12],
        nose: [0.0, 0.15],
        rear_tail: [0.0, -0.15],
        left_engine: [-0.18, 0.20],
        right_engine: [0.18, 0.20],
        stabilizer: [0.0, -0.28],
        cockpit: [0.0, 0.15],
    };

    pub fn for_view(exploded: bool) -> Self {
        if exploded {
            Self::EXPLODED
        } else {
            Self::ASSEMBLED
        }
    }
}

fn vertex(point: [f32; 2], color: Color, offset: Offset) -> ColorVertex {
    ColorVertex {
        position: [point[0] + offset[0], point[1] + offset[1], 0.0],
        color,
    }
}

pub fn add_triangle(
    out: &mut Vec<ColorVertex>,
    corners: [[f32; 2]; 3],
    color: Color,
    offset: Offset,
) {
    out.extend(corners.iter().map(|&p| vertex(p, color, offset)));
}

/// Two triangles `(a, b, c)` and `(a, c, d)`.
pub fn add_quad(
    out: &mut Vec<ColorVertex>,
    corners: [[f32; 2]; 4],
    color: Color,
    offset: Offset,
) {
    let [a, b, c, d] = corners;
    add_triangle(out, [a, b, c], color, offset);
    add_triangle(out, [a, c, d], color, offset);
}

/// Triangle fan around `center`.
pub fn add_ellipse(
    out: &mut Vec<ColorVertex>,
    center: [f32; 2],
    radii: [f32; 2],
    segments: u32,
    color: Color,
    offset: Offset,
) {
    let point = |i: u32| {
        let angle = 2.0 * PI * i as f32 / segments as f32;
        [
            center[0] + radii[0] * angle.cos(),
            center[1] + radii[1] * angle.sin(),
        ]
    };
    for i in 0..segments {
        add_triangle(out, [center, point(i), point(i + 1)], color, offset);
    }
}

/// Parabolic taper from full `width` at `base_y` to a point `height` away.
/// `direction` is +1 for a taper growing upwards and -1 downwards.
#[allow(clippy::too_many_arguments)]
fn add_taper(
    out: &mut Vec<ColorVertex>,
    center_x: f32,
    base_y: f32,
    width: f32,
    height: f32,
    direction: f32,
    segments: u32,
    color: Color,
    offset: Offset,
) {
    let ring = |i: u32| {
        let t = i as f32 / segments as f32;
        (base_y + direction * height * t, width * (1.0 - t * t))
    };
    for i in 0..segments {
        let (y1, w1) = ring(i);
        let (y2, w2) = ring(i + 1);
        add_quad(
            out,
            [
                [center_x - w1, y1],
                [center_x + w1, y1],
                [center_x + w2, y2],
                [center_x - w2, y2],
            ],
            color,
            offset,
        );
    }
}

/// Pointed nose extending upwards from `base_y`.
#[allow(clippy::too_many_arguments)]
pub fn add_nose(
    out: &mut Vec<ColorVertex>,
    center_x: f32,
    base_y: f32,
    width: f32,
    height: f32,
    segments: u32,
    color: Color,
    offset: Offset,
) {
    add_taper(out, center_x, base_y, width, height, 1.0, segments, color, offset);
}

/// Pointed tail extending downwards from `base_y`.
#[allow(clippy::too_many_arguments)]
pub fn add_tail(
    out: &mut Vec<ColorVertex>,
    center_x: f32,
    base_y: f32,
    width: f32,
    height: f32,
    segments: u32,
    color: Color,
    offset: Offset,
) {
    add_taper(out, center_x, base_y, width, height, -1.0, segments, color, offset);
}

/// Half-disc fan between `start` and `start + PI`.
fn add_half_disc(
    out: &mut Vec<ColorVertex>,
    center: [f32; 2],
    radii: [f32; 2],
    start: f32,
    segments: u32,
    color: Color,
    offset: Offset,
) {
    let point = |i: u32| {
        let angle = start + PI * i as f32 / segments as f32;
        [
            center[0] + radii[0] * angle.cos(),
            center[1] + radii[1] * angle.sin(),
        ]
    };
    for i in 0..segments {
        add_triangle(out, [center, point(i), point(i + 1)], color, offset);
    }
}

fn add_shadows(out: &mut Vec<ColorVertex>) {
    let w = FUSELAGE_HALF_WIDTH;
    let s = SHADOW_SHIFT;
    add_quad(
        out,
        [
            [-w + s, FUSELAGE_TOP - s],
            [w + s, FUSELAGE_TOP - s],
            [w + s, FUSELAGE_BOTTOM - s],
            [-w + s, FUSELAGE_BOTTOM - s],
        ],
        SHADOW,
        NO_OFFSET,
    );
    add_nose(out, s, FUSELAGE_TOP - s, w, NOSE_HEIGHT, 16, SHADOW, NO_OFFSET);
    add_tail(out, s, FUSELAGE_BOTTOM - s, w * 0.7, TAIL_HEIGHT, 12, SHADOW, NO_OFFSET);

    // Mirrored pairs: the shadow leans outwards on each side and down.
    for side in [-1.0f32, 1.0] {
        let x = |v: f32| side * (v + s);
        let y = |v: f32| v - s;
        add_triangle(out, [[x(0.06), y(0.15)], [x(0.06), y(-0.02)], [x(0.50), y(-0.08)]], SHADOW, NO_OFFSET);
        add_triangle(out, [[x(0.06), y(-0.02)], [x(0.50), y(-0.12)], [x(0.50), y(-0.08)]], SHADOW, NO_OFFSET);
    }
    for side in [-1.0f32, 1.0] {
        let x = |v: f32| side * (v + s);
        let y = |v: f32| v - s;
        add_triangle(out, [[x(0.04), y(-0.50)], [x(0.04), y(-0.56)], [x(0.18), y(-0.56)]], SHADOW, NO_OFFSET);
        add_triangle(out, [[x(0.04), y(-0.56)], [x(0.18), y(-0.58)], [x(0.18), y(-0.56)]], SHADOW, NO_OFFSET);
    }
}

fn add_engine(out: &mut Vec<ColorVertex>, side: f32, offset: Offset) {
    let y = 0.12;
    let (inner, outer, mid) = (side * 0.15, side * 0.21, side * 0.18);
    add_quad(
        out,
        [[inner, y + 0.06], [outer, y + 0.06], [outer, y - 0.06], [inner, y - 0.06]],
        EDGE,
        offset,
    );
    add_triangle(out, [[inner, y - 0.06], [outer, y - 0.06], [mid, y - 0.10]], EDGE, offset);
    add_ellipse(out, [mid, y + 0.06], [0.028, 0.02], 16, ENGINE, offset);
}

/// Swept trapezoid between a root chord at `root_x` and a tip chord at `tip_x`.
fn add_swept_wing(
    out: &mut Vec<ColorVertex>,
    side: f32,
    root: (f32, f32, f32),
    tip: (f32, f32, f32),
    offset: Offset,
) {
    let (root_x, root_front, root_back) = root;
    let (tip_x, tip_front, tip_back) = tip;
    let (root_x, tip_x) = (side * root_x, side * tip_x);
    add_triangle(out, [[root_x, root_front], [root_x, root_back], [tip_x, tip_front]], WING, offset);
    add_triangle(out, [[root_x, root_back], [tip_x, tip_back], [tip_x, tip_front]], WING, offset);
}

fn add_fuselage(out: &mut Vec<ColorVertex>, parts: &PartOffsets) {
    let w = FUSELAGE_HALF_WIDTH;
    let strip = w / 4.0;
    // Six vertical strips, darkest at the edges.
    let strips = [
        (-w, -w + strip, EDGE),
        (-w + strip, -w + 2.0 * strip, MID),
        (-w + 2.0 * strip, 0.0, HIGHLIGHT),
        (0.0, w - 2.0 * strip, HIGHLIGHT),
        (w - 2.0 * strip, w - strip, MID),
        (w - strip, w, EDGE),
    ];
    for (left, right, color) in strips {
        add_quad(
            out,
            [
                [left, FUSELAGE_TOP],
                [right, FUSELAGE_TOP],
                [right, FUSELAGE_BOTTOM],
                [left, FUSELAGE_BOTTOM],
            ],
            color,
            NO_OFFSET,
        );
    }

    add_nose(out, 0.0, FUSELAGE_TOP, w, NOSE_HEIGHT, NOSE_SEGMENTS, BODY, parts.nose);
    add_tail(out, 0.0, FUSELAGE_BOTTOM, w * 0.7, TAIL_HEIGHT, TAIL_SEGMENTS, BODY, parts.rear_tail);
}

fn add_cockpit(out: &mut Vec<ColorVertex>, offset: Offset) {
    let center = [0.0, 0.48];
    let radius = 0.055;
    add_half_disc(out, center, [radius, radius], PI, 16, COCKPIT, offset);
    add_triangle(out, [[0.0, 0.56], [-radius, 0.48], [radius, 0.48]], COCKPIT, offset);
}

fn add_stabilizer(out: &mut Vec<ColorVertex>, offset: Offset) {
    let half_width = 0.014;
    let top = -0.50 - half_width;
    let bottom = -0.68 + half_width;
    add_quad(
        out,
        [[-half_width, top], [half_width, top], [half_width, bottom], [-half_width, bottom]],
        STABILIZER,
        offset,
    );
    let radii = [half_width, half_width];
    add_half_disc(out, [0.0, top], radii, 0.0, 12, STABILIZER, offset);
    add_half_disc(out, [0.0, bottom], radii, PI, 12, STABILIZER, offset);

    let shade = STABILIZER.map(|c| c - 0.05);
    add_quad(
        out,
        [
            [0.003, top + 0.02],
            [half_width, top + 0.02],
            [half_width, bottom - 0.02],
            [0.003, bottom - 0.02],
        ],
        shade,
        offset,
    );
}

/// Builds the whole aeroplane. Drop shadows are only emitted when assembled.
pub fn build_aeroplane(exploded: bool) -> Vec<ColorVertex> {
    let parts = PartOffsets::for_view(exploded);
    let mut out = Vec::with_capacity(768);

    if !exploded {
        add_shadows(&mut out);
    }

    add_engine(&mut out, -1.0, parts.left_engine);
    add_engine(&mut out, 1.0, parts.right_engine);

    let wing_root = (0.06, 0.18, -0.02);
    let wing_tip = (0.52, -0.06, -0.10);
    add_swept_wing(&mut out, -1.0, wing_root, wing_tip, parts.left_wing);
    add_swept_wing(&mut out, 1.0, wing_root, wing_tip, parts.right_wing);

    let tail_root = (0.04, -0.50, -0.56);
    let tail_tip = (0.18, -0.56, -0.58);
    add_swept_wing(&mut out, -1.0, tail_root, tail_tip, parts.left_tail_wing);
    add_swept_wing(&mut out, 1.0, tail_root, tail_tip, parts.right_tail_wing);

    add_fuselage(&mut out, &parts);
    add_cockpit(&mut out, parts.cockpit);
    add_stabilizer(&mut out, parts.stabilizer);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADOW_VERTICES: usize = 6 + 16 * 6 + 12 * 6 + 4 * 3 + 4 * 3;
    const BODY_VERTICES: usize = 2 * (6 + 3 + 16 * 3) // engines
        + 12 + 12 // main and tail wings
        + 6 * 6 + NOSE_SEGMENTS as usize * 6 + TAIL_SEGMENTS as usize * 6
        + 17 * 3 // cockpit
        + 6 + 24 * 3 + 6; // stabilizer

    #[test]
    fn vertex_counts() {
        assert_eq!(build_aeroplane(false).len(), SHADOW_VERTICES + BODY_VERTICES);
        assert_eq!(build_aeroplane(true).len(), BODY_VERTICES);
        assert_eq!(build_aeroplane(false).len(), 723);
    }

    #[test]
    fn exploded_view_drops_shadows() {
        let exploded = build_aeroplane(true);
        assert!(exploded.iter().all(|v| v.color != SHADOW));
        let assembled = build_aeroplane(false);
        assert!(assembled.iter().take(SHADOW_VERTICES).all(|v| v.color == SHADOW));
    }

    #[test]
    fn helpers_apply_offset() {
        let mut out = Vec::new();
        add_quad(&mut out, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], WING, [0.5, -0.5]);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].position, [0.5, -0.5, 0.0]);
        assert_eq!(out[5].position, [0.5, 0.5, 0.0]);
    }

    #[test]
    fn nose_tapers_to_a_point() {
        let mut out = Vec::new();
        add_nose(&mut out, 0.0, 0.0, 0.1, 0.25, 4, BODY, NO_OFFSET);
        assert_eq!(out.len(), 24);
        let tip = out.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((tip - 0.25).abs() < 1e-6);
        let at_tip: Vec<_> = out.iter().filter(|v| (v.position[1] - 0.25).abs() < 1e-6).collect();
        assert!(at_tip.iter().all(|v| v.position[0].abs() < 1e-6));
    }

    #[test]
    fn tail_extends_downwards() {
        let mut out = Vec::new();
        add_tail(&mut out, 0.0, -0.5, 0.05, 0.2, 8, BODY, NO_OFFSET);
        let lowest = out.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!((lowest + 0.7).abs() < 1e-6);
    }

    #[test]
    fn ellipse_stays_within_radii() {
        let mut out = Vec::new();
        add_ellipse(&mut out, [0.2, 0.1], [0.03, 0.02], 16, ENGINE, NO_OFFSET);
        assert_eq!(out.len(), 48);
        for v in &out {
            let dx = (v.position[0] - 0.2) / 0.03;
            let dy = (v.position[1] - 0.1) / 0.02;
            assert!(dx * dx + dy * dy <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn exploded_nose_moves_up() {
        let top = |verts: &[ColorVertex]| {
            verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max)
        };
        let assembled = top(&build_aeroplane(false));
        let exploded = top(&build_aeroplane(true));
        // The cockpit tip (0.56) sits below the nose tip (0.67) in both views.
        assert!((assembled - 0.67).abs() < 1e-5);
        assert!((exploded - 0.82).abs() < 1e-5);
    }
}
