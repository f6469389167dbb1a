//! Viewport tiling for the single and quad presentations.
//!
//! In quad layout the surface is split 2x2: the fly camera top-left, then
//! orthographic top, front and side views of the vehicle.

use cgmath::{ortho, EuclideanSpace, Matrix4, Point3, Vector3};

use super::camera::{Camera, FlyCamera, OPENGL_TO_WGPU_MATRIX};

/// Half the visible height of each orthographic view, in world units.
pub const ORTHO_HALF_EXTENT: f32 = 8.0;
const ORTHO_DISTANCE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportLayout {
    #[default]
    Single,
    Quad,
}

impl ViewportLayout {
    pub fn toggled(self) -> Self {
        match self {
            ViewportLayout::Single => ViewportLayout::Quad,
            ViewportLayout::Quad => ViewportLayout::Single,
        }
    }
}

/// Pixel rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Perspective,
    Top,
    Front,
    Side,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Perspective => "Camera",
            ViewKind::Top => "Top",
            ViewKind::Front => "Front",
            ViewKind::Side => "Side",
        }
    }

    /// Eye and up vector of an orthographic view around `focus`.
    fn ortho_eye(self, focus: Point3<f32>) -> (Point3<f32>, Vector3<f32>) {
        match self {
            // The vehicle front (-X) points up the screen
            ViewKind::Top => (
                focus + Vector3::new(0.0, ORTHO_DISTANCE, 0.0),
                Vector3::new(-1.0, 0.0, 0.0),
            ),
            ViewKind::Front => (
                focus + Vector3::new(-ORTHO_DISTANCE, 0.0, 0.0),
                Vector3::unit_y(),
            ),
            ViewKind::Side | ViewKind::Perspective => (
                focus + Vector3::new(0.0, 0.0, ORTHO_DISTANCE),
                Vector3::unit_y(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub kind: ViewKind,
    pub rect: ViewportRect,
    pub view_proj: Matrix4<f32>,
    pub eye: Point3<f32>,
}

fn perspective_viewport(rect: ViewportRect, camera: &FlyCamera) -> Viewport {
    let mut camera = *camera;
    camera.aspect = rect.aspect();
    Viewport {
        kind: ViewKind::Perspective,
        rect,
        view_proj: camera.build_view_projection_matrix(),
        eye: camera.eye(),
    }
}

fn ortho_viewport(kind: ViewKind, rect: ViewportRect, focus: Vector3<f32>) -> Viewport {
    let focus = Point3::from_vec(focus);
    let (eye, up) = kind.ortho_eye(focus);
    let view = Matrix4::look_at_rh(eye, focus, up);

    let half_h = ORTHO_HALF_EXTENT;
    let half_w = half_h * rect.aspect();
    let proj = OPENGL_TO_WGPU_MATRIX
        * ortho(-half_w, half_w, -half_h, half_h, 0.1, ORTHO_DISTANCE * 4.0);

    Viewport {
        kind,
        rect,
        view_proj: proj * view,
        eye,
    }
}

/// Splits a `width` x `height` surface into viewports. A surface too small to
/// give every view at least one pixel yields none.
pub fn layout_viewports(
    layout: ViewportLayout,
    width: u32,
    height: u32,
    camera: &FlyCamera,
    focus: Vector3<f32>,
) -> Vec<Viewport> {
    let min = match layout {
        ViewportLayout::Single => 1,
        ViewportLayout::Quad => 2,
    };
    if width < min || height < min {
        return Vec::new();
    }

    match layout {
        ViewportLayout::Single => vec![perspective_viewport(
            ViewportRect {
                x: 0,
                y: 0,
                width,
                height,
            },
            camera,
        )],
        ViewportLayout::Quad => {
            let left = width / 2;
            let top = height / 2;
            let cell = |col: u32, row: u32| ViewportRect {
                x: if col == 0 { 0 } else { left },
                y: if row == 0 { 0 } else { top },
                width: if col == 0 { left } else { width - left },
                height: if row == 0 { top } else { height - top },
            };

            vec![
                perspective_viewport(cell(0, 0), camera),
                ortho_viewport(ViewKind::Top, cell(1, 0), focus),
                ortho_viewport(ViewKind::Front, cell(0, 1), focus),
                ortho_viewport(ViewKind::Side, cell(1, 1), focus),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Transform};

    fn origin() -> Vector3<f32> {
        Vector3::new(0.0, 1.0, 0.0)
    }

    #[test]
    fn single_layout_fills_surface() {
        let camera = FlyCamera::new(1.0);
        let views = layout_viewports(ViewportLayout::Single, 1200, 800, &camera, origin());
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].rect,
            ViewportRect {
                x: 0,
                y: 0,
                width: 1200,
                height: 800
            }
        );
    }

    #[test]
    fn quad_layout_tiles_odd_sizes_without_gaps() {
        let camera = FlyCamera::new(1.0);
        let views = layout_viewports(ViewportLayout::Quad, 1201, 799, &camera, origin());
        assert_eq!(views.len(), 4);

        let area: u32 = views.iter().map(|v| v.rect.width * v.rect.height).sum();
        assert_eq!(area, 1201 * 799);
        assert_eq!(views[3].rect.x + views[3].rect.width, 1201);
        assert_eq!(views[3].rect.y + views[3].rect.height, 799);

        let kinds: Vec<_> = views.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViewKind::Perspective, ViewKind::Top, ViewKind::Front, ViewKind::Side]
        );
    }

    #[test]
    fn zero_sized_surface_has_no_viewports() {
        let camera = FlyCamera::new(1.0);
        assert!(layout_viewports(ViewportLayout::Quad, 0, 600, &camera, origin()).is_empty());
        assert!(layout_viewports(ViewportLayout::Single, 800, 0, &camera, origin()).is_empty());
    }

    #[test]
    fn one_pixel_surface_skips_empty_quad_cells() {
        let camera = FlyCamera::new(1.0);
        assert!(layout_viewports(ViewportLayout::Quad, 1, 600, &camera, origin()).is_empty());
        assert!(layout_viewports(ViewportLayout::Quad, 800, 1, &camera, origin()).is_empty());

        let single = layout_viewports(ViewportLayout::Single, 1, 1, &camera, origin());
        assert_eq!(single.len(), 1);

        let quad = layout_viewports(ViewportLayout::Quad, 2, 2, &camera, origin());
        assert_eq!(quad.len(), 4);
        assert!(quad.iter().all(|v| v.rect.width == 1 && v.rect.height == 1));
    }

    #[test]
    fn quad_labels_read_in_layout_order() {
        let camera = FlyCamera::new(1.0);
        let labels: Vec<_> = layout_viewports(ViewportLayout::Quad, 800, 600, &camera, origin())
            .iter()
            .map(|v| v.kind.label())
            .collect();
        assert_eq!(labels, ["Camera", "Top", "Front", "Side"]);
    }

    #[test]
    fn ortho_views_center_the_focus_point() {
        let camera = FlyCamera::new(1.0);
        let focus = Vector3::new(3.0, 1.0, -2.0);
        let views = layout_viewports(ViewportLayout::Quad, 800, 600, &camera, focus);

        for view in &views[1..] {
            let clip = view.view_proj.transform_point(Point3::from_vec(focus));
            assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4, "{:?}", view.kind);
            assert!((0.0..=1.0).contains(&clip.z));
        }
    }

    #[test]
    fn top_view_shows_vehicle_front_upward() {
        let camera = FlyCamera::new(1.0);
        let views = layout_viewports(ViewportLayout::Quad, 800, 800, &camera, origin());
        let top = &views[1];

        let ahead = top
            .view_proj
            .transform_point(Point3::new(-4.0, 1.0, 0.0));
        assert!(ahead.y > 0.0);
        assert!(ahead.x.abs() < 1e-4);
        assert!((top.eye - Point3::new(0.0, 51.0, 0.0)).magnitude() < 1e-4);
    }
}
