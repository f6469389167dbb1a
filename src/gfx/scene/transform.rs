//! Transform composition helpers and the draw sink the vehicle composers emit into.
//!
//! Every placed part follows the same order: `parent * T * R * S`. Hinged parts
//! insert a pivot first, `parent * T(hinge) * R(angle)`, and are then offset and
//! scaled relative to that pivot.

use cgmath::{Deg, Matrix4, SquareMatrix, Vector3};

use crate::gfx::geometry::ShapeKind;

/// Principal axis for a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn rotation(self, degrees: f32) -> Matrix4<f32> {
        match self {
            Axis::X => Matrix4::from_angle_x(Deg(degrees)),
            Axis::Y => Matrix4::from_angle_y(Deg(degrees)),
            Axis::Z => Matrix4::from_angle_z(Deg(degrees)),
        }
    }
}

/// An ordered chain of axis rotations in degrees.
///
/// Rotations apply in the order they were chained, the first one being the
/// outermost: `Rotation::about(Z, -30.0).then(X, 90.0)` yields `Rz * Rx`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    matrix: Matrix4<f32>,
}

impl Rotation {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn about(axis: Axis, degrees: f32) -> Self {
        Self {
            matrix: axis.rotation(degrees),
        }
    }

    pub fn then(self, axis: Axis, degrees: f32) -> Self {
        Self {
            matrix: self.matrix * axis.rotation(degrees),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Local transform `T * R * S`.
pub fn trs(translation: Vector3<f32>, rotation: Rotation, scale: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(translation)
        * rotation.matrix()
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// World transform of an unrotated part: `parent * T * S`.
pub fn place(parent: Matrix4<f32>, translation: Vector3<f32>, scale: Vector3<f32>) -> Matrix4<f32> {
    parent * trs(translation, Rotation::identity(), scale)
}

/// Hinge frame for a rotating sub-part: `parent * T(hinge) * R(axis, degrees)`.
///
/// A point at the frame's origin stays at `parent * hinge` for every angle.
pub fn pivot(parent: Matrix4<f32>, hinge: Vector3<f32>, axis: Axis, degrees: f32) -> Matrix4<f32> {
    parent * Matrix4::from_translation(hinge) * axis.rotation(degrees)
}

/// One primitive instance to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub shape: ShapeKind,
    pub model: Matrix4<f32>,
    pub color: [f32; 3],
}

/// Receiver of the draw commands emitted while walking a vehicle hierarchy.
pub trait DrawSink {
    fn draw(&mut self, shape: ShapeKind, model: Matrix4<f32>, color: [f32; 3]);
}

/// Per-frame list of draw commands, in emission order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands.iter()
    }

    /// Number of commands referencing `shape`.
    pub fn count(&self, shape: ShapeKind) -> usize {
        self.commands.iter().filter(|c| c.shape == shape).count()
    }
}

impl DrawSink for DrawList {
    fn draw(&mut self, shape: ShapeKind, model: Matrix4<f32>, color: [f32; 3]) {
        self.commands.push(DrawCommand {
            shape,
            model,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Point3, Transform};

    fn assert_close(a: Point3<f32>, b: Point3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn trs_applies_scale_then_rotation_then_translation() {
        let m = trs(
            Vector3::new(1.0, 2.0, 3.0),
            Rotation::about(Axis::Y, 90.0),
            Vector3::new(2.0, 1.0, 1.0),
        );
        // (1,0,0) -> scale (2,0,0) -> rotate about Y (0,0,-2) -> translate
        assert_close(
            m.transform_point(Point3::new(1.0, 0.0, 0.0)),
            Point3::new(1.0, 2.0, 1.0),
        );
    }

    #[test]
    fn chained_rotation_keeps_order() {
        let chained = Rotation::about(Axis::Z, -30.0).then(Axis::X, 90.0);
        let expected = Matrix4::from_angle_z(Deg(-30.0)) * Matrix4::from_angle_x(Deg(90.0));
        assert_eq!(chained.matrix(), expected);
    }

    #[test]
    fn pivot_origin_is_angle_invariant() {
        let parent = Matrix4::from_translation(Vector3::new(5.0, 0.0, -2.0));
        let hinge = Vector3::new(-3.5, 0.0, 1.5);
        for step in 0..=18 {
            let frame = pivot(parent, hinge, Axis::Y, step as f32 * 5.0);
            assert_close(
                frame.transform_point(Point3::new(0.0, 0.0, 0.0)),
                Point3::new(1.5, 0.0, -0.5),
            );
        }
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.draw(ShapeKind::Cube, Matrix4::identity(), [1.0, 0.0, 0.0]);
        list.draw(ShapeKind::Torus, Matrix4::identity(), [0.0, 1.0, 0.0]);
        list.draw(ShapeKind::Cube, Matrix4::identity(), [0.0, 0.0, 1.0]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.count(ShapeKind::Cube), 2);
        assert_eq!(list.commands()[1].shape, ShapeKind::Torus);

        list.clear();
        assert!(list.is_empty());
    }
}
