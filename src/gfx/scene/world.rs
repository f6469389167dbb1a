//! Static surroundings: a ground slab with a road strip running along X.

use cgmath::{Matrix4, Vector3};

use super::transform::{place, DrawSink};
use crate::gfx::geometry::ShapeKind;

/// Height of the ground surface; wheels of an undriven bus rest on it.
pub const GROUND_LEVEL: f32 = -1.6;

const GROUND_COLOR: [f32; 3] = [0.35, 0.55, 0.3];
const ROAD_COLOR: [f32; 3] = [0.25, 0.25, 0.27];

pub fn compose_world(sink: &mut impl DrawSink) {
    let origin = Matrix4::from_translation(Vector3::new(0.0, GROUND_LEVEL, 0.0));

    sink.draw(
        ShapeKind::Cube,
        place(origin, Vector3::new(0.0, -0.05, 0.0), Vector3::new(200.0, 0.1, 200.0)),
        GROUND_COLOR,
    );
    sink.draw(
        ShapeKind::Cube,
        place(origin, Vector3::new(0.0, 0.005, 0.0), Vector3::new(200.0, 0.01, 8.0)),
        ROAD_COLOR,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::DrawList;
    use cgmath::{Point3, Transform};

    #[test]
    fn ground_top_sits_at_ground_level() {
        let mut list = DrawList::new();
        compose_world(&mut list);

        let ground = list.commands()[0];
        let top = ground.model.transform_point(Point3::new(0.0, 0.5, 0.0));
        assert!((top.y - GROUND_LEVEL).abs() < 1e-5);
    }
}
