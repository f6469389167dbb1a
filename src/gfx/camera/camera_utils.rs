use cgmath::{Matrix4, Point3};

use super::{camera_controller::CameraController, fly_camera::FlyCamera};
use crate::input::{Action, InputManager};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn update(&mut self, input: &InputManager<Action>, dt: f32) {
        self.controller.update_camera(&mut self.camera, input, dt);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;

    /// World-space eye position, used for specular lighting.
    fn eye(&self) -> Point3<f32>;
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, Transform};

    #[test]
    fn depth_correction_maps_gl_range_to_wgpu() {
        let near = OPENGL_TO_WGPU_MATRIX.transform_point(Point3::new(0.0, 0.0, -1.0));
        let far = OPENGL_TO_WGPU_MATRIX.transform_point(Point3::new(0.0, 0.0, 1.0));
        assert!((near.z - 0.0).abs() < 1e-6);
        assert!((far.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn matrix_array_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let array = convert_matrix4_to_array(m);
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
