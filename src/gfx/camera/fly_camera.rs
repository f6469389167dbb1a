use super::camera_utils::{Camera, OPENGL_TO_WGPU_MATRIX};
use cgmath::*;

/// Circle the camera follows while orbit mode is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    pub center: Vector3<f32>,
    pub radius: f32,
    /// Absolute eye height, independent of the center
    pub height: f32,
}

impl Default for OrbitPath {
    fn default() -> Self {
        Self {
            center: Vector3::new(0.0, 1.0, 0.0),
            radius: 20.0,
            height: 10.0,
        }
    }
}

/// Free-flying camera steered by pitch, yaw and roll in degrees.
///
/// Yaw -90 looks down -Z. Pitch is clamped to ±89 to keep `look_at` stable.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub orbit_angle: f32,
    pub orbit_path: OrbitPath,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

pub const PITCH_LIMIT: f32 = 89.0;
/// Pitch applied whenever the camera moves along its orbit.
pub const ORBIT_PITCH: f32 = -20.0;

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn eye(&self) -> Point3<f32> {
        Point3::from_vec(self.position)
    }
}

impl FlyCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vector3::new(0.0, 5.0, 20.0),
            pitch: -15.0,
            yaw: -90.0,
            roll: 0.0,
            orbit_angle: 0.0,
            orbit_path: OrbitPath::default(),
            aspect,
            fovy: Deg(45.0).into(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn reset_to_default(&mut self) {
        *self = Self {
            orbit_path: self.orbit_path,
            ..Self::new(self.aspect)
        };
    }

    pub fn front(&self) -> Vector3<f32> {
        let (pitch, yaw) = (Deg(self.pitch), Deg(self.yaw));
        Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(Vector3::unit_y()).normalize()
    }

    /// Camera up, tilted about the view direction by the roll angle.
    pub fn up(&self) -> Vector3<f32> {
        let front = self.front();
        let up = self.right().cross(front).normalize();
        if self.roll == 0.0 {
            return up;
        }
        Matrix3::from_axis_angle(front, Deg(self.roll)) * up
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front(), self.up())
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    pub fn add_roll(&mut self, delta: f32) {
        self.roll += delta;
    }

    /// Moves by `forward` along the view direction, `strafe` along right and
    /// `lift` along world Y.
    pub fn translate(&mut self, forward: f32, strafe: f32, lift: f32) {
        self.position += self.front() * forward + self.right() * strafe;
        self.position.y += lift;
    }

    /// Advances the orbit angle and snaps the camera onto the orbit circle,
    /// facing its center.
    pub fn orbit(&mut self, delta: f32) {
        self.orbit_angle = (self.orbit_angle + delta).rem_euclid(360.0);

        let path = self.orbit_path;
        let a = Deg(self.orbit_angle);
        self.position = Vector3::new(
            path.center.x + path.radius * a.sin(),
            path.height,
            path.center.z + path.radius * a.cos(),
        );
        self.yaw = -self.orbit_angle - 90.0;
        self.pitch = ORBIT_PITCH;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}
