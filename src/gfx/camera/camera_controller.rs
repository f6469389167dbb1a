use super::fly_camera::FlyCamera;
use crate::input::{Action, InputManager};

/// Turns held camera actions into per-frame camera motion.
pub struct CameraController {
    /// Units per second
    pub move_speed: f32,
    /// Degrees per second for pitch, yaw and roll
    pub rotate_speed: f32,
    /// Degrees per second along the orbit circle
    pub orbit_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(8.0, 50.0, 60.0)
    }
}

impl CameraController {
    pub fn new(move_speed: f32, rotate_speed: f32, orbit_speed: f32) -> Self {
        Self {
            move_speed,
            rotate_speed,
            orbit_speed,
        }
    }

    /// Applies one frame of input. Shift reverses rotation and orbit direction.
    pub fn update_camera(&self, camera: &mut FlyCamera, input: &InputManager<Action>, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let sign = if input.shift_held() { -1.0 } else { 1.0 };

        let rotation = self.rotate_speed * dt * sign;
        if input.is_active(Action::Pitch) {
            camera.add_pitch(rotation);
        }
        if input.is_active(Action::Yaw) {
            camera.add_yaw(rotation);
        }
        if input.is_active(Action::Roll) {
            camera.add_roll(rotation);
        }

        let step = self.move_speed * dt;
        let forward = input.axis(Action::MoveForward, Action::MoveBackward);
        let strafe = input.axis(Action::MoveRight, Action::MoveLeft);
        let lift = input.axis(Action::MoveUp, Action::MoveDown);
        if forward != 0.0 || strafe != 0.0 || lift != 0.0 {
            camera.translate(forward * step, strafe * step, lift * step);
        }

        // Orbit runs last so it overrides the free-fly pose
        if input.is_active(Action::Orbit) {
            camera.orbit(self.orbit_speed * dt * sign);
        }
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }
}
