use std::f32::consts::{PI, TAU};

use cgmath::{Matrix4, Rad, Vector3};

use crate::input::{AeroplaneAction, InputManager};

pub const ROTATION_STEP: f32 = PI / 12.0;
pub const SCALE_SPEED: f32 = 1.5;
pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 3.0;
pub const TRANSLATE_SPEED: f32 = 0.8;
pub const TRANSLATE_BOUND: f32 = 1.0;

/// Interactive transform of the aeroplane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroplaneState {
    pub exploded: bool,
    /// Radians in `[0, 2π)`.
    pub rotation: f32,
    pub scale: f32,
    pub translation: [f32; 2],
}

impl Default for AeroplaneState {
    fn default() -> Self {
        Self {
            exploded: false,
            rotation: 0.0,
            scale: 1.0,
            translation: [0.0, 0.0],
        }
    }
}

impl AeroplaneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_exploded(&mut self) {
        self.exploded = !self.exploded;
        log::info!(
            "{}",
            if self.exploded { "Disassembly view ON" } else { "Assembled view ON" }
        );
    }

    pub fn rotate_step(&mut self) {
        self.rotation += ROTATION_STEP;
        if self.rotation >= TAU {
            self.rotation -= TAU;
        }
        log::info!("Rotation: {:.0} degrees", self.rotation.to_degrees());
    }

    /// Grows or shrinks continuously; `direction` is +1, -1 or 0.
    pub fn change_scale(&mut self, direction: f32, dt: f32) {
        self.scale = (self.scale + direction * SCALE_SPEED * dt).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Moves along each axis only while still inside the bound on that side,
    /// so one step may overshoot it slightly.
    pub fn translate(&mut self, direction: [f32; 2], dt: f32) {
        let step = TRANSLATE_SPEED * dt;
        for (value, dir) in self.translation.iter_mut().zip(direction) {
            if dir > 0.0 && *value < TRANSLATE_BOUND {
                *value += step;
            } else if dir < 0.0 && *value > -TRANSLATE_BOUND {
                *value -= step;
            }
        }
    }

    /// Applies held keys for one frame.
    pub fn update(&mut self, input: &InputManager<AeroplaneAction>, dt: f32) {
        self.change_scale(input.axis(AeroplaneAction::Grow, AeroplaneAction::Shrink), dt);
        self.translate(
            [
                input.axis(AeroplaneAction::MoveRight, AeroplaneAction::MoveLeft),
                input.axis(AeroplaneAction::MoveUp, AeroplaneAction::MoveDown),
            ],
            dt,
        );
    }

    /// `T * Rz * S(s, s, 1)`.
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(self.translation[0], self.translation[1], 0.0))
            * Matrix4::from_angle_z(Rad(self.rotation))
            * Matrix4::from_nonuniform_scale(self.scale, self.scale, 1.0)
    }
}
