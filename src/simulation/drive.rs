//! Forward-Euler driving model for the vehicle root transform.
//!
//! The vehicle's front faces local -X, so at heading 0 it drives toward -X.
//! Positive heading turns it toward +Z (to its left, seen from above).

use cgmath::{Deg, Matrix4, Vector3};

/// Tunable limits of the driving model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveParams {
    /// Top forward speed, units per second. Reverse is capped at half of it.
    pub max_speed: f32,
    /// Speed change per second at full throttle
    pub acceleration: f32,
    /// Speed lost per second while coasting
    pub drag: f32,
    /// Degrees per second at full steer and top speed
    pub turn_rate: f32,
    /// Units per second at full lift
    pub climb_rate: f32,
    pub min_altitude: f32,
    pub max_altitude: f32,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            max_speed: 12.0,
            acceleration: 6.0,
            drag: 4.0,
            turn_rate: 60.0,
            climb_rate: 2.0,
            min_altitude: 0.0,
            max_altitude: 5.0,
        }
    }
}

/// Per-frame control input, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveInput {
    pub throttle: f32,
    /// Positive steers left
    pub steer: f32,
    pub lift: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriveState {
    pub position: Vector3<f32>,
    /// Degrees in [0, 360)
    pub heading: f32,
    pub speed: f32,
    pub altitude: f32,
    pub params: DriveParams,
}

impl Default for DriveState {
    fn default() -> Self {
        Self::new(DriveParams::default())
    }
}

impl DriveState {
    pub fn new(params: DriveParams) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            heading: 0.0,
            speed: 0.0,
            altitude: params.min_altitude,
            params,
        }
    }

    /// Unit vector the vehicle drives along at its current heading.
    pub fn forward(&self) -> Vector3<f32> {
        let h = self.heading.to_radians();
        Vector3::new(-h.cos(), 0.0, h.sin())
    }

    /// Integrates one step. A negative or non-finite `dt` leaves the state untouched.
    pub fn update(&mut self, input: DriveInput, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let p = self.params;

        let throttle = input.throttle.clamp(-1.0, 1.0);
        if throttle != 0.0 {
            self.speed += throttle * p.acceleration * dt;
        } else {
            let slowdown = p.drag * dt;
            if self.speed.abs() <= slowdown {
                self.speed = 0.0;
            } else {
                self.speed -= slowdown * self.speed.signum();
            }
        }
        self.speed = self.speed.clamp(-p.max_speed * 0.5, p.max_speed);

        let steer = input.steer.clamp(-1.0, 1.0);
        self.heading = (self.heading + steer * p.turn_rate * (self.speed / p.max_speed) * dt)
            .rem_euclid(360.0);

        self.position += self.forward() * (self.speed * dt);

        let lift = input.lift.clamp(-1.0, 1.0);
        self.altitude =
            (self.altitude + lift * p.climb_rate * dt).clamp(p.min_altitude, p.max_altitude);
    }

    /// `T(position + altitude * Y) * R_y(heading)`
    pub fn root_transform(&self) -> Matrix4<f32> {
        let lifted = self.position + Vector3::new(0.0, self.altitude, 0.0);
        Matrix4::from_translation(lifted) * Matrix4::from_angle_y(Deg(self.heading))
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Point3, Transform};

    const DT: f32 = 1.0 / 60.0;

    fn throttle(value: f32) -> DriveInput {
        DriveInput {
            throttle: value,
            ..Default::default()
        }
    }

    #[test]
    fn full_throttle_accelerates_then_caps() {
        let mut drive = DriveState::default();
        drive.update(throttle(1.0), 0.5);
        assert!((drive.speed - 3.0).abs() < 1e-5);

        for _ in 0..600 {
            drive.update(throttle(1.0), DT);
        }
        assert_eq!(drive.speed, drive.params.max_speed);
    }

    #[test]
    fn reverse_is_capped_at_half_speed() {
        let mut drive = DriveState::default();
        for _ in 0..600 {
            drive.update(throttle(-1.0), DT);
        }
        assert_eq!(drive.speed, -drive.params.max_speed * 0.5);
    }

    #[test]
    fn drag_stops_without_overshoot() {
        let mut drive = DriveState::default();
        drive.speed = 1.0;
        drive.update(DriveInput::default(), 0.1);
        assert!((drive.speed - 0.6).abs() < 1e-5);
        drive.update(DriveInput::default(), 1.0);
        assert_eq!(drive.speed, 0.0);

        drive.speed = -1.0;
        drive.update(DriveInput::default(), 0.1);
        assert!((drive.speed + 0.6).abs() < 1e-5);
    }

    #[test]
    fn heading_zero_drives_toward_negative_x() {
        let mut drive = DriveState::default();
        drive.speed = 4.0;
        drive.params.drag = 0.0;
        drive.update(DriveInput::default(), 0.5);

        assert!((drive.position - Vector3::new(-2.0, 0.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn steering_needs_speed() {
        let mut drive = DriveState::default();
        drive.update(
            DriveInput {
                steer: 1.0,
                ..Default::default()
            },
            1.0,
        );
        assert_eq!(drive.heading, 0.0);

        drive.speed = drive.params.max_speed;
        drive.params.drag = 0.0;
        drive.update(
            DriveInput {
                steer: 1.0,
                ..Default::default()
            },
            0.5,
        );
        assert!((drive.heading - 30.0).abs() < 1e-4);
        // Turned left: forward now has a +Z component
        assert!(drive.forward().z > 0.0);
    }

    #[test]
    fn altitude_stays_in_range() {
        let mut drive = DriveState::default();
        let up = DriveInput {
            lift: 1.0,
            ..Default::default()
        };
        for _ in 0..1000 {
            drive.update(up, DT);
        }
        assert_eq!(drive.altitude, drive.params.max_altitude);

        let down = DriveInput {
            lift: -1.0,
            ..Default::default()
        };
        for _ in 0..1000 {
            drive.update(down, DT);
        }
        assert_eq!(drive.altitude, drive.params.min_altitude);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut drive = DriveState::default();
        drive.speed = 5.0;
        let before = drive.clone();
        for dt in [-1.0, f32::NAN, f32::NEG_INFINITY, f32::INFINITY] {
            drive.update(throttle(1.0), dt);
        }
        assert_eq!(drive, before);
    }

    #[test]
    fn root_transform_places_and_turns_the_vehicle() {
        let mut drive = DriveState::default();
        drive.position = Vector3::new(3.0, 0.0, -2.0);
        drive.altitude = 1.5;
        drive.heading = 90.0;

        let root = drive.root_transform();
        let origin = root.transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!((origin - Point3::new(3.0, 1.5, -2.0)).magnitude() < 1e-5);

        // The local front (-X) lines up with forward()
        let front = root.transform_vector(Vector3::new(-1.0, 0.0, 0.0));
        assert!((front - drive.forward()).magnitude() < 1e-5);
    }
}
