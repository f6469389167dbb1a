//! Vehicle motion
//!
//! The driving model is pure state: it reads a [`drive::DriveInput`] per
//! frame and produces the root transform the scene composes under.

pub mod drive;

pub use drive::{DriveInput, DriveParams, DriveState};
