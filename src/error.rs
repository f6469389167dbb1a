//! Error types for window, device and surface setup.
//!
//! Geometry and scene composition never fail at runtime; only the GPU and
//! windowing layers report errors through [`HoverbusError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoverbusError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Surface texture unavailable: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("Surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("Shader '{0}' not loaded")]
    ShaderNotFound(String),
    #[error("Pipeline '{0}' not registered")]
    PipelineNotFound(String),
    #[error("UI rendering failed: {0}")]
    Ui(String),
}

pub type Result<T> = std::result::Result<T, HoverbusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_resource() {
        let err = HoverbusError::PipelineNotFound("Vehicle".to_string());
        assert_eq!(err.to_string(), "Pipeline 'Vehicle' not registered");

        let err: HoverbusError = wgpu::SurfaceError::Lost.into();
        assert!(err.to_string().starts_with("Surface texture unavailable"));
    }
}
