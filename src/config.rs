//! Startup configuration for the two binaries.
//!
//! Defaults give a 1200x800 sky-blue viewer and an 800x600 near-white
//! aeroplane canvas.

use crate::gfx::geometry::Tessellation;
use crate::gfx::scene::VehicleKind;
use crate::gfx::viewport::ViewportLayout;
use crate::simulation::drive::DriveParams;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 3],
    pub vehicle: VehicleKind,
    pub layout: ViewportLayout,
    pub tessellation: Tessellation,
    pub drive: DriveParams,
    pub vsync: bool,
    pub show_ui: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Bus Simulation - Flying Simulator".to_string(),
            width: 1200,
            height: 800,
            clear_color: [0.53, 0.81, 0.92],
            vehicle: VehicleKind::Bus,
            layout: ViewportLayout::Single,
            tessellation: Tessellation::default(),
            drive: DriveParams::default(),
            vsync: true,
            show_ui: true,
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 3]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleKind) -> Self {
        self.vehicle = vehicle;
        self
    }

    pub fn with_layout(mut self, layout: ViewportLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_tessellation(mut self, tessellation: Tessellation) -> Self {
        self.tessellation = tessellation;
        self
    }

    pub fn with_drive(mut self, drive: DriveParams) -> Self {
        self.drive = drive;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_ui(mut self, show_ui: bool) -> Self {
        self.show_ui = show_ui;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AeroplaneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 3],
    pub vsync: bool,
}

impl Default for AeroplaneConfig {
    fn default() -> Self {
        Self {
            title: "2D Aeroplane".to_string(),
            width: 800,
            height: 600,
            clear_color: [0.98, 0.98, 0.99],
            vsync: true,
        }
    }
}

impl AeroplaneConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, color: [f32; 3]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_defaults() {
        let config = ViewerConfig::default();
        assert_eq!((config.width, config.height), (1200, 800));
        assert_eq!(config.clear_color, [0.53, 0.81, 0.92]);
        assert_eq!(config.vehicle, VehicleKind::Bus);
        assert_eq!(config.layout, ViewportLayout::Single);
    }

    #[test]
    fn viewer_builder_overrides() {
        let config = ViewerConfig::default()
            .with_vehicle(VehicleKind::HoverBus)
            .with_layout(ViewportLayout::Quad)
            .with_tessellation(Tessellation::coarse())
            .with_size(640, 480)
            .with_vsync(false)
            .with_ui(false);

        assert_eq!(config.vehicle, VehicleKind::HoverBus);
        assert_eq!(config.layout, ViewportLayout::Quad);
        assert_eq!(config.tessellation, Tessellation::coarse());
        assert_eq!((config.width, config.height), (640, 480));
        assert!(!config.vsync);
        assert!(!config.show_ui);
    }

    #[test]
    fn aeroplane_defaults() {
        let config = AeroplaneConfig::default().with_title("Plane");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.clear_color, [0.98, 0.98, 0.99]);
        assert_eq!(config.title, "Plane");
    }
}
