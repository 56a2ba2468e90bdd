use foundation::math::Vec3;

use crate::camera::PerspectiveCamera;
use crate::markers::MarkerId;
use crate::rotation::Orientation;

pub const OCEAN_COLOR: u32 = 0x4a90e2;
pub const LAND_COLOR: u32 = 0x27ae60;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Globe {
        radius: f64,
        orientation: Orientation,
        color: u32,
    },
    Marker {
        id: MarkerId,
        /// View-space center (orientation already applied).
        center: Vec3,
        radius: f64,
        color: u32,
    },
}

/// Everything needed to draw one frame, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
}

/// The 3D scene boundary: whatever actually puts pixels on screen.
pub trait SceneRenderer {
    fn render(&mut self, camera: &PerspectiveCamera, frame: &RenderFrame);
}

/// Records frames instead of drawing them. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderFrame>,
}

impl SceneRenderer for RecordingRenderer {
    fn render(&mut self, _camera: &PerspectiveCamera, frame: &RenderFrame) {
        self.frames.push(frame.clone());
    }
}
