/// Renderer configuration
use crate::scene::RendererColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: RendererColor,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.1,
            far: 50_000.0,
            clear_color: RendererColor::BLACK,
        }
    }
}
