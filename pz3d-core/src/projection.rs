/// Camera placement, view/projection matrices and the frame light
use nalgebra::Matrix4;

use crate::config::RendererConfig;
use crate::error::Result;
use crate::transform::{Rotation, Transform};
use crate::vector::Vector3D;

/// Camera looking from `position` at `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3D,
    pub target: Vector3D,
    pub up: Vector3D,
}

impl Camera {
    pub fn new(position: Vector3D, target: Vector3D, up: Vector3D) -> Self {
        Self {
            position,
            target,
            up,
        }
    }

    /// Unit vector from the target toward the eye
    pub fn view_direction(&self) -> Result<Vector3D> {
        (self.position - self.target).normalize()
    }

    /// Directional light derived from the view: `normalize(view + up - view x up)`
    pub fn light_direction(&self) -> Result<Vector3D> {
        let view = self.view_direction()?;
        (view + self.up - view.cross(&self.up)).normalize()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            &self.position.to_point(),
            &self.target.to_point(),
            &self.up.to_nalgebra(),
        )
    }

    /// Perspective projection for a surface with the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32, config: &RendererConfig) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect, config.fov_y, config.near, config.far)
    }

    /// Put the camera `distance` away from its target, rotating the +z
    /// offset by `rotation`.
    pub fn orbit(&mut self, rotation: &Rotation, distance: f64) {
        let offset = Transform::rotation_matrix(rotation)
            .transform_vector(&nalgebra::Vector3::new(0.0, 0.0, distance as f32));
        self.position = self.target + Vector3D::from_nalgebra(&offset);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vector3D::new(0.0, 0.0, 5.0),
            Vector3D::ZERO,
            Vector3D::UNIT_Y,
        )
    }
}
