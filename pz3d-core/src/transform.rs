/// Rotation state and matrices for baking transforms into scene objects
use nalgebra::{Matrix4, Vector3};

use crate::scene::RendererObject;
use crate::vector::Vector3D;

/// Rotation around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::zero()
    }
}

pub struct Transform;

impl Transform {
    /// Z * Y * X, so X is applied first
    pub fn rotation_matrix(rotation: &Rotation) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));
        rz * ry * rx
    }

    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Apply `matrix` to the object's vertices and normals.
    ///
    /// Normals go through the inverse transpose of the linear part and are
    /// renormalized; a singular matrix leaves them as they were. The origin is
    /// kept.
    pub fn bake(object: &RendererObject, matrix: &Matrix4<f32>) -> RendererObject {
        let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear.try_inverse().map(|m| m.transpose());

        let vertices = object
            .vertices()
            .iter()
            .map(|v| Vector3D::from_nalgebra(&matrix.transform_point(&v.to_point()).coords))
            .collect();
        let normals = object
            .normals()
            .iter()
            .map(|n| match &normal_matrix {
                Some(m) => {
                    let baked = Vector3D::from_nalgebra(&(m * n.to_nalgebra()));
                    baked.normalize().unwrap_or(*n)
                }
                None => *n,
            })
            .collect();

        object.rebuilt(vertices, normals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{RendererColor, RendererCuboid};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotation_state() {
        let mut state = Rotation::zero();
        assert_eq!(state, Rotation::default());

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&Rotation::zero());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_bake_rotates_vertices_and_normals() {
        let cube: RendererObject = RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE).into();
        let quarter = Transform::rotation_matrix(&Rotation::new(0.0, 0.0, FRAC_PI_2));
        let baked = Transform::bake(&cube, &quarter);

        assert_eq!(baked.vertex_count(), cube.vertex_count());
        // +x face normal turns into +y
        let right = cube
            .normals()
            .iter()
            .position(|n| *n == Vector3D::new(1.0, 0.0, 0.0))
            .unwrap();
        let turned = baked.normals()[right];
        assert!((turned - Vector3D::new(0.0, 1.0, 0.0)).abs() < 1e-6);

        for (before, after) in cube.vertices().iter().zip(baked.vertices()) {
            assert!((after.x + before.y).abs() < 1e-6);
            assert!((after.y - before.x).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bake_scale_keeps_unit_normals() {
        let cube: RendererObject = RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE).into();
        let baked = Transform::bake(&cube, &Transform::scale_matrix(2.0, 3.0, 4.0));
        assert!(baked.vertices().iter().any(|v| *v == Vector3D::new(2.0, 3.0, 4.0)));
        for n in baked.normals() {
            assert!((n.abs() - 1.0).abs() < 1e-6);
        }
    }
}
