/// Scene objects consumed by the renderer
use crate::error::{Error, Result};
use crate::vector::Vector3D;

/// Flat RGB color, components nominally in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RendererColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl RendererColor {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

/// A renderable triangle list with one normal per vertex, a flat color and a
/// translation.
///
/// Vertices come in groups of three, one group per triangle. Rotation and
/// scale have to be baked into the vertices (see [`crate::Transform::bake`]);
/// the renderer only adds `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererObject {
    vertices: Vec<Vector3D>,
    normals: Vec<Vector3D>,
    color: RendererColor,
    origin: Vector3D,
}

impl RendererObject {
    pub fn new(
        vertices: Vec<Vector3D>,
        normals: Vec<Vector3D>,
        color: RendererColor,
        origin: Vector3D,
    ) -> Result<Self> {
        if normals.len() != vertices.len() {
            return Err(Error::NormalCountMismatch {
                vertices: vertices.len(),
                normals: normals.len(),
            });
        }
        if vertices.len() % 3 != 0 {
            return Err(Error::IncompleteTriangle {
                vertices: vertices.len(),
            });
        }

        Ok(Self {
            vertices,
            normals,
            color,
            origin,
        })
    }

    /// Same color and origin, new geometry of the same length
    pub(crate) fn rebuilt(&self, vertices: Vec<Vector3D>, normals: Vec<Vector3D>) -> Self {
        debug_assert_eq!(vertices.len(), self.vertices.len());
        debug_assert_eq!(normals.len(), self.normals.len());
        Self {
            vertices,
            normals,
            color: self.color,
            origin: self.origin,
        }
    }

    pub fn with_origin(mut self, origin: Vector3D) -> Self {
        self.origin = origin;
        self
    }

    pub fn vertices(&self) -> &[Vector3D] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector3D] {
        &self.normals
    }

    pub fn color(&self) -> RendererColor {
        self.color
    }

    pub fn origin(&self) -> Vector3D {
        self.origin
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Axis-aligned box spanning `[0, width] x [0, height] x [0, depth]` before
/// translation by `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererCuboid {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub color: RendererColor,
    pub origin: Vector3D,
}

impl RendererCuboid {
    pub fn new(width: f64, height: f64, depth: f64, color: RendererColor) -> Self {
        Self {
            width,
            height,
            depth,
            color,
            origin: Vector3D::ZERO,
        }
    }

    pub fn at(mut self, origin: Vector3D) -> Self {
        self.origin = origin;
        self
    }

    /// 12 triangles with flat per-face normals
    pub fn triangles(&self) -> (Vec<Vector3D>, Vec<Vector3D>) {
        let (w, h, d) = (self.width, self.height, self.depth);
        let p = Vector3D::new;

        let mut vertices = Vec::with_capacity(36);
        let mut normals = Vec::with_capacity(36);
        let mut quad = |corners: [Vector3D; 4], normal: Vector3D| {
            // two counter-clockwise triangles seen from outside
            for i in [0, 1, 2, 0, 2, 3] {
                vertices.push(corners[i]);
                normals.push(normal);
            }
        };

        // Front face
        quad(
            [p(0.0, 0.0, d), p(w, 0.0, d), p(w, h, d), p(0.0, h, d)],
            p(0.0, 0.0, 1.0),
        );
        // Back face
        quad(
            [p(0.0, 0.0, 0.0), p(0.0, h, 0.0), p(w, h, 0.0), p(w, 0.0, 0.0)],
            p(0.0, 0.0, -1.0),
        );
        // Top face
        quad(
            [p(0.0, h, 0.0), p(0.0, h, d), p(w, h, d), p(w, h, 0.0)],
            p(0.0, 1.0, 0.0),
        );
        // Bottom face
        quad(
            [p(0.0, 0.0, 0.0), p(w, 0.0, 0.0), p(w, 0.0, d), p(0.0, 0.0, d)],
            p(0.0, -1.0, 0.0),
        );
        // Right face
        quad(
            [p(w, 0.0, 0.0), p(w, h, 0.0), p(w, h, d), p(w, 0.0, d)],
            p(1.0, 0.0, 0.0),
        );
        // Left face
        quad(
            [p(0.0, 0.0, 0.0), p(0.0, 0.0, d), p(0.0, h, d), p(0.0, h, 0.0)],
            p(-1.0, 0.0, 0.0),
        );

        (vertices, normals)
    }
}

impl From<RendererCuboid> for RendererObject {
    fn from(cuboid: RendererCuboid) -> Self {
        let (vertices, normals) = cuboid.triangles();
        Self {
            vertices,
            normals,
            color: cuboid.color,
            origin: cuboid.origin,
        }
    }
}
