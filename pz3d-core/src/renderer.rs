//! Scene renderer and the drawing surface it targets
//!
//! A [`Renderer`] owns the scene objects and the camera. Every [`Renderer::render`]
//! call rebuilds three parallel vertex buffers from scratch, hands them to the
//! [`Surface`] and issues a single triangle-list draw. A renderer without a
//! surface is inert: it accepts objects and render calls but draws nothing.

use nalgebra::Matrix4;
use tracing::{debug, info, trace, warn};

use crate::config::RendererConfig;
use crate::error::Result;
use crate::projection::Camera;
use crate::scene::{RendererColor, RendererObject};
use crate::shader::ShaderProgram;
use crate::vector::Vector3D;

/// Per-vertex buffers, three `f32` components per vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Position,
    Color,
    Normal,
}

impl BufferKind {
    pub const ALL: [BufferKind; 3] = [BufferKind::Position, BufferKind::Color, BufferKind::Normal];

    pub const COMPONENTS: usize = 3;
}

/// Values that stay constant over one draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
    /// Unit vector toward the light
    pub light: Vector3D,
    /// Unit vector toward the eye
    pub eye: Vector3D,
}

impl FrameUniforms {
    pub fn clip_from_world(&self) -> Matrix4<f32> {
        self.projection * self.view
    }
}

/// Flattened scene geometry for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub normals: Vec<f32>,
}

impl FrameBuffers {
    /// Flatten objects in order; origins are added to positions and each
    /// object's color is repeated per vertex.
    pub fn from_objects(objects: &[RendererObject]) -> Self {
        let vertex_count: usize = objects.iter().map(RendererObject::vertex_count).sum();
        let capacity = vertex_count * BufferKind::COMPONENTS;
        let mut frame = Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
        };

        for object in objects {
            let origin = object.origin();
            let color = object.color().to_array();
            for (vertex, normal) in object.vertices().iter().zip(object.normals()) {
                let p = *vertex + origin;
                frame.positions.extend([p.x as f32, p.y as f32, p.z as f32]);
                frame.colors.extend(color);
                frame.normals.extend([normal.x as f32, normal.y as f32, normal.z as f32]);
            }
        }
        frame
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / BufferKind::COMPONENTS
    }

    pub fn get(&self, kind: BufferKind) -> &[f32] {
        match kind {
            BufferKind::Position => &self.positions,
            BufferKind::Color => &self.colors,
            BufferKind::Normal => &self.normals,
        }
    }
}

/// A drawing target with a GPU-like interface
pub trait Surface {
    /// Current drawable size in pixels
    fn size(&self) -> (u32, u32);

    fn compile_program(&mut self, program: &ShaderProgram) -> Result<()>;

    fn viewport(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: RendererColor);

    fn set_uniforms(&mut self, uniforms: &FrameUniforms);

    /// Replace the whole contents of one vertex buffer
    fn upload(&mut self, kind: BufferKind, data: &[f32]) -> Result<()>;

    /// Draw `vertex_count` vertices from the uploaded buffers as a triangle list
    fn draw_triangles(&mut self, vertex_count: usize) -> Result<()>;
}

/// Acquires a surface from the host, if it has one
pub trait SurfaceProvider {
    type Surface: Surface;

    fn acquire(&self) -> Option<Self::Surface>;
}

pub struct Renderer<S> {
    surface: Option<S>,
    objects: Vec<RendererObject>,
    pub camera: Camera,
    config: RendererConfig,
    frames: u64,
}

impl<S: Surface> Renderer<S> {
    /// Bind to `surface` and compile the shading program. `None` yields an
    /// inert renderer.
    pub fn new(surface: Option<S>, config: RendererConfig) -> Result<Self> {
        let surface = match surface {
            Some(mut surface) => {
                surface.compile_program(&ShaderProgram::STANDARD)?;
                let (width, height) = surface.size();
                info!(width, height, "renderer ready");
                Some(surface)
            }
            None => None,
        };

        Ok(Self {
            surface,
            objects: Vec::new(),
            camera: Camera::default(),
            config,
            frames: 0,
        })
    }

    pub fn headless(config: RendererConfig) -> Self {
        Self {
            surface: None,
            objects: Vec::new(),
            camera: Camera::default(),
            config,
            frames: 0,
        }
    }

    pub fn from_provider<P>(provider: &P, config: RendererConfig) -> Result<Self>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let surface = provider.acquire();
        if surface.is_none() {
            warn!("no drawing surface available, renderer is inert");
        }
        Self::new(surface, config)
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    pub fn add_object(&mut self, object: impl Into<RendererObject>) {
        let object = object.into();
        trace!(vertices = object.vertex_count(), "object added");
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[RendererObject] {
        &self.objects
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Number of frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw one frame of the whole scene
    pub fn render(&mut self) -> Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            trace!("render skipped, no surface");
            return Ok(());
        };

        let (width, height) = surface.size();
        surface.viewport(width, height);
        surface.clear(self.config.clear_color);

        let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
        let uniforms = FrameUniforms {
            projection: self.camera.projection_matrix(aspect, &self.config),
            view: self.camera.view_matrix(),
            light: self.camera.light_direction()?,
            eye: self.camera.view_direction()?,
        };
        surface.set_uniforms(&uniforms);

        let frame = FrameBuffers::from_objects(&self.objects);
        for kind in BufferKind::ALL {
            surface.upload(kind, frame.get(kind))?;
        }
        surface.draw_triangles(frame.vertex_count())?;

        self.frames += 1;
        debug!(
            frame = self.frames,
            objects = self.objects.len(),
            vertices = frame.vertex_count(),
            "frame rendered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scene::RendererCuboid;

    #[derive(Default)]
    struct NullSurface {
        draws: Vec<usize>,
    }

    impl Surface for NullSurface {
        fn size(&self) -> (u32, u32) {
            (64, 32)
        }

        fn compile_program(&mut self, _program: &ShaderProgram) -> Result<()> {
            Ok(())
        }

        fn viewport(&mut self, _width: u32, _height: u32) {}

        fn clear(&mut self, _color: RendererColor) {}

        fn set_uniforms(&mut self, _uniforms: &FrameUniforms) {}

        fn upload(&mut self, _kind: BufferKind, _data: &[f32]) -> Result<()> {
            Ok(())
        }

        fn draw_triangles(&mut self, vertex_count: usize) -> Result<()> {
            self.draws.push(vertex_count);
            Ok(())
        }
    }

    struct Headless;

    impl SurfaceProvider for Headless {
        type Surface = NullSurface;

        fn acquire(&self) -> Option<NullSurface> {
            None
        }
    }

    #[test]
    fn test_flatten_in_object_order() {
        let red = RendererColor::new(1.0, 0.0, 0.0);
        let blue = RendererColor::new(0.0, 0.0, 1.0);
        let objects = vec![
            RendererObject::from(RendererCuboid::new(1.0, 1.0, 1.0, red)),
            RendererObject::from(
                RendererCuboid::new(1.0, 1.0, 1.0, blue).at(Vector3D::new(10.0, 0.0, 0.0)),
            ),
        ];
        let frame = FrameBuffers::from_objects(&objects);

        assert_eq!(frame.vertex_count(), 72);
        assert_eq!(frame.colors.len(), frame.positions.len());
        assert_eq!(frame.normals.len(), frame.positions.len());
        assert_eq!(&frame.colors[..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&frame.colors[frame.colors.len() - 3..], &[0.0, 0.0, 1.0]);

        let second = &frame.positions[36 * 3..];
        assert!(second.chunks(3).all(|p| (10.0..=11.0).contains(&p[0])));
    }

    #[test]
    fn test_headless_provider_is_inert() {
        let mut renderer = Renderer::from_provider(&Headless, RendererConfig::default()).unwrap();
        assert!(renderer.is_inert());
        renderer.add_object(RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE));
        assert!(renderer.render().is_ok());
        assert_eq!(renderer.frames(), 0);
        assert_eq!(renderer.objects().len(), 1);
    }

    #[test]
    fn test_render_draws_every_vertex_once_per_frame() {
        let mut renderer =
            Renderer::new(Some(NullSurface::default()), RendererConfig::default()).unwrap();
        renderer.add_object(RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE));
        renderer.render().unwrap();
        renderer.add_object(RendererCuboid::new(2.0, 1.0, 1.0, RendererColor::WHITE));
        renderer.render().unwrap();

        assert_eq!(renderer.surface().unwrap().draws, vec![36, 72]);
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn test_degenerate_camera_fails_render() {
        let mut renderer =
            Renderer::new(Some(NullSurface::default()), RendererConfig::default()).unwrap();
        renderer.camera.target = renderer.camera.position;
        assert_eq!(renderer.render(), Err(Error::DegenerateVector));
        assert!(renderer.surface().unwrap().draws.is_empty());
    }
}
