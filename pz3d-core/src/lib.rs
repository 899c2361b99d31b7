/// pz3d Core Library - geometry primitives and the scene renderer
///
/// Vector algebra, closed integer ranges, 2D segment intersection, and a
/// small draw pipeline that flattens scene objects into vertex buffers for a
/// pluggable drawing surface.

pub mod config;
pub mod error;
pub mod projection;
pub mod range;
pub mod renderer;
pub mod scene;
pub mod segment;
pub mod shader;
pub mod stl;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::RendererConfig;
pub use error::{Error, Result};
pub use projection::Camera;
pub use range::{Discrete, Overlap, Range, Range2D};
pub use renderer::{BufferKind, FrameBuffers, FrameUniforms, Renderer, Surface, SurfaceProvider};
pub use scene::{RendererColor, RendererCuboid, RendererObject};
pub use segment::{IntersectionBound, LineSegment2D, ONE_SIDED_BOUND};
pub use shader::ShaderProgram;
pub use transform::{Rotation, Transform};
pub use vector::{Vector2D, Vector3D};
