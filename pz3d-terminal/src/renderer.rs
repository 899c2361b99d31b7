/// ASCII rasterizer surface for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use pz3d_core::{
    shader::{self, clip_to_screen},
    BufferKind, Error, FrameUniforms, RendererColor, Result, ShaderProgram, Surface, Vector3D,
};
use std::io::Write;
use tracing::debug;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Software surface that draws the pipeline's triangles into a character grid
pub struct AsciiSurface {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
    uniforms: Option<FrameUniforms>,
    /// Size reported to the renderer; the buffers follow on the next viewport call
    requested: (usize, usize),
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
            positions: Vec::new(),
            colors: Vec::new(),
            normals: Vec::new(),
            uniforms: None,
            requested: (width, height),
        }
    }

    /// Track the terminal size; takes effect on the next frame
    pub fn resize(&mut self, width: usize, height: usize) {
        self.requested = (width, height);
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn covered_cells(&self) -> usize {
        self.depth_buffer.iter().filter(|d| d.is_finite()).count()
    }

    fn vertex(buffer: &[f32], index: usize) -> Vector3D {
        let i = index * BufferKind::COMPONENTS;
        Vector3D::new(buffer[i] as f64, buffer[i + 1] as f64, buffer[i + 2] as f64)
    }

    fn render_triangle(&mut self, first: usize, uniforms: &FrameUniforms) {
        let clip_from_world = uniforms.clip_from_world();
        let (width, height) = (self.width as u32, self.height as u32);

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (corner, coords) in screen_coords.iter_mut().enumerate() {
            let position = Self::vertex(&self.positions, first + corner).to_point();
            match clip_to_screen(&clip_from_world, &position, width, height) {
                Some(projected) => *coords = projected,
                None => return, // Triangle is clipped
            }
        }

        // Flat shading from the averaged vertex normals
        let normal = (0..3)
            .map(|corner| Self::vertex(&self.normals, first + corner))
            .fold(Vector3D::ZERO, |sum, n| sum + n);
        let base = Self::vertex(&self.colors, first);
        let rgb = shader::shade(
            &normal,
            [base.x as f32, base.y as f32, base.z as f32],
            &uniforms.light,
            &uniforms.eye,
        );

        // Map brightness to character
        let brightness = shader::luminance(rgb).clamp(0.0, 1.0);
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];
        let color = Color::Rgb {
            r: (rgb[0] * 255.0) as u8,
            g: (rgb[1] * 255.0) as u8,
            b: (rgb[2] * 255.0) as u8,
        };

        self.rasterize_triangle(&screen_coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn size(&self) -> (u32, u32) {
        (self.requested.0 as u32, self.requested.1 as u32)
    }

    fn compile_program(&mut self, program: &ShaderProgram) -> Result<()> {
        // shading runs on the CPU; the sources only have to be present
        if program.vertex.is_empty() || program.fragment.is_empty() {
            return Err(Error::Shader("empty shader source".to_string()));
        }
        debug!("using software shading");
        Ok(())
    }

    fn viewport(&mut self, width: u32, height: u32) {
        let (width, height) = (width as usize, height as usize);
        if (width, height) != (self.width, self.height) {
            *self = Self {
                positions: std::mem::take(&mut self.positions),
                colors: std::mem::take(&mut self.colors),
                normals: std::mem::take(&mut self.normals),
                uniforms: self.uniforms,
                ..Self::new(width, height)
            };
        }
    }

    fn clear(&mut self, color: RendererColor) {
        let background = if color == RendererColor::BLACK {
            Color::Reset
        } else {
            let [r, g, b] = color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
            Color::Rgb { r, g, b }
        };
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(background);
    }

    fn set_uniforms(&mut self, uniforms: &FrameUniforms) {
        self.uniforms = Some(*uniforms);
    }

    fn upload(&mut self, kind: BufferKind, data: &[f32]) -> Result<()> {
        if data.len() % BufferKind::COMPONENTS != 0 {
            return Err(Error::Surface(format!(
                "{kind:?} buffer length {} is not a multiple of {}",
                data.len(),
                BufferKind::COMPONENTS
            )));
        }
        let target = match kind {
            BufferKind::Position => &mut self.positions,
            BufferKind::Color => &mut self.colors,
            BufferKind::Normal => &mut self.normals,
        };
        target.clear();
        target.extend_from_slice(data);
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_count: usize) -> Result<()> {
        let uniforms = self
            .uniforms
            .ok_or_else(|| Error::Surface("draw issued before uniforms were set".to_string()))?;
        let needed = vertex_count * BufferKind::COMPONENTS;
        for kind in BufferKind::ALL {
            let len = match kind {
                BufferKind::Position => self.positions.len(),
                BufferKind::Color => self.colors.len(),
                BufferKind::Normal => self.normals.len(),
            };
            if len < needed {
                return Err(Error::Surface(format!(
                    "{kind:?} buffer holds {len} floats, draw needs {needed}"
                )));
            }
        }

        for first in (0..vertex_count - vertex_count % 3).step_by(3) {
            self.render_triangle(first, &uniforms);
        }
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pz3d_core::{Renderer, RendererConfig, RendererCuboid, Vector3D};

    fn cube_renderer() -> Renderer<AsciiSurface> {
        let mut renderer =
            Renderer::new(Some(AsciiSurface::new(40, 20)), RendererConfig::default()).unwrap();
        renderer.add_object(
            RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE)
                .at(Vector3D::new(-0.5, -0.5, -0.5)),
        );
        renderer.camera.position = Vector3D::new(2.0, 2.0, 3.0);
        renderer
    }

    #[test]
    fn test_cube_covers_the_center() {
        let mut renderer = cube_renderer();
        renderer.render().unwrap();

        let surface = renderer.surface().unwrap();
        assert!(surface.covered_cells() > 0);
        assert_ne!(surface.char_at(20, 10), Some(' '));
        assert_eq!(surface.char_at(0, 0), Some(' '));
        assert_eq!(surface.char_at(40, 0), None);
    }

    #[test]
    fn test_resize_applies_on_next_frame() {
        let mut renderer = cube_renderer();
        renderer.render().unwrap();
        renderer.surface_mut().unwrap().resize(10, 6);
        renderer.render().unwrap();

        let surface = renderer.surface().unwrap();
        assert!(surface.char_at(9, 5).is_some());
        assert!(surface.char_at(10, 0).is_none());
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut renderer = cube_renderer();
        renderer.render().unwrap();
        let mut out = Vec::new();
        renderer.surface().unwrap().draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 19);
    }

    #[test]
    fn test_malformed_upload_and_early_draw() {
        let mut surface = AsciiSurface::new(4, 4);
        assert!(matches!(
            surface.upload(BufferKind::Position, &[0.0; 4]),
            Err(Error::Surface(_))
        ));
        assert!(matches!(surface.draw_triangles(3), Err(Error::Surface(_))));
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
    }
}
