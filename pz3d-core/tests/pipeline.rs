use approx::assert_relative_eq;
use pz3d_core::{
    BufferKind, FrameUniforms, Range, Renderer, RendererColor, RendererConfig, RendererCuboid,
    RendererObject, Result, ShaderProgram, Surface, Vector3D,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Compile,
    Viewport(u32, u32),
    Clear(RendererColor),
    Uniforms,
    Upload(BufferKind, usize),
    Draw(usize),
}

/// Surface that records every call and keeps the last uploaded buffers
#[derive(Default)]
struct RecordingSurface {
    size: (u32, u32),
    calls: Vec<Call>,
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
    uniforms: Option<FrameUniforms>,
}

impl RecordingSurface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn compile_program(&mut self, program: &ShaderProgram) -> Result<()> {
        assert!(!program.vertex.is_empty() && !program.fragment.is_empty());
        self.calls.push(Call::Compile);
        Ok(())
    }

    fn viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn clear(&mut self, color: RendererColor) {
        self.calls.push(Call::Clear(color));
    }

    fn set_uniforms(&mut self, uniforms: &FrameUniforms) {
        self.uniforms = Some(*uniforms);
        self.calls.push(Call::Uniforms);
    }

    fn upload(&mut self, kind: BufferKind, data: &[f32]) -> Result<()> {
        let target = match kind {
            BufferKind::Position => &mut self.positions,
            BufferKind::Color => &mut self.colors,
            BufferKind::Normal => &mut self.normals,
        };
        *target = data.to_vec();
        self.calls.push(Call::Upload(kind, data.len()));
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_count: usize) -> Result<()> {
        self.calls.push(Call::Draw(vertex_count));
        Ok(())
    }
}

fn renderer(width: u32, height: u32) -> Renderer<RecordingSurface> {
    Renderer::new(Some(RecordingSurface::new(width, height)), RendererConfig::default()).unwrap()
}

#[test]
fn unit_cuboid_uploads_36_vertices() {
    let color = RendererColor::new(0.1, 0.5, 0.9);
    let mut renderer = renderer(800, 600);
    renderer.add_object(RendererCuboid::new(1.0, 1.0, 1.0, color).at(Vector3D::ZERO));
    renderer.render().unwrap();

    let surface = renderer.surface().unwrap();
    assert_eq!(surface.positions.len(), 36 * 3);
    assert_eq!(surface.colors.len(), 36 * 3);
    assert_eq!(surface.normals.len(), 36 * 3);
    for rgb in surface.colors.chunks(3) {
        assert_eq!(rgb, color.to_array());
    }
    assert_eq!(surface.calls.last(), Some(&Call::Draw(36)));
}

#[test]
fn render_pass_order() {
    let mut renderer = renderer(320, 200);
    renderer.add_object(RendererCuboid::new(1.0, 2.0, 3.0, RendererColor::WHITE));
    renderer.render().unwrap();

    let calls = &renderer.surface().unwrap().calls;
    assert_eq!(
        calls,
        &vec![
            Call::Compile,
            Call::Viewport(320, 200),
            Call::Clear(RendererColor::BLACK),
            Call::Uniforms,
            Call::Upload(BufferKind::Position, 108),
            Call::Upload(BufferKind::Color, 108),
            Call::Upload(BufferKind::Normal, 108),
            Call::Draw(36),
        ]
    );
}

#[test]
fn origin_is_added_to_positions() {
    let mut renderer = renderer(100, 100);
    let origin = Vector3D::new(5.0, -2.0, 7.0);
    renderer.add_object(RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE).at(origin));
    renderer.render().unwrap();

    let positions = &renderer.surface().unwrap().positions;
    for p in positions.chunks(3) {
        assert!((5.0..=6.0).contains(&p[0]));
        assert!((-2.0..=-1.0).contains(&p[1]));
        assert!((7.0..=8.0).contains(&p[2]));
    }
}

#[test]
fn buffers_are_rewritten_each_frame() {
    let mut renderer = renderer(100, 100);
    renderer.add_object(RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE));
    renderer.render().unwrap();
    renderer.render().unwrap();

    let surface = renderer.surface().unwrap();
    assert_eq!(surface.positions.len(), 108);
    let draws: Vec<_> = surface
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Draw(_)))
        .collect();
    assert_eq!(draws, vec![&Call::Draw(36), &Call::Draw(36)]);
}

#[test]
fn uniforms_follow_the_camera() {
    let mut renderer = renderer(400, 200);
    renderer.camera.position = Vector3D::new(0.0, 0.0, 10.0);
    renderer.render().unwrap();

    let uniforms = renderer.surface().unwrap().uniforms.unwrap();
    assert_eq!(uniforms.eye, Vector3D::new(0.0, 0.0, 1.0));
    assert_relative_eq!(uniforms.light.abs(), 1.0, epsilon = 1e-12);
    // 45 degree vertical field of view at aspect 2
    let f = 1.0 / (std::f32::consts::FRAC_PI_8).tan();
    assert_relative_eq!(uniforms.projection[(1, 1)], f, epsilon = 1e-5);
    assert_relative_eq!(uniforms.projection[(0, 0)], f / 2.0, epsilon = 1e-5);
}

#[test]
fn inert_renderer_accepts_everything() {
    let mut renderer: Renderer<RecordingSurface> = Renderer::headless(RendererConfig::default());
    renderer.add_object(RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE));
    renderer.render().unwrap();
    assert!(renderer.is_inert());
    assert!(renderer.surface().is_none());
}

#[test]
fn voxel_scene_from_combined_ranges() {
    // columns covered by a merged set of ranges, one cube per cell
    let ranges = Range::combine([Range::new(0i64, 2), Range::new(1, 3), Range::new(6, 6)]).unwrap();
    let mut renderer = renderer(100, 100);
    for range in &ranges {
        for x in range.from..=range.to {
            let cell = RendererCuboid::new(1.0, 1.0, 1.0, RendererColor::WHITE)
                .at(Vector3D::new(x as f64, 0.0, 0.0));
            renderer.add_object(RendererObject::from(cell));
        }
    }
    renderer.render().unwrap();
    assert_eq!(renderer.objects().len(), 5);
    assert_eq!(renderer.surface().unwrap().calls.last(), Some(&Call::Draw(5 * 36)));
}
