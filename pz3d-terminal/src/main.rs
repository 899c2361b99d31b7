/// pz3d Terminal Demo
///
/// Renders a small block skyline, or an STL file, as shaded ASCII.
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera
///   - +/-: Zoom
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::Parser;
use pz3d_core::{
    stl, Range, RendererColor, RendererConfig, RendererCuboid, RendererObject, Rotation,
    Transform, Vector3D,
};
use pz3d_terminal::{AppOptions, TerminalApp};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pz3d-terminal")]
#[command(about = "Render pz3d scenes as shaded ASCII in the terminal")]
struct Args {
    /// STL file to display instead of the demo scene
    #[arg(long)]
    stl: Option<PathBuf>,

    /// Rotate the STL model from Z-up to Y-up
    #[arg(long)]
    z_up: bool,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Edge length of the demo blocks
    #[arg(long, default_value_t = 1.0)]
    size: f64,

    /// Far clipping plane distance
    #[arg(long, default_value_t = 50_000.0)]
    far: f32,
}

/// Blocks stacked over the columns covered by a few overlapping spans
fn demo_scene(size: f64) -> Result<Vec<RendererObject>> {
    let spans = [Range::new(0i64, 2), Range::new(1, 4), Range::new(6, 7)];
    let palette = [
        RendererColor::new(0.9, 0.3, 0.2),
        RendererColor::new(0.3, 0.8, 0.4),
        RendererColor::new(0.2, 0.5, 0.9),
    ];

    let mut objects: Vec<RendererObject> = Vec::new();
    for (row, span) in Range::combine(spans)?.iter().enumerate() {
        for column in span.from..=span.to {
            let height = 1.0 + (column % 3) as f64;
            let origin = Vector3D::new(column as f64 * size, 0.0, row as f64 * size * 2.0);
            let color = palette[column as usize % palette.len()];
            objects.push(RendererCuboid::new(size, height * size, size, color).at(origin).into());
        }
    }
    Ok(objects)
}

fn load_stl(path: &Path, z_up: bool) -> Result<Vec<RendererObject>> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut object = stl::parse_stl(&data, RendererColor::new(0.8, 0.8, 0.8))
        .with_context(|| format!("failed to parse {}", path.display()))?;
    if z_up {
        let to_y_up =
            Transform::rotation_matrix(&Rotation::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0));
        object = Transform::bake(&object, &to_y_up);
    }
    tracing::info!(path = %path.display(), triangles = object.triangle_count(), "loaded STL");
    Ok(vec![object])
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let args = Args::parse();

    let objects = match &args.stl {
        Some(path) => load_stl(path, args.z_up)?,
        None => demo_scene(args.size)?,
    };

    let options = AppOptions {
        fps: args.fps,
        config: RendererConfig {
            far: args.far,
            ..RendererConfig::default()
        },
    };

    let mut app = TerminalApp::new(objects, options)?;
    app.run()?;

    println!("Thank you for using pz3d!");
    Ok(())
}
