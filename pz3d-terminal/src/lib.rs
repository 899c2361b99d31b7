/// Terminal host for the pz3d renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use pz3d_core::{Renderer, RendererConfig, RendererObject, Rotation, Vector3D};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiSurface;

/// Frame loop settings
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub fps: u32,
    pub config: RendererConfig,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            config: RendererConfig::default(),
        }
    }
}

/// Center and radius of a sphere enclosing every vertex of the scene
pub fn scene_bounds(objects: &[RendererObject]) -> (Vector3D, f64) {
    let mut points = objects
        .iter()
        .flat_map(|o| o.vertices().iter().map(move |v| *v + o.origin()));
    let Some(first) = points.next() else {
        return (Vector3D::ZERO, 1.0);
    };

    let (min, max) = points.fold((first, first), |(min, max), p| {
        (
            Vector3D::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
            Vector3D::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
        )
    });
    let center = (min + max) / 2.0;
    let radius = ((max - min).abs() / 2.0).max(1e-3);
    (center, radius)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    renderer: Renderer<AsciiSurface>,
    orbit: Rotation,
    distance: f64,
    running: bool,
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(objects: Vec<RendererObject>, options: AppOptions) -> anyhow::Result<Self> {
        let (width, height) = terminal::size()?;
        // leave the top row for the status line
        let surface = AsciiSurface::new(width as usize, height.saturating_sub(1) as usize);
        let mut renderer = Renderer::new(Some(surface), options.config)?;

        let (center, radius) = scene_bounds(&objects);
        for object in objects {
            renderer.add_object(object);
        }
        renderer.camera.target = center;

        Ok(Self {
            renderer,
            orbit: Rotation::new(-0.4, 0.6, 0.0),
            distance: radius * 3.0,
            running: true,
            target_frame_time: Duration::from_millis(1000 / options.fps.max(1) as u64),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.orbit.rotate(-0.1, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.orbit.rotate(0.1, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.orbit.rotate(0.0, -0.1, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.orbit.rotate(0.0, 0.1, 0.0),
                KeyCode::Char('+') | KeyCode::Char('=') => self.distance *= 0.9,
                KeyCode::Char('-') => self.distance /= 0.9,
                _ => {}
            },
            Event::Resize(width, height) => {
                if let Some(surface) = self.renderer.surface_mut() {
                    surface.resize(width as usize, height.saturating_sub(1) as usize);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self) {
        // Continuous slow orbit for demo effect
        self.orbit.rotate(0.0, 0.01, 0.0);
        self.orbit.x = self.orbit.x.clamp(-1.5, 1.5);
        self.renderer.camera.orbit(&self.orbit, self.distance);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        self.renderer.render()?;

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        if let Some(surface) = self.renderer.surface() {
            surface.draw(&mut stdout)?;
        }

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "pz3d | {} objects | FPS: {:.1} | WASD/Arrows=Orbit +/-=Zoom Q=Quit",
                self.renderer.objects().len(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
