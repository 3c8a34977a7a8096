use std::sync::Arc;
use std::time::{Duration, Instant};

use life::{LifeConfig, Simulation, TickClock};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::camera::OrbitCamera;
use crate::render::{State, Uniforms};

mod camera;
mod hud;
mod mesh;
mod render;

const GRID_WIDTH: usize = 100;
const GRID_HEIGHT: usize = 100;
const ALIVE_THRESHOLD: u8 = 85;
const ALIVE_COLOR: life::Rgba = [0, 255, 200, 255];
const DEAD_COLOR: life::Rgba = [0, 0, 0, 255];
const STEP_INTERVAL: Duration = Duration::from_millis(40);
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const BACKGROUND: life::Rgba = [10, 10, 15, 255];
const TORUS_MAJOR_RADIUS: f32 = 6.0;
const TORUS_MINOR_RADIUS: f32 = 2.4;
const TORUS_SEGMENTS: u32 = 72;
/// Wheel pixels treated as one notch on touchpads.
const PIXELS_PER_NOTCH: f32 = 50.0;

fn life_config() -> LifeConfig {
    LifeConfig::new(GRID_WIDTH, GRID_HEIGHT)
        .with_alive_threshold(ALIVE_THRESHOLD)
        .with_colors(ALIVE_COLOR, DEAD_COLOR)
}

/// Simulation and view state owned by the event loop.
struct TorusLifeApp {
    simulation: Simulation,
    clock: TickClock,
    camera: OrbitCamera,
    last_frame: Instant,
    /// Set when the display buffer changed since the last texture upload.
    dirty: bool,
    ui_vertices: Vec<hud::Vertex>,
}

impl TorusLifeApp {
    fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            clock: TickClock::new(STEP_INTERVAL),
            camera: OrbitCamera::default(),
            last_frame: Instant::now(),
            dirty: true,
            ui_vertices: Vec::with_capacity(4096),
        }
    }

    /// Run every simulation tick that came due since the previous frame.
    fn update(&mut self) {
        let now = Instant::now();
        let ticks = self.clock.advance(now - self.last_frame);
        self.last_frame = now;

        for _ in 0..ticks {
            self.simulation.step();
        }
        if ticks > 0 {
            self.dirty = true;
        }
    }

    fn randomize(&mut self) {
        self.simulation.randomize();
        self.clock.reset();
        self.dirty = true;
        log::info!("reseeded, population {}", self.simulation.population());
    }

    fn zoom(&mut self, delta: MouseScrollDelta) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
        };
        self.camera.zoom(notches);
    }

    fn uniforms(&self, aspect: f32) -> Uniforms {
        let eye = self.camera.eye();
        Uniforms {
            view_proj: self.camera.view_proj(aspect).to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }

    fn build_hud(&mut self, size: PhysicalSize<u32>, fps: Option<u32>) -> &[hud::Vertex] {
        let window_size = [size.width.max(1) as f32, size.height.max(1) as f32];
        hud::build(&mut self.ui_vertices, window_size, self.simulation.config().alive_color, fps);
        &self.ui_vertices
    }
}

fn key_matches(event: &KeyEvent, target: &str) -> bool {
    match &event.logical_key {
        Key::Named(NamedKey::Space) => target.eq_ignore_ascii_case("SPACE"),
        Key::Character(text) => text.eq_ignore_ascii_case(target),
        _ => false,
    }
}

fn clear_color() -> wgpu::Color {
    let [r, g, b] = hud::srgb_to_linear(BACKGROUND);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

struct ViewerApp {
    window_attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    window_id: Option<WindowId>,
    state: Option<State>,
    app: Option<TorusLifeApp>,
    pending: Option<Simulation>,
    error: Option<anyhow::Error>,
    frame_count: u32,
    fps: Option<u32>,
    last_fps_log: Instant,
}

impl ViewerApp {
    fn new(simulation: Simulation) -> Self {
        let attrs = Window::default_attributes()
            .with_title("Torus Game of Life")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        Self {
            window_attrs: attrs,
            window: None,
            window_id: None,
            state: None,
            app: None,
            pending: Some(simulation),
            error: None,
            frame_count: 0,
            fps: None,
            last_fps_log: Instant::now(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some(simulation) = self.pending.take() else {
            return Ok(());
        };

        let window = Arc::new(event_loop.create_window(self.window_attrs.clone())?);
        let mesh = mesh::torus(TORUS_MAJOR_RADIUS, TORUS_MINOR_RADIUS, TORUS_SEGMENTS, TORUS_SEGMENTS);
        let grid_size = (simulation.width() as u32, simulation.height() as u32);
        let state = pollster::block_on(State::new(window.clone(), grid_size, &mesh, clear_color()))?;
        window.request_redraw();

        self.window_id = Some(window.id());
        self.window = Some(window);
        self.state = Some(state);
        self.app = Some(TorusLifeApp::new(simulation));
        Ok(())
    }

    fn count_frame(&mut self, generation: u64, population: usize) {
        self.frame_count += 1;
        let elapsed = self.last_fps_log.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            log::info!("fps: {:.1} generation: {} population: {}", fps, generation, population);
            self.fps = Some(fps.round() as u32);
            self.frame_count = 0;
            self.last_fps_log = Instant::now();
        }
    }
}

impl ApplicationHandler<()> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.error = Some(err.context("failed to start viewer"));
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if Some(window_id) != self.window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(state) = self.state.as_mut() {
                    state.resize(size);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(app) = self.app.as_mut() {
                    app.camera.cursor_moved([position.x as f32, position.y as f32]);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    if let Some(app) = self.app.as_mut() {
                        app.camera.set_dragging(state == ElementState::Pressed);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(app) = self.app.as_mut() {
                    app.zoom(delta);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if event.logical_key == Key::Named(NamedKey::Escape) {
                        event_loop.exit();
                    } else if let Some(app) = self.app.as_mut() {
                        if key_matches(&event, "R") || key_matches(&event, "SPACE") {
                            app.randomize();
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let fps = self.fps;
                let mut presented = None;
                if let (Some(state), Some(app)) = (self.state.as_mut(), self.app.as_mut()) {
                    app.update();
                    if app.dirty {
                        state.upload_cells(app.simulation.pixel_bytes());
                        app.dirty = false;
                    }

                    let uniforms = app.uniforms(state.aspect());
                    let size = state.size;
                    let ui_vertices = app.build_hud(size, fps);
                    match state.render(&uniforms, ui_vertices) {
                        Ok(()) => presented = Some((app.simulation.generation(), app.simulation.population())),
                        Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("out of GPU memory");
                            event_loop.exit();
                        }
                        Err(err) => log::warn!("dropped frame: {err}"),
                    }
                }
                if let Some((generation, population)) = presented {
                    self.count_frame(generation, population);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let simulation = Simulation::new(life_config()).inspect_err(|err| log::error!("invalid configuration: {err}"))?;
    log::info!(
        "{}x{} torus, {} live cells, one step every {:?}",
        simulation.width(),
        simulation.height(),
        simulation.population(),
        STEP_INTERVAL
    );

    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(simulation);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_configuration_is_valid() {
        let config = life_config();
        assert!(config.validate().is_ok());
        assert_eq!(config, LifeConfig::default());
    }

    #[test]
    fn first_frame_uploads_the_seed() {
        let app = TorusLifeApp::new(Simulation::new(life_config()).unwrap());
        assert!(app.dirty);
    }

    #[test]
    fn wheel_deltas_zoom_the_camera() {
        let mut app = TorusLifeApp::new(Simulation::new(life_config()).unwrap());
        app.zoom(MouseScrollDelta::LineDelta(0.0, 2.0));
        assert!((app.camera.eye().length() - (camera::START_RADIUS - 2.0)).abs() < 1e-4);
        app.zoom(MouseScrollDelta::PixelDelta(winit::dpi::PhysicalPosition::new(0.0, -100.0)));
        assert!((app.camera.eye().length() - camera::START_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn randomize_marks_texture_dirty() {
        let mut app = TorusLifeApp::new(Simulation::new(life_config()).unwrap());
        app.dirty = false;
        app.randomize();
        assert!(app.dirty);
        assert_eq!(app.simulation.generation(), 0);
    }
}
