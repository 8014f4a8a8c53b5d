//! gl-demos entry point
//!
//! Parses the demo name, opens a window and runs the fixed-step frame loop.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use gl_demos::renderer::{GpuContext, SceneRenderer};
use gl_demos::sim::{FixedStep, Scene, TickInput, tick};
use gl_demos::{Demo, DemoError, Settings, screen_to_world};

/// Window and GPU state, created once the event loop is running
struct Running {
    window: Arc<Window>,
    ctx: GpuContext,
    renderer: SceneRenderer,
}

struct App {
    demo: Demo,
    settings: Settings,
    scene: Scene,
    running: Option<Running>,
    input: TickInput,
    step: FixedStep,
    last_frame: Option<Instant>,
    /// First fatal error, reported after the loop exits
    error: Option<DemoError>,
}

impl App {
    fn new(demo: Demo, settings: Settings, scene: Scene) -> Self {
        Self {
            demo,
            settings,
            scene,
            running: None,
            input: TickInput::default(),
            step: FixedStep::default(),
            last_frame: None,
            error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, DemoError> {
        let attributes = Window::default_attributes()
            .with_title(self.demo.title())
            .with_inner_size(PhysicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| DemoError::Window(e.to_string()))?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| DemoError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| DemoError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let ctx = pollster::block_on(GpuContext::new(surface, &adapter, size.width, size.height))?;
        let renderer = SceneRenderer::new(&ctx, &self.scene, &self.settings)?;

        Ok(Running {
            window,
            ctx,
            renderer,
        })
    }

    /// Run as many fixed ticks as the wall clock owes
    fn update(&mut self, frame_secs: f32) {
        for _ in 0..self.step.advance(frame_secs, self.settings.tick_hz) {
            tick(&mut self.scene, &self.input, 1.0);

            // Clear one-shot inputs after processing
            self.input.cursor = None;
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: DemoError) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                running.ctx.resize(new_size.width, new_size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let projection = self.scene.projection(running.ctx.aspect());
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                self.input.cursor = Some(screen_to_world(cursor, running.ctx.size, &projection));
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let frame_secs = self
                    .last_frame
                    .map(|last| now.duration_since(last).as_secs_f32())
                    .unwrap_or(0.0);
                self.last_frame = Some(now);
                self.update(frame_secs);

                let Some(running) = self.running.as_mut() else {
                    return;
                };
                match running.renderer.render(&running.ctx, &self.scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        running.ctx.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}

/// `gl-demos [demo] [settings.json]`
fn parse_args() -> Result<(Demo, Option<PathBuf>), DemoError> {
    let mut args = std::env::args().skip(1);
    let demo = match args.next() {
        Some(name) => name.parse()?,
        None => Demo::default(),
    };
    let settings_path = args.next().map(PathBuf::from);
    Ok((demo, settings_path))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run() -> Result<(), DemoError> {
    let (demo, settings_path) = parse_args()?;
    let settings = Settings::load_or_default(settings_path.as_deref())?;
    let seed = settings.seed.unwrap_or_else(clock_seed);

    log::info!("gl-demos starting {demo} demo (seed {seed})");
    let scene = Scene::new(demo, &settings, seed)?;

    let event_loop = EventLoop::new().map_err(|e| DemoError::Window(e.to_string()))?;
    let mut app = App::new(demo, settings, scene);
    event_loop
        .run_app(&mut app)
        .map_err(|e| DemoError::Window(e.to_string()))?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
