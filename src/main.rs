//! Bouncing Balls entry point
//!
//! Loads settings, builds the scene, opens the window and runs the frame loop:
//! one physics tick per redraw, driven by the wall-clock frame delta.
//!
//! Usage: `bouncing-balls [floor|container]`

use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use bouncing_balls::renderer::{RenderState, circle_fan, fan_indices};
use bouncing_balls::sim::{Scene, tick};
use bouncing_balls::{FrameClock, Settings};

/// Frames between FPS log lines
const FPS_LOG_FRAMES: u64 = 600;

struct App {
    settings: Settings,
    scene: Scene,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    clock: FrameClock,
    /// Startup failure to report once the event loop returns
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, scene: Scene) -> Self {
        Self {
            settings,
            scene,
            window: None,
            render_state: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    /// Create the window, GPU surface and pipeline
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a GPU adapter")?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mesh = circle_fan(self.settings.ball_radius, self.settings.circle_segments);
        let indices = fan_indices(self.settings.circle_segments)?;
        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
            &mesh,
            &indices,
            self.scene.balls.len(),
        ))?;

        self.render_state = Some(render_state);
        self.window = Some(window);
        Ok(())
    }

    /// Advance the simulation by the time since the last frame, then draw it
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        tick(&mut self.scene, dt);

        if let Some(ref mut render_state) = self.render_state {
            match render_state.render(&self.scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        if self.clock.frames() % FPS_LOG_FRAMES == 0 {
            log::info!(
                "{} fps ({} frames, {} ticks)",
                self.clock.fps(),
                self.clock.frames(),
                self.scene.ticks
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
            return;
        }

        // Don't count setup time as the first frame's delta
        self.clock = FrameClock::new();
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(ref mut render_state) = self.render_state {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = Settings::load()?;
    settings.apply_args(std::env::args().skip(1))?;
    settings.validate()?;

    let seed = settings.resolve_seed();
    let scene = Scene::from_settings(&settings, seed);
    log::info!(
        "Bouncing Balls starting: {} scene, {} ball(s), seed {}",
        settings.scene.as_str(),
        scene.balls.len(),
        seed
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, scene);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.error.take() {
        return Err(e);
    }
    log::info!(
        "Exited after {} frames, {} ticks",
        app.clock.frames(),
        app.scene.ticks
    );
    Ok(())
}
