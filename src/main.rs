//! Primordia - Particle Reactor
//!
//! Opens a window onto a self-organising particle system. Clicking drops
//! particles into the simulation; the arrow keys resize the simulated space.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use primordia::config::AppConfig;
use primordia::input::{InputAction, InputMapper};
use primordia::systems::{
    ActionOutcome, FrameTimer, RenderError, RenderSystem, SimulationSystem, WindowSystem,
};
use primordia_input::CameraController;
use primordia_render::Camera2D;
use primordia_sim::{ParticleManager, SimError};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    renderer: Option<RenderSystem>,
    simulation: SimulationSystem<ParticleManager>,
    camera: Camera2D,
    controller: CameraController,
    frame_timer: FrameTimer,
    /// Frames rendered since the title was last refreshed
    frames_since_title: u32,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, SimError> {
        let manager = ParticleManager::new(config.simulation.to_engine_config())?;
        let simulation = SimulationSystem::new(manager, config.simulation.spawn_count)
            .with_paused(config.simulation.start_paused);

        let camera = Camera2D::new(config.window.width as f32, config.window.height as f32)
            .with_zoom_limits(config.camera.min_zoom, config.camera.max_zoom);
        let controller = CameraController::new().with_zoom_step(config.camera.zoom_step);

        Ok(Self {
            config,
            window: None,
            renderer: None,
            simulation,
            camera,
            controller,
            frame_timer: FrameTimer::new(),
            frames_since_title: 0,
        })
    }

    /// Apply an action from the keyboard or mouse
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, action: InputAction) {
        let cursor_world = self
            .controller
            .cursor_position()
            .map(|pixel| self.camera.pixel_to_world(pixel));

        match self.simulation.apply(action, cursor_world) {
            ActionOutcome::Exit => {
                log::info!("Exit requested");
                event_loop.exit();
            }
            ActionOutcome::Changed => self.refresh_title(),
            ActionOutcome::Ignored => {}
        }
    }

    fn refresh_title(&mut self) {
        if let Some(window) = &self.window {
            let sim = self.simulation.simulation();
            window.update_title(sim.particle_count(), sim.mode(), self.simulation.is_paused());
        }
        self.frames_since_title = 0;
    }

    /// Step (when the limiter scheduled it), draw, and report the frame time
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.frame_timer.start();

        self.simulation.tick();

        if let Some(renderer) = &mut self.renderer {
            let result = renderer.render_frame(
                &self.camera,
                self.simulation.background(),
                self.simulation.simulation().particles(),
            );
            match result {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    renderer.reconfigure();
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        self.frame_timer.stop();
        if self.config.debug.log_frame_time {
            log::debug!("Frame time: {:.3} ms", self.frame_timer.measure_ms());
        }

        self.frames_since_title += 1;
        if self.frames_since_title >= self.config.window.framerate.max(30) {
            self.refresh_title();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.window.vsync,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.size();
        self.camera.set_viewport(width as f32, height as f32);
        if self.config.camera.fit_to_bound {
            self.camera.fit_bound(self.simulation.background());
        }

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.refresh_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // Zoom and pan get first refusal
        if self.controller.handle_window_event(&mut self.camera, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                self.camera
                    .set_viewport(physical_size.width as f32, physical_size.height as f32);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.dispatch(event_loop, action);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(action) = InputMapper::map_mouse_button(button, state) {
                    self.dispatch(event_loop, action);
                }
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &mut self.window {
            if window.begin_frame_if_due(Instant::now()) {
                self.simulation.schedule_step();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(window.next_frame_deadline()));
        }
    }
}

fn main() {
    // Config is read before logging starts so it can choose the default level
    let config_dir = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let loaded = AppConfig::load_from(&config_dir);
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
    log::info!("Starting Primordia");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.run_app(&mut app).expect("Event loop error");
}
