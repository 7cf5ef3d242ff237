use anyhow::Result;
use orrery_config::AppConfig;
use orrery_display::WindowDisplay;
use orrery_immersion::ImmersionController;
use orrery_input::keys::KeyBindings;
use orrery_input::ImmersionCommand;
use orrery_scene::RenderSnapshot;
use orrery_sensor::{OrientationSource, PermissionGate, SimulatedOrientation};
use orrery_voice::{ConsoleSpeech, SpeechEngine};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// Event sources built before the window exists.
struct Sources {
    sensor: Box<dyn OrientationSource>,
    speech: Option<Box<dyn SpeechEngine>>,
}

/// Application state.
struct App {
    config: AppConfig,
    keys: KeyBindings,
    sources: Option<Sources>,
    window: Option<Arc<Window>>,
    controller: Option<ImmersionController>,
    /// Last user-facing message (e.g. a refused entry).
    notice: Option<String>,
    title: String,
    frame_count: u64,
}

impl App {
    fn new(config: AppConfig, sources: Sources) -> Self {
        Self {
            config,
            keys: KeyBindings::default(),
            sources: Some(sources),
            window: None,
            controller: None,
            notice: None,
            title: String::new(),
            frame_count: 0,
        }
    }

    fn run_command(&mut self, command: ImmersionCommand) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };

        match pollster::block_on(controller.handle(command)) {
            Ok(()) => {
                self.notice = None;
                for fault in controller.faults() {
                    info!(%fault, "Running without");
                }
            }
            Err(e) => {
                error!(%e, ?command, "Immersion command refused");
                self.notice = Some(e.to_string());
            }
        }
    }

    fn update_title(&mut self, snapshot: &RenderSnapshot) {
        let Some(window) = &self.window else {
            return;
        };

        let mut title = String::from("Orrery");
        if snapshot.immersive {
            title.push_str(" [immersive]");
        }
        if let Some(body) = snapshot.focus {
            title.push_str(&format!(" - {body}"));
        }
        if let Some(notice) = &self.notice {
            title.push_str(&format!(" ({notice})"));
        }

        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(sources) = self.sources.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(?e, "Failed to create window");
                event_loop.exit();
                return;
            }
        };

        // Desktop platforms have no motion-sensor consent model.
        let controller = ImmersionController::new(
            &self.config,
            PermissionGate::new(None),
            Box::new(WindowDisplay::new(window.clone())),
            sources.sensor,
            sources.speech,
        );

        window.request_redraw();
        self.window = Some(window);
        self.controller = Some(controller);

        info!(
            language = %self.config.speech.language,
            "Application initialized; F11 toggles immersive mode, type a planet name to focus it"
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(controller) = &mut self.controller {
                    controller.exit();
                }
                // Save config on exit.
                if let Err(e) = orrery_config::save_config(&self.config) {
                    error!(?e, "Failed to save config");
                }
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let Some(command) = self.keys.command_for(event.physical_key, event.state) else {
                    return;
                };

                let active = self
                    .controller
                    .as_ref()
                    .is_some_and(|c| c.is_active());
                if command == ImmersionCommand::Exit && !active {
                    event_loop.exit();
                    return;
                }

                self.run_command(command);
            }

            WindowEvent::RedrawRequested => {
                let Some(controller) = &mut self.controller else {
                    return;
                };

                controller.tick(Instant::now());
                let snapshot = controller.snapshot();
                let voice = controller.voice_active();

                self.frame_count += 1;
                if self.frame_count % 300 == 0 {
                    tracing::debug!(
                        frames = self.frame_count,
                        immersive = snapshot.immersive,
                        rotate_x = snapshot.view.rotate_x,
                        rotate_y = snapshot.view.rotate_y,
                        rotate_z = snapshot.view.rotate_z,
                        focus = ?snapshot.focus,
                        voice,
                        "Render heartbeat"
                    );
                }

                self.update_title(&snapshot);

                // Request next frame.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let loaded = orrery_config::load_config();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .init();

    info!("Orrery starting");
    if let Err(e) = &loaded {
        warn!(?e, "Failed to load config, using defaults");
    }

    let sensor: Box<dyn OrientationSource> =
        Box::new(SimulatedOrientation::new(runtime.handle().clone()));
    let speech: Option<Box<dyn SpeechEngine>> = if config.speech.enabled {
        Some(Box::new(ConsoleSpeech::spawn(
            runtime.handle().clone(),
            &config.speech.language,
        )))
    } else {
        None
    };

    // Run the application.
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, Sources { sensor, speech });
    event_loop.run_app(&mut app)?;

    // The stdin reader can't be cancelled; don't wait on it.
    drop(app);
    runtime.shutdown_background();
    Ok(())
}
