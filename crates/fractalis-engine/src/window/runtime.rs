use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, AttachCtx, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::error::SetupError;
use crate::surface::AttachedSurface;
use crate::time::FrameClock;

use super::host::{RedrawScheduler, WindowHost};

/// How the window is presented.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WindowMode {
    Windowed,
    /// Borderless fullscreen on the current monitor.
    Fullscreen,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub mode: WindowMode,
    /// Identifier the window is registered under as a drawable.
    pub surface_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "fractalis".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            mode: WindowMode::Fullscreen,
            surface_id: "backdrop".to_string(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, attaches the app's surface and drives frames until exit.
    ///
    /// Returns the [`SetupError`] (wrapped) if attaching or `App::on_attach` failed.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    surface: AttachedSurface<Gpu<'this>>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    failure: Option<SetupError>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn fail(&mut self, err: SetupError) {
        log::error!("{err}");
        self.failure = Some(err);
        self.request_exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Window> {
        let fullscreen = match self.config.mode {
            WindowMode::Windowed => None,
            WindowMode::Fullscreen => Some(Fullscreen::Borderless(None)),
        };

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_fullscreen(fullscreen);

        event_loop
            .create_window(attrs)
            .context("failed to create window")
    }

    /// Registers the window, attaches the requested surface and runs the app's attach hook.
    fn attach(&mut self, window: Window) -> std::result::Result<WindowEntry, SetupError> {
        let request = self.app.surface_request();
        let name = self.config.surface_id.clone();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::new(),
            window,
            surface_builder: |w| {
                let mut host = WindowHost::new(w, name, gpu_init);
                AttachedSurface::attach(&mut host, &request.id, request.track_pointer)
            },
        }
        .try_build()?;

        let app = &mut self.app;
        entry.with(|fields| {
            app.on_attach(&AttachCtx {
                window: fields.window,
                surface: fields.surface,
            })
        })?;

        Ok(entry)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                self.request_exit();
                event_loop.exit();
                return;
            }
        };

        match self.attach(window) {
            Ok(entry) => {
                event_loop.set_control_flow(ControlFlow::Wait);
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => {
                self.fail(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, window) = (&mut self.app, &mut self.window);

        let Some(entry) = window.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.request_exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                entry.with_surface_mut(|surface| {
                    if surface.tracks_pointer() {
                        surface.on_pointer_move(position.x as f32, position.y as f32);
                    }
                });
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_surface_mut(|surface| surface.sync_size());
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let mut app_control = AppControl::Continue;

                entry.with_mut(|fields| {
                    let time = fields.clock.tick();
                    let mut scheduler = RedrawScheduler {
                        window: fields.window,
                    };

                    let mut ctx = FrameCtx {
                        window: fields.window,
                        surface: fields.surface,
                        time,
                        scheduler: &mut scheduler,
                    };

                    app_control = app.on_frame(&mut ctx);
                });

                if app_control == AppControl::Exit {
                    self.request_exit();
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
