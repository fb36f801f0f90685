//! Standalone greeting window backed by winit.
//!
//! The typed intro text is mirrored to the window title and the overlay
//! fade is painted over the room by the renderer.
//!
//! ```no_run
//! # use birthday::Viewer;
//! Viewer::builder()
//!     .with_title("Happy Birthday")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    assets,
    audio::SilentPlayer,
    engine::GreetingEngine,
    error::GreetingError,
    gpu::render_context::RenderContext,
    input::{InputEvent, MouseButton},
    options::Options,
    renderer::SceneRenderer,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Happy Birthday".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title shown before the intro starts.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that plays the greeting.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`GreetingError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), GreetingError> {
        let event_loop =
            EventLoop::new().map_err(|e| GreetingError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            running: None,
            options: Some(self.options),
            title: self.title,
            shown_title: String::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GreetingError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    context: RenderContext,
    renderer: SceneRenderer,
    engine: GreetingEngine,
}

/// Internal winit application handler.
struct ViewerApp {
    running: Option<Running>,
    options: Option<Options>,
    title: String,
    /// Title currently set on the window, to skip redundant updates.
    shown_title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, GreetingError> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let mut attrs = Window::default_attributes().with_title(&self.title);
        if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            attrs = attrs.with_inner_size(winit::dpi::LogicalSize::new(logical_w, logical_h));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| GreetingError::Viewer(e.to_string()))?,
        );
        let size = viewport_size(window.inner_size());
        let context = pollster::block_on(RenderContext::new(window.clone(), size))?;

        let options = self.options.take().unwrap_or_default();
        let music = Box::new(SilentPlayer::new(&options.audio));
        let engine = GreetingEngine::new(options, context.size(), music, Instant::now());

        let images = assets::load_images(&engine.scene().texture_paths());
        let renderer = SceneRenderer::new(&context, &engine, images);

        window.request_redraw();
        Ok(Running {
            window,
            context,
            renderer,
            engine,
        })
    }

    fn redraw(&mut self) {
        let Some(running) = &mut self.running else {
            return;
        };
        let frame = running.engine.update(Instant::now());

        // Titles are single-line.
        let typed = frame.overlay.text().replace('\n', "  ");
        let title = if typed.trim().is_empty() {
            self.title.clone()
        } else {
            typed
        };
        if title != self.shown_title {
            running.window.set_title(&title);
            self.shown_title = title;
        }

        match running
            .renderer
            .render(&running.context, &running.engine, Some(frame.overlay.opacity))
        {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                running.context.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        running.window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                log::error!("Failed to start viewer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(running) = &mut self.running {
                running.engine.teardown();
            }
            event_loop.exit();
            return;
        }
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw();
            return;
        }

        let Some(running) = &mut self.running else {
            return;
        };
        let now = Instant::now();

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                running.context.resize(w, h);
                running.renderer.resize(&running.context);
                running.engine.resize(w, h);
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let _ = running.engine.handle_input(
                    InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed: state == ElementState::Pressed,
                    },
                    now,
                );
            }

            WindowEvent::CursorMoved { position, .. } => {
                let _ = running.engine.handle_input(
                    InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    },
                    now,
                );
            }

            WindowEvent::CursorLeft { .. } => {
                let _ = running.engine.handle_input(InputEvent::CursorLeft, now);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                let _ = running
                    .engine
                    .handle_input(InputEvent::Scroll { delta }, now);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if running.engine.handle_key_press(&key_str, now) {
                    log::debug!("key {key_str} handled");
                }
            }

            _ => (),
        }
    }
}
