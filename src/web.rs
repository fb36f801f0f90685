//! Browser front end.
//!
//! Mounts the room on a `<canvas>`, drives the engine from
//! `requestAnimationFrame`, and writes the intro text into a DOM overlay
//! whose CSS opacity follows the fade. Built with `cargo xtask web`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent,
    PageTransitionEvent, PointerEvent, WheelEvent,
};
use web_time::Instant;

use crate::assets;
use crate::audio::HtmlAudioPlayer;
use crate::engine::GreetingEngine;
use crate::error::GreetingError;
use crate::gpu::render_context::RenderContext;
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::renderer::SceneRenderer;

/// Wheel pixels per unit of zoom.
const WHEEL_SCALE: f32 = 0.01;

#[wasm_bindgen(start)]
fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount the greeting on the canvas `canvas_id`, writing the intro text
/// into the element `overlay_id`.
///
/// `options_url` names a TOML preset to fetch; when absent or unreachable
/// the defaults are used.
///
/// # Errors
///
/// Rejects if an element is missing, the preset fails to parse, or no GPU
/// surface can be created.
#[wasm_bindgen]
pub async fn start(
    canvas_id: String,
    overlay_id: String,
    options_url: Option<String>,
) -> Result<(), JsValue> {
    mount(&canvas_id, &overlay_id, options_url.as_deref())
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn mount(
    canvas_id: &str,
    overlay_id: &str,
    options_url: Option<&str>,
) -> Result<(), GreetingError> {
    let window = web_sys::window().ok_or_else(|| GreetingError::Web("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GreetingError::Web("no document".into()))?;
    let canvas: HtmlCanvasElement = element(&document, canvas_id)?;
    let overlay: HtmlElement = element(&document, overlay_id)?;

    let options = load_options(options_url).await?;
    let size = fit_canvas(&canvas);
    let context =
        RenderContext::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), size).await?;

    let music = Box::new(HtmlAudioPlayer::new(&options.audio)?);
    let engine = GreetingEngine::new(options, context.size(), music, Instant::now());
    let images = assets::fetch_images(&engine.scene().texture_paths()).await;
    let renderer = SceneRenderer::new(&context, &engine, images);
    log::info!("greeting mounted on #{canvas_id}");

    let app = Rc::new(RefCell::new(App {
        engine,
        context,
        renderer,
        canvas,
        overlay,
        shown_text: None,
        shown_opacity: None,
    }));
    register_listeners(&app)?;
    run_frames(app)?;
    Ok(())
}

fn element<T: JsCast>(document: &web_sys::Document, id: &str) -> Result<T, GreetingError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| GreetingError::Web(format!("#{id} not found")))?
        .dyn_into::<T>()
        .map_err(|_| GreetingError::Web(format!("#{id} has the wrong element type")))
}

async fn load_options(url: Option<&str>) -> Result<Options, GreetingError> {
    let Some(url) = url else {
        return Ok(Options::default());
    };
    match assets::fetch_text(url).await {
        Ok(text) => Options::from_toml_str(&text),
        Err(e) => {
            log::warn!("{e}; using default options");
            Ok(Options::default())
        }
    }
}

/// Match the canvas backing store to its CSS size in device pixels.
fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let width = (f64::from(canvas.client_width()) * ratio).max(1.0) as u32;
    let height = (f64::from(canvas.client_height()) * ratio).max(1.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

/// Pointer position in device pixels.
fn pointer_position(event: &PointerEvent) -> InputEvent {
    let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()) as f32;
    InputEvent::CursorMoved {
        x: event.offset_x() as f32 * ratio,
        y: event.offset_y() as f32 * ratio,
    }
}

struct App {
    engine: GreetingEngine,
    context: RenderContext,
    renderer: SceneRenderer,
    canvas: HtmlCanvasElement,
    overlay: HtmlElement,
    shown_text: Option<String>,
    shown_opacity: Option<f32>,
}

impl App {
    fn frame(&mut self) {
        let frame = self.engine.update(Instant::now());

        let text = frame.overlay.text();
        if self.shown_text.as_deref() != Some(text.as_str()) {
            self.overlay.set_inner_text(&text);
            self.shown_text = Some(text);
        }
        let opacity = frame.overlay.opacity;
        if self.shown_opacity != Some(opacity) {
            let _ = self
                .overlay
                .style()
                .set_property("opacity", &format!("{opacity:.3}"));
            self.shown_opacity = Some(opacity);
        }

        match self.renderer.render(&self.context, &self.engine, None) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.context.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }

    fn resize(&mut self) {
        let (width, height) = fit_canvas(&self.canvas);
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        self.engine.resize(width, height);
    }

    fn input(&mut self, event: InputEvent) {
        let _ = self.engine.handle_input(event, Instant::now());
    }
}

fn listen<E>(
    target: &EventTarget,
    kind: &str,
    passive: bool,
    handler: impl FnMut(E) + 'static,
) -> Result<(), GreetingError>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn register_listeners(app: &Rc<RefCell<App>>) -> Result<(), GreetingError> {
    let window = web_sys::window().ok_or_else(|| GreetingError::Web("no window".into()))?;
    let canvas: EventTarget = app.borrow().canvas.clone().into();

    let shared = Rc::clone(app);
    listen(&window, "keydown", false, move |event: KeyboardEvent| {
        if event.repeat() {
            return;
        }
        let handled = shared
            .borrow_mut()
            .engine
            .handle_key_press(&event.code(), Instant::now());
        if handled {
            event.prevent_default();
        }
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "pointerdown", true, move |event: PointerEvent| {
        let mut app = shared.borrow_mut();
        app.input(pointer_position(&event));
        app.input(InputEvent::MouseButton {
            button: MouseButton::from_dom(event.button()),
            pressed: true,
        });
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "pointermove", true, move |event: PointerEvent| {
        shared.borrow_mut().input(pointer_position(&event));
    })?;

    let shared = Rc::clone(app);
    listen(&window, "pointerup", true, move |event: PointerEvent| {
        shared.borrow_mut().input(InputEvent::MouseButton {
            button: MouseButton::from_dom(event.button()),
            pressed: false,
        });
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "pointerleave", true, move |_: PointerEvent| {
        shared.borrow_mut().input(InputEvent::CursorLeft);
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "wheel", false, move |event: WheelEvent| {
        event.prevent_default();
        shared.borrow_mut().input(InputEvent::Scroll {
            delta: -(event.delta_y() as f32) * WHEEL_SCALE,
        });
    })?;

    let shared = Rc::clone(app);
    listen(&window, "resize", true, move |_: web_sys::Event| {
        shared.borrow_mut().resize();
    })?;

    let shared = Rc::clone(app);
    listen(&window, "pagehide", true, move |event: PageTransitionEvent| {
        shared.borrow_mut().engine.page_hidden(event.persisted());
    })?;

    let shared = Rc::clone(app);
    listen(&window, "pageshow", true, move |event: PageTransitionEvent| {
        shared.borrow_mut().engine.page_shown(event.persisted());
    })?;

    Ok(())
}

type FrameCallback = Closure<dyn FnMut(f64)>;

fn request_frame(callback: &FrameCallback) -> Result<i32, GreetingError> {
    let window = web_sys::window().ok_or_else(|| GreetingError::Web("no window".into()))?;
    Ok(window.request_animation_frame(callback.as_ref().unchecked_ref())?)
}

fn run_frames(app: Rc<RefCell<App>>) -> Result<(), GreetingError> {
    let holder: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&holder);
    *holder.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        app.borrow_mut().frame();
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = request_frame(callback) {
                log::error!("animation loop stopped: {e}");
            }
        }
    }));
    if let Some(callback) = holder.borrow().as_ref() {
        let _ = request_frame(callback)?;
    }
    Ok(())
}
