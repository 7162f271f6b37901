mod color;
mod config;
mod field;
mod particle;
mod renderer;
mod scheduler;
mod surface;
mod utils;

pub use color::Color;
pub use config::FieldConfig;
pub use field::{attraction_impulse, link_opacity, particle_count_for_width, ParticleField};
pub use particle::Particle;
pub use renderer::CanvasRenderer;
pub use scheduler::{run, AnimationFrameScheduler, FrameCallback, FrameScheduler, ManualScheduler};
pub use surface::Surface;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

// Window resizes are coalesced: the field is rebuilt once the window has
// stopped changing size for this long.
const RESIZE_DEBOUNCE_MS: i32 = 250;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Starts the particle background on the canvas with id `canvas_id`.
///
/// If there is no such canvas, or it has no 2d context, this quietly does
/// nothing.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    start_with_rng(canvas_id, StdRng::from_entropy())
}

/// Same as `start`, with a reproducible particle layout.
#[wasm_bindgen]
pub fn start_seeded(canvas_id: &str, seed: u32) -> Result<(), JsValue> {
    start_with_rng(canvas_id, StdRng::seed_from_u64(seed as u64))
}

fn start_with_rng(canvas_id: &str, rng: StdRng) -> Result<(), JsValue> {
    let (window, canvas, context) = match find_surface(canvas_id) {
        Some(found) => found,
        None => return Ok(()),
    };

    let (width, height) = viewport_size(&window)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let mut field = ParticleField::new(FieldConfig::default(), rng);
    field.initialize(canvas.width(), canvas.height());
    utils::log(&format!(
        "particle field running with {} particles on {}x{}",
        field.particle_count(),
        width,
        height
    ));
    let field = Rc::new(RefCell::new(field));

    bind_pointer(&canvas, &field)?;
    bind_resize(&window, &canvas, &field)?;

    let scheduler = Rc::new(AnimationFrameScheduler::new(window));
    run(field, CanvasRenderer::new(context), scheduler);
    Ok(())
}

fn find_surface(canvas_id: &str) -> Option<(Window, HtmlCanvasElement, CanvasRenderingContext2d)> {
    let window = web_sys::window()?;
    let canvas = window
        .document()?
        .get_element_by_id(canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    let context = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    Some((window, canvas, context))
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

// Pointer coordinates are forwarded relative to the canvas' top-left corner.
fn bind_pointer(canvas: &HtmlCanvasElement, field: &Rc<RefCell<ParticleField>>) -> Result<(), JsValue> {
    let target = canvas.clone();
    let field = Rc::clone(field);
    let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
        let rect = target.get_bounding_client_rect();
        field.borrow_mut().set_pointer(
            event.client_x() as f64 - rect.left(),
            event.client_y() as f64 - rect.top(),
        );
    }) as Box<dyn FnMut(MouseEvent)>);
    canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    // lives as long as the page
    on_move.forget();
    Ok(())
}

fn bind_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    field: &Rc<RefCell<ParticleField>>,
) -> Result<(), JsValue> {
    let apply = {
        let window = window.clone();
        let canvas = canvas.clone();
        let field = Rc::clone(field);
        Closure::wrap(Box::new(move || {
            let (width, height) = match viewport_size(&window) {
                Ok(size) => size,
                Err(err) => return utils::error(&err),
            };
            canvas.set_width(width);
            canvas.set_height(height);
            field.borrow_mut().resize(width, height);
            utils::log(&format!("particle field resized to {}x{}", width, height));
        }) as Box<dyn FnMut()>)
    };

    let pending = Rc::new(Cell::new(None::<i32>));
    let on_resize = {
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            if let Some(handle) = pending.take() {
                window.clear_timeout_with_handle(handle);
            }
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                apply.as_ref().unchecked_ref(),
                RESIZE_DEBOUNCE_MS,
            ) {
                Ok(handle) => pending.set(Some(handle)),
                Err(err) => utils::error(&err),
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}
