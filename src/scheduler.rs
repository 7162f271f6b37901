// Frame scheduling. The animation never loops on its own: every frame asks a
// FrameScheduler for the next one, so the browser (or a test) decides when
// frames happen.

use crate::field::ParticleField;
use crate::surface::Surface;
use crate::utils::{self, Timer};
use rand::Rng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub type FrameCallback = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    /// Arranges for `callback` to run once, before the next display refresh.
    fn request_next_frame(&self, callback: FrameCallback);
}

/// Schedules frames with `window.requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        AnimationFrameScheduler { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_next_frame(&self, callback: FrameCallback) {
        // freed by JS once it has fired
        let closure = Closure::once_into_js(move || callback());
        let function: &js_sys::Function = closure.unchecked_ref();
        if let Err(err) = self.window.request_animation_frame(function) {
            utils::error(&err);
        }
    }
}

/// Holds requested frames until `tick` is called. Useful for driving the
/// animation one frame at a time.
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback that was pending when `tick` was called. Frames
    /// requested while ticking wait for the next tick. Returns how many ran.
    pub fn tick(&self) -> usize {
        let due: Vec<FrameCallback> = self.pending.borrow_mut().drain(..).collect();
        let count = due.len();
        for callback in due {
            callback();
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_next_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}

/// Starts the animation loop: on every frame the field is stepped, drawn
/// onto `surface`, and the next frame is requested. The loop only ends when
/// the scheduler stops calling back.
pub fn run<R, S, F>(field: Rc<RefCell<ParticleField<R>>>, surface: S, scheduler: Rc<F>)
where
    R: Rng + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_next_frame(Box::new(move || frame(field, surface, next)));
}

fn frame<R, S, F>(field: Rc<RefCell<ParticleField<R>>>, mut surface: S, scheduler: Rc<F>)
where
    R: Rng + 'static,
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    {
        let mut field = field.borrow_mut();
        {
            let _timer = Timer::new("ParticleField::step");
            field.step();
        }
        let _timer = Timer::new("ParticleField::render");
        field.render(&mut surface);
    }
    run(field, surface, scheduler);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::field::tests::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Shares its recorded calls with the test after being moved into the loop.
    struct SharedSurface(Rc<RefCell<RecordingSurface>>);

    impl Surface for SharedSurface {
        fn clear(&mut self, width: f64, height: f64) {
            self.0.borrow_mut().clear(width, height);
        }

        fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: crate::color::Color, alpha: f64) {
            self.0.borrow_mut().fill_circle(center, radius, color, alpha);
        }

        fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: crate::color::Color, alpha: f64, width: f64) {
            self.0.borrow_mut().stroke_line(from, to, color, alpha, width);
        }
    }

    fn clears(recorded: &RefCell<RecordingSurface>) -> usize {
        recorded
            .borrow()
            .calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Clear(..)))
            .count()
    }

    #[test]
    fn nothing_runs_until_the_scheduler_ticks() {
        let field = Rc::new(RefCell::new(ParticleField::new(
            FieldConfig::default(),
            StdRng::seed_from_u64(1),
        )));
        field.borrow_mut().initialize(300, 300);
        let before = field.borrow().particles().to_vec();
        let recorded = Rc::new(RefCell::new(RecordingSurface::default()));
        let scheduler = Rc::new(ManualScheduler::new());

        run(Rc::clone(&field), SharedSurface(Rc::clone(&recorded)), Rc::clone(&scheduler));

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(clears(&recorded), 0);
        assert_eq!(field.borrow().particles(), &before[..]);
    }

    #[test]
    fn each_tick_steps_and_renders_once() {
        let field = Rc::new(RefCell::new(ParticleField::new(
            FieldConfig::default(),
            StdRng::seed_from_u64(2),
        )));
        field.borrow_mut().initialize(450, 300);
        let mut expected = ParticleField::new(FieldConfig::default(), StdRng::seed_from_u64(2));
        expected.initialize(450, 300);

        let recorded = Rc::new(RefCell::new(RecordingSurface::default()));
        let scheduler = Rc::new(ManualScheduler::new());
        run(Rc::clone(&field), SharedSurface(Rc::clone(&recorded)), Rc::clone(&scheduler));

        for frames in 1..=5 {
            assert_eq!(scheduler.tick(), 1);
            expected.step();
            assert_eq!(clears(&recorded), frames);
            assert_eq!(recorded.borrow().circles(), frames * 30);
            assert_eq!(field.borrow().particles(), expected.particles());
            assert_eq!(scheduler.pending(), 1);
        }
    }

    #[test]
    fn input_between_frames_reaches_the_next_step() {
        let field = Rc::new(RefCell::new(ParticleField::new(
            FieldConfig::default(),
            StdRng::seed_from_u64(3),
        )));
        field.borrow_mut().initialize(300, 300);
        let scheduler = Rc::new(ManualScheduler::new());
        run(
            Rc::clone(&field),
            SharedSurface(Rc::new(RefCell::new(RecordingSurface::default()))),
            Rc::clone(&scheduler),
        );

        scheduler.tick();
        field.borrow_mut().set_pointer(150.0, 150.0);
        field.borrow_mut().resize(600, 300);
        scheduler.tick();

        let field = field.borrow();
        assert_eq!(field.particle_count(), 40);
        assert_eq!(field.pointer(), Some([150.0, 150.0]));
        assert!(field.particles().iter().all(|p| p.pos[0] <= 600.0));
    }
}
