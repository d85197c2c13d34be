use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Interval;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::warn;
use web_sys::Element;

use crate::performance_now;
use crate::reveal::{TextReveal, Tick};

struct RevealInner {
    state: RefCell<TextReveal>,
    element: Element,
    timer: RefCell<Option<Interval>>,
    first_frame: RefCell<Option<AnimationFrame>>,
    rng: RefCell<SmallRng>,
}

/// Drives one [`TextReveal`] from a repeating timer and paints it into an
/// element. The placeholder stays up until the first animation frame; the
/// timer is armed from there.
pub struct RevealBinding {
    inner: Rc<RevealInner>,
}

impl RevealBinding {
    pub fn start(element: Element, target: &str, interval_ms: u32) -> Self {
        let inner = Rc::new(RevealInner {
            state: RefCell::new(TextReveal::new(target, interval_ms)),
            element,
            timer: RefCell::new(None),
            first_frame: RefCell::new(None),
            rng: RefCell::new(seeded_rng()),
        });
        paint(&inner);
        let weak = Rc::downgrade(&inner);
        let frame = request_animation_frame(move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.state.borrow().is_torn_down() {
                return;
            }
            inner.state.borrow_mut().mark_painted();
            paint(&inner);
            arm(&inner);
        });
        *inner.first_frame.borrow_mut() = Some(frame);
        Self { inner }
    }

    pub fn revealed_text(&self) -> String {
        self.inner.state.borrow().revealed_text().to_string()
    }

    pub fn retarget(&self, target: &str) {
        self.inner.state.borrow_mut().retarget(target);
        self.rearm();
    }

    pub fn set_interval(&self, interval_ms: u32) {
        self.inner.state.borrow_mut().set_interval(interval_ms);
        self.rearm();
    }

    // Before the first frame the pending callback arms the timer itself.
    fn rearm(&self) {
        if self.inner.state.borrow().is_painted() {
            paint(&self.inner);
            arm(&self.inner);
        }
    }

    pub fn teardown(&self) {
        self.inner.state.borrow_mut().teardown();
        self.inner.first_frame.borrow_mut().take();
        self.inner.timer.borrow_mut().take();
    }
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.teardown();
    }
}

// Replaces any running timer; a fresh one is only created if text remains.
fn arm(inner: &Rc<RevealInner>) {
    inner.timer.borrow_mut().take();
    let (needed, interval_ms) = {
        let state = inner.state.borrow();
        (state.needs_timer(), state.interval_ms())
    };
    if !needed {
        return;
    }
    let weak: Weak<RevealInner> = Rc::downgrade(inner);
    let interval = Interval::new(interval_ms, move || {
        if let Some(inner) = weak.upgrade() {
            on_tick(&inner);
        }
    });
    *inner.timer.borrow_mut() = Some(interval);
}

fn on_tick(inner: &RevealInner) {
    let tick = inner.state.borrow_mut().tick();
    match tick {
        Tick::Advanced => paint(inner),
        Tick::Finished => {
            paint(inner);
            inner.timer.borrow_mut().take();
        }
        Tick::Inert => {
            inner.timer.borrow_mut().take();
        }
    }
}

fn paint(inner: &RevealInner) {
    let text = inner.state.borrow().render(&mut *inner.rng.borrow_mut());
    inner.element.set_text_content(Some(&text));
}

fn seeded_rng() -> SmallRng {
    let mut seed = [0u8; 8];
    match getrandom::getrandom(&mut seed) {
        Ok(()) => SmallRng::seed_from_u64(u64::from_le_bytes(seed)),
        Err(err) => {
            warn!(%err, "no browser entropy, seeding mask from clock");
            SmallRng::seed_from_u64(performance_now().to_bits())
        }
    }
}
