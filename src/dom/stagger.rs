use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::markup::{skill_bar_id, skill_value_id};
use crate::performance_now;
use crate::stagger::StagedAnimator;

struct StaggerInner {
    animator: RefCell<StagedAnimator>,
    document: Document,
    mounted_at: f64,
    timeouts: RefCell<Vec<Timeout>>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// Owns one timeout per skill entry plus the count-up frame loop.
pub struct StaggerBinding {
    inner: Rc<StaggerInner>,
}

impl StaggerBinding {
    pub fn start(document: &Document, animator: StagedAnimator) -> Self {
        let delays = animator.start_times();
        let inner = Rc::new(StaggerInner {
            animator: RefCell::new(animator),
            document: document.clone(),
            mounted_at: performance_now(),
            timeouts: RefCell::new(Vec::with_capacity(delays.len())),
            frame: RefCell::new(None),
        });
        for (index, delay) in delays.into_iter().enumerate() {
            let weak = Rc::downgrade(&inner);
            let timeout = Timeout::new(delay, move || {
                if let Some(inner) = weak.upgrade() {
                    start_due(&inner, index);
                }
            });
            inner.timeouts.borrow_mut().push(timeout);
        }
        Self { inner }
    }

    pub fn cancel(&self) {
        self.inner.animator.borrow_mut().cancel();
        self.inner.timeouts.borrow_mut().clear();
        self.inner.frame.borrow_mut().take();
    }
}

impl Drop for StaggerBinding {
    fn drop(&mut self) {
        self.cancel();
    }
}

// A late timeout also starts any earlier entry whose own timeout has not run
// yet, so starts never go out of list order.
fn start_due(inner: &Rc<StaggerInner>, fired: usize) {
    let now = performance_now();
    let mut due = inner.animator.borrow().due(now - inner.mounted_at);
    if !due.contains(&fired) {
        due.push(fired);
        due.sort_unstable();
    }
    let mut started = false;
    for index in due {
        if !inner.animator.borrow_mut().start(index, now) {
            continue;
        }
        let width = inner.animator.borrow().bar_width(index);
        if let Some(bar) = element(&inner.document, &skill_bar_id(index)) {
            bar.style().set_property("width", &format!("{width}%")).ok();
        }
        started = true;
    }
    if started {
        ensure_frame(inner);
    }
}

fn ensure_frame(inner: &Rc<StaggerInner>) {
    if inner.frame.borrow().is_some() {
        return;
    }
    let weak: Weak<StaggerInner> = Rc::downgrade(inner);
    let frame = request_animation_frame(move |ts| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.frame.borrow_mut().take();
        let counting = {
            let animator = inner.animator.borrow();
            for index in 0..animator.entries().len() {
                if !animator.is_started(index) {
                    continue;
                }
                let value = animator.counter_value(index, ts).round();
                if let Some(el) = element(&inner.document, &skill_value_id(index)) {
                    el.set_text_content(Some(&format!("{value}")));
                }
            }
            animator.is_counting(ts)
        };
        if counting {
            ensure_frame(&inner);
        }
    });
    *inner.frame.borrow_mut() = Some(frame);
}

fn element(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}
