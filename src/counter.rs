use std::cell::RefCell;
use std::rc::Rc;

use allhalal_web_core::{parse_target, CounterAnimation, FrameTask, SiteConfig, TaskStatus};
use gloo::timers::callback::Timeout;
use web_sys::{Document, Element};

use crate::dom;
use crate::frame_loop::FrameLoop;
use crate::runtime::PageComponent;

const COUNTER_SELECTOR: &str = ".hero-number[data-target], .hero-number-new[data-target]";

struct CounterTask {
    element: Element,
    animation: CounterAnimation,
}

impl FrameTask for CounterTask {
    fn tick(&mut self, timestamp_ms: f64) -> TaskStatus {
        let status = self.animation.tick(timestamp_ms);
        self.element.set_text_content(Some(self.animation.text()));
        status
    }
}

/// Counts the hero metric up from zero once the page is ready.
pub struct Counter {
    element: Element,
    target: i64,
    delay_ms: u32,
    duration_ms: f64,
    start_timer: RefCell<Option<Timeout>>,
    frame_loop: Rc<RefCell<Option<FrameLoop<CounterTask>>>>,
}

impl Counter {
    pub fn find(document: &Document) -> Option<Element> {
        dom::select_one(document, COUNTER_SELECTOR)
    }

    /// Returns `None` when the element carries no usable `data-target`.
    pub fn new(element: Element, config: &SiteConfig) -> Option<Rc<Self>> {
        let raw = element.get_attribute("data-target").unwrap_or_default();
        let Some(target) = parse_target(&raw) else {
            gloo::console::warn!(format!("counter: ignoring data-target {raw:?}"));
            return None;
        };
        Some(Rc::new(Self {
            element,
            target,
            delay_ms: config.counter_delay_ms,
            duration_ms: config.counter_duration_ms,
            start_timer: RefCell::new(None),
            frame_loop: Rc::new(RefCell::new(None)),
        }))
    }

    pub fn is_animating(&self) -> bool {
        self.frame_loop
            .borrow()
            .as_ref()
            .is_some_and(|frame_loop| frame_loop.is_running())
    }
}

impl PageComponent for Counter {
    fn label(&self) -> &'static str {
        "counter"
    }

    fn attach(self: Rc<Self>) {
        let task = CounterTask {
            element: self.element.clone(),
            animation: CounterAnimation::new(self.target, self.duration_ms),
        };
        let slot = Rc::clone(&self.frame_loop);
        let timer = Timeout::new(self.delay_ms, move || {
            let frame_loop = FrameLoop::new(task);
            frame_loop.start();
            *slot.borrow_mut() = Some(frame_loop);
        });
        *self.start_timer.borrow_mut() = Some(timer);
    }

    fn detach(&self) {
        self.start_timer.borrow_mut().take();
        self.frame_loop.borrow_mut().take();
    }
}
