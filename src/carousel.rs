use std::cell::RefCell;
use std::rc::Rc;

use allhalal_web_core::{layout_pills, PillFrame, TaskStatus};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom;
use crate::frame_loop::FrameLoop;
use crate::runtime::PageComponent;

const WRAPPER_SELECTOR: &str = ".languages-carousel-wrapper";
const PILL_SELECTOR: &str = ".language-pill";

type CarouselTask = Box<dyn FnMut(f64) -> TaskStatus>;

pub struct CarouselElements {
    pub wrapper: Element,
    pub pills: Vec<Element>,
}

impl CarouselElements {
    pub fn find(document: &Document) -> Option<Self> {
        let wrapper = dom::select_one(document, WRAPPER_SELECTOR)?;
        let pills = dom::select_all(document, PILL_SELECTOR);
        if pills.is_empty() {
            return None;
        }
        Some(Self { wrapper, pills })
    }
}

/// Scales and highlights the language pill nearest the carousel centre.
pub struct Carousel {
    elements: Rc<CarouselElements>,
    frame_loop: RefCell<Option<FrameLoop<CarouselTask>>>,
}

impl Carousel {
    pub fn new(elements: CarouselElements) -> Rc<Self> {
        Rc::new(Self {
            elements: Rc::new(elements),
            frame_loop: RefCell::new(None),
        })
    }

    /// Measures and restyles every pill once.
    pub fn update(&self) -> Vec<PillFrame> {
        let frames = measure(&self.elements);
        if let Err(err) = apply(&self.elements, &frames) {
            dom::warn_js("carousel: style update failed", &err);
        }
        frames
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop
            .borrow()
            .as_ref()
            .is_some_and(|frame_loop| frame_loop.is_running())
    }
}

fn measure(elements: &CarouselElements) -> Vec<PillFrame> {
    let wrapper = dom::span_of(&elements.wrapper);
    let pills: Vec<_> = elements.pills.iter().map(dom::span_of).collect();
    layout_pills(wrapper, &pills)
}

fn apply(elements: &CarouselElements, frames: &[PillFrame]) -> Result<(), JsValue> {
    for (pill, frame) in elements.pills.iter().zip(frames) {
        dom::set_style(pill, "transform", &frame.transform())?;
        dom::set_style(pill, "opacity", &frame.opacity.to_string())?;
        dom::set_styles(pill, &frame.treatment().properties())?;
    }
    Ok(())
}

impl PageComponent for Carousel {
    fn label(&self) -> &'static str {
        "carousel"
    }

    fn attach(self: Rc<Self>) {
        let elements = Rc::clone(&self.elements);
        let task: CarouselTask = Box::new(move |_timestamp| {
            let frames = measure(&elements);
            if let Err(err) = apply(&elements, &frames) {
                dom::warn_js("carousel: style update failed", &err);
            }
            TaskStatus::Continue
        });
        let frame_loop = FrameLoop::new(task);
        frame_loop.start();
        *self.frame_loop.borrow_mut() = Some(frame_loop);
    }

    fn detach(&self) {
        self.frame_loop.borrow_mut().take();
    }
}
