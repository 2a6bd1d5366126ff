use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use allhalal_web_core::particles::{GLOW_BLUR, VISIBILITY_THRESHOLD};
use allhalal_web_core::{FrameTask, ParticleField, TaskStatus};
use gloo::events::EventListener;
use js_sys::{Array, Math};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom;
use crate::frame_loop::FrameLoop;
use crate::runtime::PageComponent;

const CANVAS_SELECTOR: &str = ".languages-particles";
const SECTION_SELECTOR: &str = ".languages";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct ParticleElements {
    pub canvas: HtmlCanvasElement,
    pub section: HtmlElement,
}

impl ParticleElements {
    pub fn find(document: &Document) -> Option<Self> {
        let canvas = dom::select_one(document, CANVAS_SELECTOR)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let section = canvas
            .closest(SECTION_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self { canvas, section })
    }
}

struct ParticleTask {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: ParticleField<StdRng>,
}

impl ParticleTask {
    fn fit_to(&mut self, section: &HtmlElement) {
        let (width, height) = section_size(section);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.resize(f64::from(width), f64::from(height));
    }

    fn draw(&self) {
        let (width, height) = self.field.size();
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, width, height);
        for particle in self.field.particles() {
            ctx.begin_path();
            if ctx.arc(particle.x, particle.y, particle.size, 0.0, TAU).is_err() {
                continue;
            }
            ctx.set_fill_style_str(&particle.fill_style());
            ctx.fill();
            ctx.set_shadow_blur(GLOW_BLUR);
            ctx.set_shadow_color(&particle.glow_color());
            ctx.fill();
            ctx.set_shadow_blur(0.0);
        }
    }
}

fn section_size(section: &HtmlElement) -> (u32, u32) {
    (
        section.offset_width().max(0) as u32,
        section.offset_height().max(0) as u32,
    )
}

impl FrameTask for ParticleTask {
    fn tick(&mut self, _timestamp_ms: f64) -> TaskStatus {
        self.field.step();
        self.draw();
        TaskStatus::Continue
    }
}

/// Star-dust canvas behind the language carousel. The loop only runs while
/// the section is on screen.
pub struct ParticleRenderer {
    elements: ParticleElements,
    frame_loop: RefCell<Option<FrameLoop<ParticleTask>>>,
    resize_listener: RefCell<Option<EventListener>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
}

impl ParticleRenderer {
    pub fn new(elements: ParticleElements) -> Rc<Self> {
        Rc::new(Self {
            elements,
            frame_loop: RefCell::new(None),
            resize_listener: RefCell::new(None),
            observer: RefCell::new(None),
        })
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop
            .borrow()
            .as_ref()
            .is_some_and(|frame_loop| frame_loop.is_running())
    }

    pub fn particle_count(&self) -> usize {
        self.frame_loop
            .borrow()
            .as_ref()
            .map(|frame_loop| frame_loop.with_task(|task| task.field.particles().len()))
            .unwrap_or(0)
    }

    fn set_visible(&self, visible: bool) {
        let frame_loop = self.frame_loop.borrow();
        let Some(frame_loop) = frame_loop.as_ref() else {
            return;
        };
        if visible {
            frame_loop.start();
        } else {
            frame_loop.stop();
        }
    }

    fn build_task(&self) -> Result<ParticleTask, JsValue> {
        let context = self
            .elements
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let (width, height) = section_size(&self.elements.section);
        let canvas = self.elements.canvas.clone();
        canvas.set_width(width);
        canvas.set_height(height);
        let rng = StdRng::seed_from_u64((Math::random() * u64::MAX as f64) as u64);
        let task = ParticleTask {
            canvas,
            context,
            field: ParticleField::new(rng, f64::from(width), f64::from(height)),
        };
        Ok(task)
    }

    fn install_observer(self: &Rc<Self>) -> Result<(), JsValue> {
        let view = Rc::downgrade(self);
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, _observer: IntersectionObserver| {
                let Some(view) = view.upgrade() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    view.set_visible(entry.is_intersecting());
                }
            });
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        let section: &Element = self.elements.section.as_ref();
        observer.observe(section);
        *self.observer.borrow_mut() = Some((observer, callback));
        Ok(())
    }
}

impl PageComponent for ParticleRenderer {
    fn label(&self) -> &'static str {
        "particles"
    }

    fn attach(self: Rc<Self>) {
        let task = match self.build_task() {
            Ok(task) => task,
            Err(err) => {
                dom::warn_js("particles: canvas unavailable", &err);
                return;
            }
        };
        let frame_loop = FrameLoop::new(task);
        frame_loop.start();
        *self.frame_loop.borrow_mut() = Some(frame_loop);

        if let Some(window) = web_sys::window() {
            let view = Rc::downgrade(&self);
            let listener = EventListener::new(&window, "resize", move |_event| {
                let Some(view) = view.upgrade() else {
                    return;
                };
                if let Some(frame_loop) = view.frame_loop.borrow().as_ref() {
                    frame_loop.with_task(|task| task.fit_to(&view.elements.section));
                };
            });
            *self.resize_listener.borrow_mut() = Some(listener);
        }

        if let Err(err) = self.install_observer() {
            dom::warn_js("particles: visibility observer unavailable", &err);
        }
    }

    fn detach(&self) {
        if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.resize_listener.borrow_mut().take();
        self.frame_loop.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allhalal_web_core::PARTICLE_COUNT;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn build(document: &Document) -> (Element, ParticleElements) {
        let section = document.create_element("section").expect("create section");
        section.set_class_name("languages");
        section
            .set_attribute("style", "display:block;width:640px;height:320px;")
            .expect("size section");
        let canvas = document.create_element("canvas").expect("create canvas");
        canvas.set_class_name("languages-particles");
        section.append_child(&canvas).expect("append canvas");
        document
            .body()
            .expect("body available")
            .prepend_with_node_1(&section)
            .expect("insert section");
        let elements = ParticleElements {
            canvas: canvas.dyn_into().expect("canvas element"),
            section: section.clone().dyn_into().expect("section element"),
        };
        (section, elements)
    }

    #[wasm_bindgen_test(async)]
    async fn canvas_matches_section_and_pool_is_full() {
        let document = dom::document().expect("document available");
        let (section, elements) = build(&document);
        let renderer = ParticleRenderer::new(elements);
        Rc::clone(&renderer).attach();
        TimeoutFuture::new(100).await;
        assert_eq!(renderer.elements.canvas.width(), 640);
        assert_eq!(renderer.elements.canvas.height(), 320);
        assert_eq!(renderer.particle_count(), PARTICLE_COUNT);
        renderer.set_visible(false);
        assert!(!renderer.is_running());
        renderer.set_visible(true);
        assert!(renderer.is_running());
        renderer.detach();
        assert!(!renderer.is_running());
        section.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn loop_follows_section_visibility() {
        let document = dom::document().expect("document available");
        let (section, elements) = build(&document);
        let section_style = elements.section.style();
        section_style
            .set_property("position", "absolute")
            .expect("position section");
        section_style.set_property("top", "20000px").expect("move section away");
        let renderer = ParticleRenderer::new(elements);
        Rc::clone(&renderer).attach();

        TimeoutFuture::new(300).await;
        assert!(!renderer.is_running());

        section_style.set_property("top", "0px").expect("bring section back");
        TimeoutFuture::new(300).await;
        assert!(renderer.is_running());

        renderer.detach();
        section.remove();
    }
}

