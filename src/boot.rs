use std::cell::Cell;
use std::rc::Rc;

use allhalal_web_core::chrome::CONSOLE_BANNER;
use allhalal_web_core::SiteConfig;
use gloo::events::EventListener;
use web_sys::Document;

use crate::app_runtime;
use crate::carousel::{Carousel, CarouselElements};
use crate::contact_form::{ContactForm, ContactFormElements};
use crate::counter::Counter;
use crate::dom;
use crate::page_chrome::{ChromeElements, PageChrome};
use crate::particles::{ParticleElements, ParticleRenderer};
use crate::runtime::{self, PageComponent};

thread_local! {
    static BOOTED: Cell<bool> = const { Cell::new(false) };
}

/// Mounts every page behavior once the document has been parsed.
pub(crate) fn boot() {
    let Some(document) = dom::document() else {
        gloo::console::warn!("boot: no document available");
        return;
    };
    if document.ready_state() != "loading" {
        mount_page(&document);
        return;
    }
    let ready = document.clone();
    EventListener::once(&document, "DOMContentLoaded", move |_event| {
        mount_page(&ready);
    })
    .forget();
}

fn mount_page(document: &Document) {
    if BOOTED.with(|booted| booted.replace(true)) {
        return;
    }
    let config = app_runtime::site_config();
    print_banner();

    for component in components(document, &config) {
        runtime::mount(component);
    }
}

fn components(document: &Document, config: &SiteConfig) -> Vec<Rc<dyn PageComponent>> {
    let mut components: Vec<Rc<dyn PageComponent>> = Vec::new();
    if let Some(counter) = Counter::find(document).and_then(|element| Counter::new(element, config))
    {
        components.push(counter);
    }
    if let Some(elements) = ContactFormElements::find(document) {
        components.push(ContactForm::new(elements, config));
    }
    if config.carousel_enabled {
        if let Some(elements) = CarouselElements::find(document) {
            components.push(Carousel::new(elements));
        }
    }
    if config.particles_enabled {
        if let Some(elements) = ParticleElements::find(document) {
            components.push(ParticleRenderer::new(elements));
        }
    }
    components.push(PageChrome::new(document.clone(), ChromeElements::find(document)));
    components
}

fn print_banner() {
    for (text, css) in CONSOLE_BANNER {
        gloo::console::log!(text, css);
    }
}
