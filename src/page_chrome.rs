use std::cell::{Cell, RefCell};
use std::rc::Rc;

use allhalal_web_core::chrome::{
    anchor_scroll_top, in_page_anchor, nav_style_for_scroll, REVEAL_HIDDEN, REVEAL_ROOT_MARGIN,
    REVEAL_SELECTOR, REVEAL_SHOWN, REVEAL_THRESHOLD, REVEAL_TRANSITION,
};
use allhalal_web_core::MenuState;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

use crate::dom::{self, ACTIVE_CLASS};
use crate::runtime::PageComponent;

const MENU_TOGGLE_SELECTOR: &str = ".menu-toggle";
const NAV_LINKS_SELECTOR: &str = ".nav-links";
const NAV_CONTAINER_SELECTOR: &str = ".nav-container";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const FLOATING_NAV_SELECTOR: &str = ".floating-nav";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct ChromeElements {
    pub menu_toggle: Option<Element>,
    pub nav_links: Option<Element>,
    pub anchors: Vec<Element>,
    pub reveal_targets: Vec<Element>,
    pub floating_nav: Option<Element>,
}

impl ChromeElements {
    pub fn find(document: &Document) -> Self {
        Self {
            menu_toggle: dom::select_one(document, MENU_TOGGLE_SELECTOR),
            nav_links: dom::select_one(document, NAV_LINKS_SELECTOR),
            anchors: dom::select_all(document, ANCHOR_SELECTOR),
            reveal_targets: dom::select_all(document, REVEAL_SELECTOR),
            floating_nav: dom::select_one(document, FLOATING_NAV_SELECTOR),
        }
    }
}

/// Mobile menu, in-page smooth scrolling, reveal-on-scroll and the floating
/// nav backdrop.
pub struct PageChrome {
    document: Document,
    elements: ChromeElements,
    menu: Cell<MenuState>,
    listeners: RefCell<Vec<EventListener>>,
    reveal: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
}

impl PageChrome {
    pub fn new(document: Document, elements: ChromeElements) -> Rc<Self> {
        Rc::new(Self {
            document,
            elements,
            menu: Cell::new(MenuState::default()),
            listeners: RefCell::new(Vec::new()),
            reveal: RefCell::new(None),
        })
    }

    pub fn menu_open(&self) -> bool {
        self.menu.get().is_open()
    }

    pub fn toggle_menu(&self) {
        let mut menu = self.menu.get();
        menu.toggle();
        self.set_menu(menu);
    }

    pub fn close_menu(&self) {
        let mut menu = self.menu.get();
        menu.close();
        self.set_menu(menu);
    }

    fn set_menu(&self, menu: MenuState) {
        self.menu.set(menu);
        let open = menu.is_open();
        for element in [&self.elements.menu_toggle, &self.elements.nav_links]
            .into_iter()
            .flatten()
        {
            if let Err(err) = element.class_list().toggle_with_force(ACTIVE_CLASS, open) {
                dom::warn_js("page chrome: menu class update failed", &err);
            }
        }
    }

    /// Restyles the floating nav for the current scroll offset.
    pub fn update_nav(&self) {
        let Some(nav) = self.elements.floating_nav.as_ref() else {
            return;
        };
        let page_y = web_sys::window()
            .and_then(|window| window.scroll_y().ok())
            .unwrap_or(0.0);
        let style = nav_style_for_scroll(page_y);
        let result = dom::set_styles(
            nav,
            &[("background", style.background), ("box-shadow", style.box_shadow)],
        );
        if let Err(err) = result {
            dom::warn_js("page chrome: nav style update failed", &err);
        }
    }

    /// Smooth-scrolls to the element named by `href`. Returns `false` when
    /// `href` is not an in-page anchor or names nothing on the page.
    pub fn scroll_to_anchor(&self, href: &str) -> bool {
        let Some(selector) = in_page_anchor(href) else {
            return false;
        };
        let Some(target) = self.document.query_selector(selector).ok().flatten() else {
            return false;
        };
        let Some(window) = web_sys::window() else {
            return false;
        };
        let page_y = window.scroll_y().unwrap_or(0.0);
        let top = anchor_scroll_top(target.get_bounding_client_rect().top(), page_y);
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
        self.close_menu();
        true
    }

    fn install_menu(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let Some(toggle) = self.elements.menu_toggle.as_ref() else {
            return;
        };
        let view = Rc::downgrade(self);
        listeners.push(EventListener::new(toggle, "click", move |_event| {
            if let Some(view) = view.upgrade() {
                view.toggle_menu();
            }
        }));

        let view = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.document, "click", move |event| {
            let Some(view) = view.upgrade() else {
                return;
            };
            if !event_inside(event, NAV_CONTAINER_SELECTOR) {
                view.close_menu();
            }
        }));
    }

    fn install_anchors(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        for anchor in &self.elements.anchors {
            let view = Rc::downgrade(self);
            let link = anchor.clone();
            let listener = EventListener::new_with_options(
                anchor,
                "click",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    let href = link.get_attribute("href").unwrap_or_default();
                    if in_page_anchor(&href).is_none() {
                        return;
                    }
                    event.prevent_default();
                    if let Some(view) = view.upgrade() {
                        view.scroll_to_anchor(&href);
                    }
                },
            );
            listeners.push(listener);
        }
    }

    fn install_nav(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        if self.elements.floating_nav.is_none() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let view = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "scroll", move |_event| {
            if let Some(view) = view.upgrade() {
                view.update_nav();
            }
        }));
        self.update_nav();
    }

    fn install_reveal(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.elements.reveal_targets.is_empty() {
            return Ok(());
        }
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if let Err(err) = reveal(&target, true) {
                        dom::warn_js("page chrome: reveal failed", &err);
                    }
                    observer.unobserve(&target);
                }
            });
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for target in &self.elements.reveal_targets {
            reveal(target, false)?;
            dom::set_style(target, "transition", REVEAL_TRANSITION)?;
            observer.observe(target);
        }
        *self.reveal.borrow_mut() = Some((observer, callback));
        Ok(())
    }
}

fn reveal(target: &Element, shown: bool) -> Result<(), JsValue> {
    let style = if shown { REVEAL_SHOWN } else { REVEAL_HIDDEN };
    dom::set_styles(
        target,
        &[("opacity", style.opacity), ("transform", style.transform)],
    )
}

fn event_inside(event: &Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}

impl PageComponent for PageChrome {
    fn label(&self) -> &'static str {
        "page chrome"
    }

    fn attach(self: Rc<Self>) {
        let mut listeners = Vec::new();
        self.install_menu(&mut listeners);
        self.install_anchors(&mut listeners);
        self.install_nav(&mut listeners);
        *self.listeners.borrow_mut() = listeners;
        if let Err(err) = self.install_reveal() {
            dom::warn_js("page chrome: reveal observer unavailable", &err);
        }
    }

    fn detach(&self) {
        self.listeners.borrow_mut().clear();
        if let Some((observer, _callback)) = self.reveal.borrow_mut().take() {
            observer.disconnect();
        }
    }
}
