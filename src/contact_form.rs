use std::cell::{Cell, RefCell};
use std::rc::Rc;

use allhalal_web_core::form::{SENDING_LABEL_HTML, ERROR_BORDER_COLOR, VALID_BORDER_COLOR};
use allhalal_web_core::{
    CharacterCount, ContactField, ContactSubmission, FieldError, FormState, SiteConfig,
    SubmitError,
};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use js_sys::Date;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::dom::{self, ACTIVE_CLASS};
use crate::runtime::PageComponent;

const FORM_ID: &str = "contactForm";
const SUCCESS_ID: &str = "formSuccess";
const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";
const FORM_GROUP_SELECTOR: &str = ".form-group";
const GROUP_CONTROL_SELECTOR: &str = "input, select, textarea";
const CHAR_COUNTER_CSS: &str =
    "text-align: right; color: #6C6C70; font-size: 0.875rem; margin-top: 4px;";

enum FieldControl {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
}

impl FieldControl {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Self::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlSelectElement>() {
            Ok(select) => return Some(Self::Select(select)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlTextAreaElement>().ok().map(Self::TextArea)
    }

    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::Select(select) => select.value(),
            Self::TextArea(area) => area.value(),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Self::Input(input) => input.as_ref(),
            Self::Select(select) => select.as_ref(),
            Self::TextArea(area) => area.as_ref(),
        }
    }
}

struct FieldElements {
    control: FieldControl,
    error: Element,
}

pub struct ContactFormElements {
    pub form: HtmlFormElement,
    pub success: Element,
    pub submit: HtmlButtonElement,
    fields: Vec<FieldElements>,
}

impl ContactFormElements {
    /// `None` when the page has no contact form. A form with missing parts is
    /// reported and left alone.
    pub fn find(document: &Document) -> Option<Self> {
        let form = dom::by_id::<HtmlFormElement>(document, FORM_ID)?;
        match Self::collect(document, form) {
            Ok(elements) => Some(elements),
            Err(missing) => {
                gloo::console::warn!(format!("contact form: missing {missing}"));
                None
            }
        }
    }

    fn collect(document: &Document, form: HtmlFormElement) -> Result<Self, String> {
        let success = document
            .get_element_by_id(SUCCESS_ID)
            .ok_or_else(|| format!("#{SUCCESS_ID}"))?;
        let submit = form
            .query_selector(SUBMIT_SELECTOR)
            .ok()
            .flatten()
            .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok())
            .ok_or_else(|| SUBMIT_SELECTOR.to_string())?;
        let mut fields = Vec::with_capacity(ContactField::ALL.len());
        for field in ContactField::ALL {
            let control = document
                .get_element_by_id(field.input_id())
                .and_then(FieldControl::from_element)
                .ok_or_else(|| format!("#{}", field.input_id()))?;
            let error = document
                .get_element_by_id(field.error_id())
                .ok_or_else(|| format!("#{}", field.error_id()))?;
            fields.push(FieldElements { control, error });
        }
        Ok(Self {
            form,
            success,
            submit,
            fields,
        })
    }

    fn field(&self, field: ContactField) -> &FieldElements {
        let idx = ContactField::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or_default();
        &self.fields[idx]
    }
}

/// Delivers a validated submission. Futures run on the page's local executor.
#[allow(async_fn_in_trait)]
pub trait ContactTransport {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), SubmitError>;
}

/// Stand-in for the contact backend: waits, logs the payload and succeeds.
#[derive(Clone, Copy, Debug)]
pub struct MockTransport {
    delay_ms: u32,
}

impl MockTransport {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl ContactTransport for MockTransport {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), SubmitError> {
        let body = submission
            .to_json()
            .map_err(|err| SubmitError::Unavailable(err.to_string()))?;
        TimeoutFuture::new(self.delay_ms).await;
        gloo::console::log!("Form submitted:", body);
        Ok(())
    }
}

pub struct ContactForm<T = MockTransport> {
    elements: ContactFormElements,
    transport: T,
    success_hide_ms: u32,
    state: RefCell<FormState>,
    char_counter: RefCell<Option<Element>>,
    listeners: RefCell<Vec<EventListener>>,
    hide_timer: RefCell<Option<Timeout>>,
    submitting: Cell<bool>,
}

impl ContactForm {
    pub fn new(elements: ContactFormElements, config: &SiteConfig) -> Rc<Self> {
        Self::with_transport(elements, MockTransport::new(config.submit_delay_ms), config)
    }
}

impl<T: ContactTransport + 'static> ContactForm<T> {
    pub fn with_transport(
        elements: ContactFormElements,
        transport: T,
        config: &SiteConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            elements,
            transport,
            success_hide_ms: config.success_hide_ms,
            state: RefCell::new(FormState::new()),
            char_counter: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            hide_timer: RefCell::new(None),
            submitting: Cell::new(false),
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    fn sync_value(&self, field: ContactField) {
        let value = self.elements.field(field).control.value();
        self.state.borrow_mut().set_value(field, value);
    }

    /// Validates one field and updates its inline error.
    pub fn validate_field(&self, field: ContactField) -> bool {
        self.sync_value(field);
        let result = self.state.borrow_mut().validate(field);
        self.render_field(field, result);
        result.is_ok()
    }

    fn revalidate_if_showing(&self, field: ContactField) {
        self.sync_value(field);
        let result = self.state.borrow_mut().revalidate_if_showing(field);
        if let Some(result) = result {
            self.render_field(field, result);
        }
    }

    fn render_field(&self, field: ContactField, result: Result<(), FieldError>) {
        let elements = self.elements.field(field);
        let rendered = match result {
            Err(err) => show_error(elements, &err.to_string()),
            Ok(()) => hide_error(elements),
        };
        if let Err(err) = rendered {
            dom::warn_js("contact form: error display failed", &err);
        }
    }

    /// Runs every validator; returns the field that should take focus.
    pub fn validate_all(&self) -> Option<ContactField> {
        for field in ContactField::ALL {
            self.sync_value(field);
        }
        let first_invalid = self.state.borrow_mut().validate_all();
        for field in ContactField::ALL {
            let result = match self.state.borrow().error(field) {
                Some(err) => Err(err),
                None => Ok(()),
            };
            self.render_field(field, result);
        }
        first_invalid
    }

    fn update_character_count(&self) {
        let counter = self.char_counter.borrow();
        let Some(counter) = counter.as_ref() else {
            return;
        };
        let value = self.elements.field(ContactField::Message).control.value();
        let count = CharacterCount::of(&value);
        counter.set_text_content(Some(&count.label()));
        if let Err(err) = dom::set_style(counter, "color", count.color()) {
            dom::warn_js("contact form: character count style failed", &err);
        }
    }

    fn install_character_count(&self) -> Result<(), JsValue> {
        let message = self.elements.field(ContactField::Message).control.element();
        let Some(parent) = message.parent_node() else {
            return Ok(());
        };
        let Some(document) = message.owner_document() else {
            return Ok(());
        };
        let counter = document.create_element("div")?;
        counter.set_attribute("style", CHAR_COUNTER_CSS)?;
        parent.append_child(&counter)?;
        *self.char_counter.borrow_mut() = Some(counter);
        self.update_character_count();
        Ok(())
    }

    fn associate_labels(&self) -> Result<(), JsValue> {
        let groups = self.elements.form.query_selector_all(FORM_GROUP_SELECTOR)?;
        for group in dom::elements(groups) {
            let label = group.query_selector("label")?;
            let control = group.query_selector(GROUP_CONTROL_SELECTOR)?;
            let (Some(label), Some(control)) = (label, control) else {
                continue;
            };
            if control.has_attribute("aria-labelledby") {
                continue;
            }
            let label_id = if label.id().is_empty() {
                format!("label-{}", control.id())
            } else {
                label.id()
            };
            label.set_id(&label_id);
            control.set_attribute("aria-labelledby", &label_id)?;
        }
        Ok(())
    }

    fn handle_submit(self: &Rc<Self>) {
        if self.submitting.get() {
            return;
        }
        if let Some(field) = self.validate_all() {
            let control = self.elements.field(field).control.element();
            if let Err(err) = control.focus() {
                dom::warn_js("contact form: focus failed", &err);
            }
            return;
        }
        self.submitting.set(true);
        let submit = &self.elements.submit;
        let original_label = submit.inner_html();
        submit.set_disabled(true);
        submit.set_inner_html(SENDING_LABEL_HTML);

        let form = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            form.send(original_label).await;
        });
    }

    async fn send(self: Rc<Self>, original_label: String) {
        let submit = &self.elements.submit;
        let timestamp = String::from(Date::new_0().to_iso_string());
        let submission = self.state.borrow().submission(timestamp);
        let result = self.transport.send(&submission).await;

        match result {
            Ok(()) => self.show_success(),
            Err(err) => gloo::console::warn!(format!("contact form: {err}")),
        }
        submit.set_disabled(false);
        submit.set_inner_html(&original_label);
        self.submitting.set(false);
    }

    fn show_success(&self) {
        let success = self.elements.success.clone();
        if let Err(err) = success.class_list().add_1(ACTIVE_CLASS) {
            dom::warn_js("contact form: success banner failed", &err);
        }
        self.elements.form.reset();
        self.state.borrow_mut().reset();
        self.update_character_count();

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        success.scroll_into_view_with_scroll_into_view_options(&options);

        let timer = Timeout::new(self.success_hide_ms, move || {
            if let Err(err) = success.class_list().remove_1(ACTIVE_CLASS) {
                dom::warn_js("contact form: success banner failed", &err);
            }
        });
        *self.hide_timer.borrow_mut() = Some(timer);
    }

    fn install_listeners(self: &Rc<Self>) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        for field in ContactField::ALL {
            let target = self.elements.field(field).control.element().clone();

            let view = Rc::downgrade(self);
            listeners.push(EventListener::new(&target, "blur", move |_event| {
                if let Some(view) = view.upgrade() {
                    view.validate_field(field);
                }
            }));

            let view = Rc::downgrade(self);
            listeners.push(EventListener::new(&target, field.live_event(), move |_event| {
                if let Some(view) = view.upgrade() {
                    view.revalidate_if_showing(field);
                }
            }));
        }

        let message = self.elements.field(ContactField::Message).control.element();
        let view = Rc::downgrade(self);
        listeners.push(EventListener::new(message, "input", move |_event| {
            if let Some(view) = view.upgrade() {
                view.update_character_count();
            }
        }));

        let view = Rc::downgrade(self);
        listeners.push(EventListener::new_with_options(
            &self.elements.form,
            "submit",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                event.prevent_default();
                if let Some(view) = view.upgrade() {
                    view.handle_submit();
                }
            },
        ));
        listeners
    }
}

fn show_error(elements: &FieldElements, message: &str) -> Result<(), JsValue> {
    let control = elements.control.element();
    control.style().set_property("border-color", ERROR_BORDER_COLOR)?;
    elements.error.set_text_content(Some(message));
    elements.error.class_list().add_1(ACTIVE_CLASS)?;
    control.set_attribute("aria-invalid", "true")
}

fn hide_error(elements: &FieldElements) -> Result<(), JsValue> {
    let control = elements.control.element();
    control.style().set_property("border-color", VALID_BORDER_COLOR)?;
    elements.error.class_list().remove_1(ACTIVE_CLASS)?;
    control.set_attribute("aria-invalid", "false")
}

impl<T: ContactTransport + 'static> PageComponent for ContactForm<T> {
    fn label(&self) -> &'static str {
        "contact form"
    }

    fn attach(self: Rc<Self>) {
        if let Err(err) = self.associate_labels() {
            dom::warn_js("contact form: label association failed", &err);
        }
        if let Err(err) = self.install_character_count() {
            dom::warn_js("contact form: character count unavailable", &err);
        }
        let listeners = self.install_listeners();
        *self.listeners.borrow_mut() = listeners;
    }

    fn detach(&self) {
        self.listeners.borrow_mut().clear();
        self.hide_timer.borrow_mut().take();
        if let Some(counter) = self.char_counter.borrow_mut().take() {
            counter.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"
        <form id="contactForm">
          <div class="form-group">
            <label>Name</label>
            <input id="name" type="text">
            <div id="nameError" class="error-message"></div>
          </div>
          <div class="form-group">
            <label>Email</label>
            <input id="email" type="text">
            <div id="emailError" class="error-message"></div>
          </div>
          <div class="form-group">
            <label>Subject</label>
            <select id="subject">
              <option value="">Choose</option>
              <option value="partnership">Partnership</option>
            </select>
            <div id="subjectError" class="error-message"></div>
          </div>
          <div class="form-group">
            <label>Message</label>
            <textarea id="message"></textarea>
            <div id="messageError" class="error-message"></div>
          </div>
          <button type="submit">Send Message</button>
        </form>
        <div id="formSuccess"></div>
    "#;

    fn mount_markup(document: &Document) -> Element {
        let root = document.create_element("div").expect("create root");
        root.set_inner_html(MARKUP);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append root");
        root
    }

    #[derive(Clone, Default)]
    struct ScriptedTransport {
        calls: Rc<Cell<u32>>,
        fail: bool,
    }

    impl ContactTransport for ScriptedTransport {
        async fn send(&self, _submission: &ContactSubmission) -> Result<(), SubmitError> {
            self.calls.set(self.calls.get() + 1);
            TimeoutFuture::new(20).await;
            if self.fail {
                Err(SubmitError::Unavailable("offline".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn attach_with<T: ContactTransport + 'static>(
        transport: T,
        config: &SiteConfig,
    ) -> (Element, Rc<ContactForm<T>>) {
        let document = dom::document().expect("document available");
        let root = mount_markup(&document);
        let elements = ContactFormElements::find(&document).expect("form markup");
        let form = ContactForm::with_transport(elements, transport, config);
        Rc::clone(&form).attach();
        (root, form)
    }

    fn attach(config: &SiteConfig) -> (Element, Rc<ContactForm>) {
        attach_with(MockTransport::new(config.submit_delay_ms), config)
    }

    fn fill_valid<T>(form: &ContactForm<T>) {
        set_value(form, ContactField::Name, "Amina Yusuf");
        set_value(form, ContactField::Email, "amina@example.com");
        set_value(form, ContactField::Subject, "partnership");
        set_value(form, ContactField::Message, "We would like to list our products.");
    }

    fn set_value<T>(form: &ContactForm<T>, field: ContactField, value: &str) {
        match &form.elements.field(field).control {
            FieldControl::Input(input) => input.set_value(value),
            FieldControl::Select(select) => select.set_value(value),
            FieldControl::TextArea(area) => area.set_value(value),
        }
    }

    fn fire<T>(form: &ContactForm<T>, field: ContactField, event: &str) {
        let event = Event::new(event).expect("create event");
        form.elements
            .field(field)
            .control
            .element()
            .dispatch_event(&event)
            .expect("dispatch event");
    }

    fn error_text<T>(form: &ContactForm<T>, field: ContactField) -> Option<String> {
        let error = &form.elements.field(field).error;
        error
            .class_list()
            .contains(ACTIVE_CLASS)
            .then(|| error.text_content().unwrap_or_default())
    }

    fn submit<T>(form: &ContactForm<T>) {
        let event = Event::new("submit").expect("create submit event");
        form.elements
            .form
            .dispatch_event(&event)
            .expect("dispatch submit");
    }

    fn cleanup<T: ContactTransport + 'static>(root: Element, form: &ContactForm<T>) {
        form.detach();
        root.remove();
    }

    #[wasm_bindgen_test]
    fn input_only_revalidates_after_an_error_is_shown() {
        let (root, form) = attach(&SiteConfig::default());
        set_value(&form, ContactField::Name, "A");
        fire(&form, ContactField::Name, "input");
        assert_eq!(error_text(&form, ContactField::Name), None);

        fire(&form, ContactField::Name, "blur");
        assert_eq!(
            error_text(&form, ContactField::Name).as_deref(),
            Some("Name must be at least 2 characters")
        );
        let name = form.elements.field(ContactField::Name).control.element();
        assert_eq!(name.get_attribute("aria-invalid").as_deref(), Some("true"));

        set_value(&form, ContactField::Name, "Al");
        fire(&form, ContactField::Name, "input");
        assert_eq!(error_text(&form, ContactField::Name), None);
        assert_eq!(name.get_attribute("aria-invalid").as_deref(), Some("false"));
        cleanup(root, &form);
    }

    #[wasm_bindgen_test]
    fn invalid_submit_focuses_first_invalid_field() {
        let (root, form) = attach(&SiteConfig::default());
        set_value(&form, ContactField::Name, "Amina");
        set_value(&form, ContactField::Email, "amina@example");
        submit(&form);

        assert_eq!(error_text(&form, ContactField::Name), None);
        assert_eq!(
            error_text(&form, ContactField::Email).as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            error_text(&form, ContactField::Subject).as_deref(),
            Some("Please select a subject")
        );
        assert!(error_text(&form, ContactField::Message).is_some());

        let document = dom::document().expect("document available");
        let focused = document.active_element().map(|element| element.id());
        assert_eq!(focused.as_deref(), Some("email"));
        assert!(!form.is_submitting());
        assert!(!form.elements.success.class_list().contains(ACTIVE_CLASS));
        cleanup(root, &form);
    }

    #[wasm_bindgen_test]
    fn labels_are_associated_and_counter_tracks_message() {
        let (root, form) = attach(&SiteConfig::default());
        let message = form.elements.field(ContactField::Message).control.element();
        let label_id = message.get_attribute("aria-labelledby").expect("labelled");
        let document = dom::document().expect("document available");
        let label = document.get_element_by_id(&label_id).expect("label present");
        assert_eq!(label.text_content().as_deref(), Some("Message"));

        set_value(&form, ContactField::Message, "Salaam");
        fire(&form, ContactField::Message, "input");
        let counter = form.char_counter.borrow().clone().expect("counter installed");
        assert_eq!(counter.text_content().as_deref(), Some("6 characters"));
        cleanup(root, &form);
        assert!(counter.parent_node().is_none());
    }

    #[wasm_bindgen_test(async)]
    async fn valid_submit_shows_banner_then_hides_it() {
        let config = SiteConfig {
            submit_delay_ms: 20,
            success_hide_ms: 80,
            ..SiteConfig::default()
        };
        let (root, form) = attach(&config);
        fill_valid(&form);
        submit(&form);

        TimeoutFuture::new(0).await;
        assert!(form.is_submitting());
        assert!(form.elements.submit.disabled());
        assert_eq!(form.elements.submit.inner_html(), SENDING_LABEL_HTML);

        TimeoutFuture::new(60).await;
        assert!(!form.is_submitting());
        assert!(!form.elements.submit.disabled());
        assert_eq!(form.elements.submit.inner_html(), "Send Message");
        assert!(form.elements.success.class_list().contains(ACTIVE_CLASS));
        for field in ContactField::ALL {
            assert_eq!(form.elements.field(field).control.value(), "");
        }
        let counter = form.char_counter.borrow().clone().expect("counter installed");
        assert_eq!(counter.text_content().as_deref(), Some("0 characters"));

        TimeoutFuture::new(120).await;
        assert!(!form.elements.success.class_list().contains(ACTIVE_CLASS));
        cleanup(root, &form);
    }

    #[wasm_bindgen_test(async)]
    async fn failed_send_keeps_values_and_restores_button() {
        let transport = ScriptedTransport {
            fail: true,
            ..ScriptedTransport::default()
        };
        let calls = Rc::clone(&transport.calls);
        let (root, form) = attach_with(transport, &SiteConfig::default());
        fill_valid(&form);
        submit(&form);
        assert!(form.elements.submit.disabled());

        TimeoutFuture::new(80).await;
        assert_eq!(calls.get(), 1);
        assert!(!form.is_submitting());
        assert!(!form.elements.submit.disabled());
        assert_eq!(form.elements.submit.inner_html(), "Send Message");
        assert!(!form.elements.success.class_list().contains(ACTIVE_CLASS));
        assert_eq!(
            form.elements.field(ContactField::Email).control.value(),
            "amina@example.com"
        );
        assert_eq!(
            form.elements.field(ContactField::Subject).control.value(),
            "partnership"
        );
        cleanup(root, &form);
    }

    #[wasm_bindgen_test(async)]
    async fn second_submit_while_sending_is_ignored() {
        let transport = ScriptedTransport::default();
        let calls = Rc::clone(&transport.calls);
        let (root, form) = attach_with(transport, &SiteConfig::default());
        fill_valid(&form);
        submit(&form);
        submit(&form);
        assert!(form.is_submitting());
        assert_eq!(form.elements.submit.inner_html(), SENDING_LABEL_HTML);

        TimeoutFuture::new(80).await;
        assert_eq!(calls.get(), 1);
        assert!(!form.elements.submit.disabled());
        assert_eq!(form.elements.submit.inner_html(), "Send Message");
        assert!(form.elements.success.class_list().contains(ACTIVE_CLASS));
        cleanup(root, &form);
    }
}
