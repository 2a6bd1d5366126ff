use allhalal_web_core::Span;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

pub(crate) const ACTIVE_CLASS: &str = "active";

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub(crate) fn select_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn set_style(element: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return Ok(());
    };
    element.style().set_property(property, value)
}

pub(crate) fn set_styles(element: &Element, properties: &[(&str, &str)]) -> Result<(), JsValue> {
    for (property, value) in properties {
        set_style(element, property, value)?;
    }
    Ok(())
}

pub(crate) fn span_of(element: &Element) -> Span {
    let rect = element.get_bounding_client_rect();
    Span::new(rect.left(), rect.width())
}

pub(crate) fn warn_js(context: &str, err: &JsValue) {
    gloo::console::warn!(format!("{context}: {err:?}"));
}
