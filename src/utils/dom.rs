//! Small helpers over `web_sys` shared by the behavior units.

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Node};

/// Walks from `start` up through its ancestors and returns the first element
/// accepted by `predicate`. The walk stops before `boundary` (exclusive), so
/// passing `document.body` keeps `<body>` itself out of the search.
pub fn closest_where<F>(start: &Element, boundary: Option<&Element>, predicate: F) -> Option<Element>
where
    F: Fn(&Element) -> bool,
{
    let mut current = Some(start.clone());
    while let Some(element) = current {
        if boundary.map_or(false, |b| b.is_same_node(Some(&element))) {
            return None;
        }
        if predicate(&element) {
            return Some(element);
        }
        current = element.parent_element();
    }
    None
}

/// [`closest_where`] with a CSS selector as the predicate. An invalid
/// selector matches nothing.
pub fn closest_matching(start: &Element, selector: &str, boundary: Option<&Element>) -> Option<Element> {
    closest_where(start, boundary, |element| element.matches(selector).unwrap_or(false))
}

/// The element an event was dispatched to. Text nodes resolve to their
/// parent element.
pub fn event_target_element(event: &Event) -> Option<Element> {
    let target = event.target()?;
    match target.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(target) => target.dyn_ref::<Node>().and_then(|node| node.parent_element()),
    }
}

fn coordinate(event: &MouseEvent, key: &str, fallback: i32) -> f64 {
    js_sys::Reflect::get(event, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(fallback as f64)
}

/// Pointer position relative to the viewport. Reads the raw JS numbers so
/// browsers that report fractional coordinates keep the sub-pixel part.
pub fn client_point(event: &MouseEvent) -> (f64, f64) {
    (
        coordinate(event, "clientX", event.client_x()),
        coordinate(event, "clientY", event.client_y()),
    )
}

/// Pointer position relative to the document, see [`client_point`].
pub fn page_point(event: &MouseEvent) -> (f64, f64) {
    (
        coordinate(event, "pageX", event.page_x()),
        coordinate(event, "pageY", event.page_y()),
    )
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => {
            warn!("invalid selector {selector}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if element.style().set_property(property, value).is_err() {
        warn!("could not set {property} on <{}>", element.tag_name().to_lowercase());
    }
}

pub fn style_value(element: &HtmlElement, property: &str) -> String {
    element.style().get_property_value(property).unwrap_or_default()
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn toggle_class(element: &Element, class: &str) {
    let _ = element.class_list().toggle(class);
}

/// Formats a CSS pixel length the way the browser stringifies numbers.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}
