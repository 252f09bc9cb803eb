use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::page::PageIdentity;
use crate::utils::dom::{add_class, query_all, remove_class};

pub const ACTIVE_CLASS: &str = "active";
/// Only the middle half of the strip counts as "centred".
const CENTER_MARGIN: &str = "0px -25% 0px -25%";
const CENTER_THRESHOLD: f64 = 0.5;
const INITIAL_INDEX: usize = 1;
const INITIAL_DELAY_MS: u32 = 100;

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Makes `target` the only active item.
pub fn activate(items: &[Element], target: &Element) {
    for item in items {
        remove_class(item, ACTIVE_CLASS);
    }
    add_class(target, ACTIVE_CLASS);
}

fn center_on(item: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_inline(ScrollLogicalPosition::Center);
    options.set_block(ScrollLogicalPosition::Nearest);
    item.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Tracks which `.service-item` sits in the middle of the horizontally
/// scrolling `.service-scroll-container` and marks it active.
pub struct ServiceSelector {
    observer: IntersectionObserver,
    items: Rc<Vec<Element>>,
    _callback: EntriesCallback,
    _initial: Option<Timeout>,
}

impl ServiceSelector {
    pub fn attach(document: &Document, page: PageIdentity) -> Option<Self> {
        let container = document.query_selector(".service-scroll-container").ok().flatten()?;
        let items = query_all(document, ".service-item");
        if items.is_empty() {
            return None;
        }
        let items = Rc::new(items);

        let callback: EntriesCallback = {
            let items = items.clone();
            Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                    if entry.is_intersecting() {
                        activate(&items, &entry.target());
                    }
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let init = IntersectionObserverInit::new();
        init.set_root(Some(container.unchecked_ref()));
        init.set_threshold(&JsValue::from_f64(CENTER_THRESHOLD));
        init.set_root_margin(CENTER_MARGIN);

        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("service observer unavailable: {:?}", e);
                return None;
            }
        };
        for item in items.iter() {
            observer.observe(item);
        }

        let initial = (page == PageIdentity::Services && items.len() > INITIAL_INDEX).then(|| {
            let item = items[INITIAL_INDEX].clone();
            Timeout::new(INITIAL_DELAY_MS, move || center_on(&item))
        });

        debug!("service selector watching {} items", items.len());
        Some(Self {
            observer,
            items,
            _callback: callback,
            _initial: initial,
        })
    }

    pub fn active_items(&self) -> Vec<Element> {
        self.items
            .iter()
            .filter(|item| item.class_list().contains(ACTIVE_CLASS))
            .cloned()
            .collect()
    }
}

impl Drop for ServiceSelector {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
