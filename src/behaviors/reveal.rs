use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::utils::dom::{add_class, query_all};

pub const VISIBLE_CLASS: &str = "visible";
const ANIMATED: &str = ".animate-in";
const HERO_ANIMATED: &str = ".hero .animate-in";
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const HERO_STAGGER_MS: u32 = 100;

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Marks an element as shown. Nothing ever takes the class off again.
pub fn reveal(element: &Element) {
    add_class(element, VISIBLE_CLASS);
}

pub fn hero_delay(index: usize) -> u32 {
    HERO_STAGGER_MS.saturating_mul(index as u32)
}

/// Reveals the hero's animated elements one after another.
pub fn stage_hero(document: &Document) {
    for (index, element) in query_all(document, HERO_ANIMATED).into_iter().enumerate() {
        Timeout::new(hero_delay(index), move || reveal(&element)).forget();
    }
}

/// Reveals `.animate-in` elements as they scroll into view, and staggers the
/// hero section in once the page has loaded.
pub struct RevealAnimator {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
    _on_load: Option<EventListener>,
}

impl RevealAnimator {
    pub fn attach(window: &Window, document: &Document) -> Option<Self> {
        let elements = query_all(document, ANIMATED);
        if elements.is_empty() {
            return None;
        }

        let callback: EntriesCallback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        reveal(&target);
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        init.set_root_margin(REVEAL_ROOT_MARGIN);

        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("reveal observer unavailable: {:?}", e);
                return None;
            }
        };
        for element in &elements {
            observer.observe(element);
        }

        let on_load = if document.ready_state() == "complete" {
            stage_hero(document);
            None
        } else {
            let document = document.clone();
            Some(EventListener::once(window, "load", move |_| stage_hero(&document)))
        };

        debug!("observing {} animated elements", elements.len());
        Some(Self {
            observer,
            _callback: callback,
            _on_load: on_load,
        })
    }
}

impl Drop for RevealAnimator {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
