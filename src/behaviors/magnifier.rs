use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

use crate::page::PageIdentity;
use crate::utils::dom::{
    add_class, client_point, closest_matching, event_target_element, page_point, px, set_style,
};
use crate::utils::fade::Fader;

pub const LENS_SIZE: f64 = 150.0;
pub const ZOOM_LEVEL: f64 = 2.0;
/// Text the lens picks up when hovered.
pub const MAGNIFIABLE: &str = ".about-hero p, .about-hero h1, .about-card p, .about-card h3";

/// Text rendering properties carried from the hovered element to its clone.
const COPIED_PROPERTIES: [&str; 9] = [
    "padding",
    "font-size",
    "font-family",
    "font-weight",
    "color",
    "line-height",
    "letter-spacing",
    "text-align",
    "white-space",
];

/// Top-left corner of the lens so that it is centred on the pointer.
pub fn lens_origin(page_x: f64, page_y: f64) -> (f64, f64) {
    (page_x - LENS_SIZE / 2.0, page_y - LENS_SIZE / 2.0)
}

/// Position of the zoomed clone inside the lens that keeps the point at
/// (`local_x`, `local_y`) of the original under the lens centre.
pub fn clone_offset(local_x: f64, local_y: f64) -> (f64, f64) {
    (
        LENS_SIZE / 2.0 - local_x * ZOOM_LEVEL,
        LENS_SIZE / 2.0 - local_y * ZOOM_LEVEL,
    )
}

struct Lens {
    window: Window,
    document: Document,
    body: Element,
    fader: RefCell<Option<Rc<Fader>>>,
}

impl Lens {
    fn fader(&self) -> Option<Rc<Fader>> {
        if let Some(fader) = self.fader.borrow().as_ref() {
            return Some(fader.clone());
        }
        let lens = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        add_class(&lens, "magnifier-lens");
        if self.body.append_child(&lens).is_err() {
            warn!("could not attach magnifier lens");
            return None;
        }
        let fader = Rc::new(Fader::new(lens));
        *self.fader.borrow_mut() = Some(fader.clone());
        Some(fader)
    }

    fn on_pointer_move(&self, event: &MouseEvent) {
        let source = event_target_element(event)
            .and_then(|target| closest_matching(&target, MAGNIFIABLE, Some(&self.body)));

        match source {
            Some(source) => self.magnify(&source, event),
            None => {
                if let Some(fader) = self.fader.borrow().as_ref() {
                    fader.fade_out();
                }
            }
        }
    }

    fn magnify(&self, source: &Element, event: &MouseEvent) {
        let Some(fader) = self.fader() else { return };
        let lens = fader.element();
        fader.show("block");

        let (page_x, page_y) = page_point(event);
        let (left, top) = lens_origin(page_x, page_y);
        set_style(lens, "left", &px(left));
        set_style(lens, "top", &px(top));

        let rect = source.get_bounding_client_rect();
        let (client_x, client_y) = client_point(event);
        let local_x = client_x - rect.left();
        let local_y = client_y - rect.top();

        let Some(clone) = source
            .clone_node_with_deep(true)
            .ok()
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        lens.set_inner_html("");
        if lens.append_child(&clone).is_err() {
            return;
        }

        set_style(&clone, "position", "absolute");
        set_style(&clone, "margin", "0");
        set_style(&clone, "width", &px(rect.width()));
        if let Ok(Some(computed)) = self.window.get_computed_style(source) {
            for property in COPIED_PROPERTIES {
                let value = computed.get_property_value(property).unwrap_or_default();
                set_style(&clone, property, &value);
            }
        }
        set_style(&clone, "transform", &format!("scale({})", ZOOM_LEVEL));
        set_style(&clone, "transform-origin", "top left");

        let (offset_x, offset_y) = clone_offset(local_x, local_y);
        set_style(&clone, "left", &px(offset_x));
        set_style(&clone, "top", &px(offset_y));
    }
}

/// Magnifying lens over the about page's text. The lens element is created
/// the first time qualifying text is hovered and only ever hidden after
/// that.
pub struct Magnifier {
    lens: Rc<Lens>,
    _listener: EventListener,
}

impl Magnifier {
    pub fn attach(window: &Window, document: &Document, page: PageIdentity) -> Option<Self> {
        if page != PageIdentity::About {
            return None;
        }
        document.query_selector(".about-hero").ok().flatten()?;
        let body: Element = document.body()?.into();

        let lens = Rc::new(Lens {
            window: window.clone(),
            document: document.clone(),
            body,
            fader: RefCell::new(None),
        });

        let listener = {
            let lens = lens.clone();
            EventListener::new(document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    lens.on_pointer_move(event);
                }
            })
        };

        debug!("magnifier attached");
        Some(Self {
            lens,
            _listener: listener,
        })
    }

    pub fn lens_element(&self) -> Option<HtmlElement> {
        self.lens.fader.borrow().as_ref().map(|f| f.element().clone())
    }
}
