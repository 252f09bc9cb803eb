use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Window};

use crate::config::EXPLORE_DESTINATION;
use crate::page::PageIdentity;
use crate::utils::dom::{add_class, client_point, closest_matching, event_target_element, px, set_style};
use crate::utils::fade::Fader;

/// Distance between the pointer and the popup's top-left corner.
pub const POPUP_OFFSET: (f64, f64) = (30.0, 30.0);
/// Hovering or clicking any of these leaves the popup out of the way.
pub const INTERACTIVE: &str = "a, button, .btn, [role=\"button\"]";

const POPUP_MARKUP: &str = r#"
        <div class="connect-content">
            <div class="connect-icon">▶ </div>
            <div class="connect-text"> EXPLORE MORE</div>
        </div>
    "#;

/// Where a click on `target` should take the visitor: nowhere for links and
/// buttons (they do their own thing), the explore page for anything else.
pub fn click_destination(target: Option<&Element>, boundary: Option<&Element>) -> Option<&'static str> {
    let interactive = target
        .and_then(|target| closest_matching(target, INTERACTIVE, boundary))
        .is_some();
    (!interactive).then_some(EXPLORE_DESTINATION)
}

pub fn popup_position(client_x: f64, client_y: f64) -> (f64, f64) {
    (client_x + POPUP_OFFSET.0, client_y + POPUP_OFFSET.1)
}

struct Popup {
    window: Window,
    document: Document,
    body: Element,
    fader: RefCell<Option<Rc<Fader>>>,
}

impl Popup {
    fn is_interactive(&self, event: &Event) -> bool {
        let target = event_target_element(event);
        click_destination(target.as_ref(), Some(&self.body)).is_none()
    }

    fn fader(&self) -> Option<Rc<Fader>> {
        if let Some(fader) = self.fader.borrow().as_ref() {
            return Some(fader.clone());
        }
        let popup = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        add_class(&popup, "connect-popup");
        popup.set_inner_html(POPUP_MARKUP);
        if self.body.append_child(&popup).is_err() {
            warn!("could not attach cursor popup");
            return None;
        }
        let fader = Rc::new(Fader::new(popup));
        *self.fader.borrow_mut() = Some(fader.clone());
        Some(fader)
    }

    fn follow(&self, event: &MouseEvent) {
        let Some(fader) = self.fader() else { return };
        let popup = fader.element();
        fader.show("flex");
        let (client_x, client_y) = client_point(event);
        let (left, top) = popup_position(client_x, client_y);
        set_style(popup, "left", &px(left));
        set_style(popup, "top", &px(top));
        set_style(popup, "transform", "scale(1)");
    }

    fn dismiss(&self, unconditionally: bool) {
        let Some(fader) = self.fader.borrow().as_ref().cloned() else { return };
        set_style(fader.element(), "transform", "scale(0.8)");
        if unconditionally {
            fader.fade_out_unconditionally();
        } else {
            fader.fade_out();
        }
    }

    fn on_pointer_move(&self, event: &MouseEvent) {
        if self.is_interactive(event) {
            self.dismiss(false);
        } else {
            self.follow(event);
        }
    }

    fn on_click(&self, event: &Event) {
        let target = event_target_element(event);
        let Some(destination) = click_destination(target.as_ref(), Some(&self.body)) else {
            return;
        };
        if self.window.location().set_href(destination).is_err() {
            warn!("could not navigate to {destination}");
        }
    }
}

/// "Explore more" badge that trails the pointer on the home page. A click
/// anywhere that is not a link or button opens the about page.
pub struct CursorPopup {
    popup: Rc<Popup>,
    _listeners: Vec<EventListener>,
}

impl CursorPopup {
    pub fn attach(window: &Window, document: &Document, page: PageIdentity) -> Option<Self> {
        if page != PageIdentity::Home {
            return None;
        }
        let body: Element = document.body()?.into();
        let root = document.document_element()?;

        let popup = Rc::new(Popup {
            window: window.clone(),
            document: document.clone(),
            body,
            fader: RefCell::new(None),
        });

        let mut listeners = Vec::new();
        {
            let popup = popup.clone();
            listeners.push(EventListener::new(document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    popup.on_pointer_move(event);
                }
            }));
        }
        {
            let popup = popup.clone();
            listeners.push(EventListener::new(document, "click", move |event| {
                popup.on_click(event);
            }));
        }
        {
            // `mouseleave` only fires on elements, so listen on <html>.
            let popup = popup.clone();
            listeners.push(EventListener::new(&root, "mouseleave", move |_| {
                popup.dismiss(true);
            }));
        }

        debug!("cursor popup attached");
        Some(Self {
            popup,
            _listeners: listeners,
        })
    }

    pub fn popup_element(&self) -> Option<HtmlElement> {
        self.popup.fader.borrow().as_ref().map(|f| f.element().clone())
    }
}
