use std::cell::Cell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::utils::debounce::Debounce;
use crate::utils::dom::{
    add_class, closest_matching, event_target_element, has_class, html_by_id, query_all, remove_class,
    toggle_class,
};

/// Space left between the fixed navbar and a scrolled-to section.
pub const NAV_GUTTER: f64 = 20.0;
/// Vertical offset past which the navbar switches to its compact look.
pub const SCROLLED_THRESHOLD: f64 = 100.0;
const SCROLL_SETTLE_MS: u32 = 10;

const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";
const MENU_OPEN_CLASS: &str = "menu-open";

/// Document offset to scroll to so that a section starting at
/// `element_top` (viewport relative) lands just below the navbar.
pub fn scroll_target(element_top: f64, scroll_offset: f64, nav_height: f64) -> f64 {
    element_top + scroll_offset - nav_height - NAV_GUTTER
}

pub fn is_scrolled(offset: f64) -> bool {
    offset > SCROLLED_THRESHOLD
}

/// The mobile menu's three flags. They are always flipped together, so they
/// stay in step without being derived from each other.
struct MobileMenu {
    navbar: Element,
    panel: Element,
    toggle: Option<Element>,
}

impl MobileMenu {
    fn is_open(&self) -> bool {
        has_class(&self.panel, ACTIVE_CLASS)
    }

    fn toggle(&self) {
        toggle_class(&self.panel, ACTIVE_CLASS);
        if let Some(toggle) = &self.toggle {
            toggle_class(toggle, ACTIVE_CLASS);
        }
        toggle_class(&self.navbar, MENU_OPEN_CLASS);
    }

    fn close(&self) {
        remove_class(&self.panel, ACTIVE_CLASS);
        if let Some(toggle) = &self.toggle {
            remove_class(toggle, ACTIVE_CLASS);
        }
        remove_class(&self.navbar, MENU_OPEN_CLASS);
    }
}

struct NavState {
    window: Window,
    document: Document,
    navbar: HtmlElement,
    menu: Option<MobileMenu>,
    last_scroll_top: Cell<f64>,
    settle: Debounce,
}

impl NavState {
    fn scroll_to_anchor(&self, href: &str) {
        let id = href.trim_start_matches('#');
        if id.is_empty() {
            return;
        }
        let Some(target) = self.document.get_element_by_id(id) else {
            debug!("no section for anchor {href}");
            return;
        };

        let offset = self.window.scroll_y().unwrap_or(0.0);
        let top = scroll_target(
            target.get_bounding_client_rect().top(),
            offset,
            self.navbar.offset_height() as f64,
        );

        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);

        if let Some(menu) = &self.menu {
            if menu.is_open() {
                menu.close();
            }
        }
    }

    fn apply_scroll_state(&self) {
        let top = self.window.scroll_y().unwrap_or(0.0);
        if is_scrolled(top) {
            add_class(&self.navbar, SCROLLED_CLASS);
        } else {
            remove_class(&self.navbar, SCROLLED_CLASS);
        }
        self.last_scroll_top.set(top);
    }

    fn dismiss_on_outside_click(&self, event: &Event) {
        let Some(menu) = &self.menu else { return };
        let inside = event_target_element(event)
            .and_then(|target| closest_matching(&target, ".navbar", None))
            .is_some();
        if !inside && menu.is_open() {
            menu.close();
        }
    }
}

/// Smooth anchor scrolling, the sticky navbar look and the mobile menu.
pub struct Navigation {
    state: Rc<NavState>,
    _listeners: Vec<EventListener>,
}

impl Navigation {
    /// Needs `#navbar`. The mobile menu parts are optional; without
    /// `#nav-links` there is no menu to open or dismiss.
    pub fn attach(window: &Window, document: &Document) -> Option<Self> {
        let navbar = html_by_id(document, "navbar")?;
        let menu = document.get_element_by_id("nav-links").map(|panel| MobileMenu {
            navbar: navbar.clone().unchecked_into(),
            panel,
            toggle: document.get_element_by_id("mobile-toggle"),
        });

        let state = Rc::new(NavState {
            window: window.clone(),
            document: document.clone(),
            navbar,
            menu,
            last_scroll_top: Cell::new(0.0),
            settle: Debounce::new(SCROLL_SETTLE_MS),
        });

        let mut listeners = Vec::new();

        for anchor in query_all(document, "a[href^=\"#\"]") {
            let state = state.clone();
            let href_source = anchor.clone();
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Some(href) = href_source.get_attribute("href") {
                        state.scroll_to_anchor(&href);
                    }
                },
            ));
        }

        {
            let state = state.clone();
            // Passive by default, so the listener never holds up scrolling.
            listeners.push(EventListener::new(window, "scroll", move |_| {
                let settled = state.clone();
                state.settle.call(move || settled.apply_scroll_state());
            }));
        }

        if let Some(toggle) = state.menu.as_ref().and_then(|menu| menu.toggle.clone()) {
            let state = state.clone();
            listeners.push(EventListener::new(&toggle, "click", move |_| {
                if let Some(menu) = &state.menu {
                    menu.toggle();
                }
            }));
        }

        if state.menu.is_some() {
            let state = state.clone();
            listeners.push(EventListener::new(document, "click", move |event| {
                state.dismiss_on_outside_click(event);
            }));
        }

        debug!("navigation attached ({} listeners)", listeners.len());
        Some(Self {
            state,
            _listeners: listeners,
        })
    }

    pub fn is_menu_open(&self) -> bool {
        self.state.menu.as_ref().map_or(false, MobileMenu::is_open)
    }

    /// Offset recorded by the last settled scroll event.
    pub fn last_scroll_top(&self) -> f64 {
        self.state.last_scroll_top.get()
    }
}
