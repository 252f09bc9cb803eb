use gloo_events::EventListener;
use log::{debug, warn};
use web_sys::{Document, ScrollRestoration, Window};

use crate::config::CONTACT_EMAIL;

const BANNER_STYLE: &str = "font-size: 20px; font-weight: bold; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); -webkit-background-clip: text; -webkit-text-fill-color: transparent;";
const CONTACT_STYLE: &str = "font-size: 14px; color: #6B6B6B;";

pub fn print_welcome() {
    gloo_console::log!("%c👋 Welcome to IKSH AI!", BANNER_STYLE);
    gloo_console::log!(
        format!("%cInterested in our AI solutions? Visit us at: {}", CONTACT_EMAIL),
        CONTACT_STYLE
    );
}

/// Runs `f` once the document has been parsed.
pub fn when_dom_ready<F>(document: &Document, f: F)
where
    F: FnOnce() + 'static,
{
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| f()).forget();
    } else {
        f();
    }
}

/// Every visit starts at the top of the page: the browser does not restore
/// the old scroll position, and leaving the page rewinds it first.
pub struct ScrollReset {
    _before_unload: EventListener,
}

impl ScrollReset {
    pub fn attach(window: &Window) -> Self {
        match window.history() {
            Ok(history) => {
                if history.set_scroll_restoration(ScrollRestoration::Manual).is_err() {
                    warn!("scroll restoration not supported");
                }
            }
            Err(_) => debug!("no history object"),
        }

        let target = window.clone();
        let before_unload = EventListener::new(window, "beforeunload", move |_| {
            target.scroll_to_with_x_and_y(0.0, 0.0);
        });
        Self {
            _before_unload: before_unload,
        }
    }

    pub fn forget(self) {
        self._before_unload.forget();
    }
}
