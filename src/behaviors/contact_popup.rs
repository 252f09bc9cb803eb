use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use web_sys::{Document, Element};

use crate::utils::dom::{add_class, has_class, query_all, remove_class};

const HIDDEN_CLASS: &str = "hidden";
const TRIGGERS: &str = ".about-message-button, #contactTrigger";

struct Card {
    card: Element,
    overlay: Option<Element>,
}

impl Card {
    fn open(&self) {
        remove_class(&self.card, HIDDEN_CLASS);
        if let Some(overlay) = &self.overlay {
            remove_class(overlay, HIDDEN_CLASS);
        }
    }

    fn close(&self) {
        add_class(&self.card, HIDDEN_CLASS);
        if let Some(overlay) = &self.overlay {
            add_class(overlay, HIDDEN_CLASS);
        }
    }
}

/// Opens `#contactCard` (and its `#contactOverlay` backdrop) from the
/// message buttons and the navbar contact link; `#closeContact` or a click
/// on the backdrop closes it again.
pub struct ContactPopup {
    card: Rc<Card>,
    _listeners: Vec<EventListener>,
}

impl ContactPopup {
    pub fn attach(document: &Document) -> Option<Self> {
        let card = document.get_element_by_id("contactCard")?;
        let close = document.get_element_by_id("closeContact")?;
        let card = Rc::new(Card {
            card,
            overlay: document.get_element_by_id("contactOverlay"),
        });

        let mut triggers = query_all(document, TRIGGERS);
        if let Some(nav_link) = document.get_element_by_id("navContactLink") {
            triggers.push(nav_link);
        }

        let mut listeners = Vec::new();
        for trigger in &triggers {
            let card = card.clone();
            listeners.push(EventListener::new_with_options(
                trigger,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    card.open();
                },
            ));
        }
        {
            let card = card.clone();
            listeners.push(EventListener::new_with_options(
                &close,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    card.close();
                },
            ));
        }
        if let Some(overlay) = card.overlay.clone() {
            let card = card.clone();
            listeners.push(EventListener::new(&overlay, "click", move |_| card.close()));
        }

        debug!("contact popup attached to {} triggers", triggers.len());
        Some(Self {
            card,
            _listeners: listeners,
        })
    }

    pub fn is_open(&self) -> bool {
        !has_class(&self.card.card, HIDDEN_CLASS)
    }
}
