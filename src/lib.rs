//! Interactive behavior for the IKSH AI marketing pages.
//!
//! The pages are static HTML; this crate attaches to their elements by id
//! and class once the DOM is ready. Each behavior unit is independent and
//! quietly stays off when the elements it needs are missing.

pub mod behaviors;
pub mod config;
pub mod error;
pub mod page;
pub mod utils;

use log::info;
use web_sys::{Document, Window};

use behaviors::{
    contact_form::ContactForm,
    contact_popup::ContactPopup,
    cursor_popup::CursorPopup,
    date_display,
    magnifier::Magnifier,
    navigation::Navigation,
    page_lifecycle::{self, ScrollReset},
    pointer_effect::PointerEffect,
    reveal::RevealAnimator,
    service_selector::ServiceSelector,
};
use error::SiteError;
use page::PageIdentity;

/// Every behavior attached to the current page. Dropping it detaches them.
pub struct Site {
    page: PageIdentity,
    pub navigation: Option<Navigation>,
    pub reveal: Option<RevealAnimator>,
    pub pointer_effect: Option<PointerEffect>,
    pub contact_form: Option<ContactForm>,
    pub magnifier: Option<Magnifier>,
    pub cursor_popup: Option<CursorPopup>,
    pub contact_popup: Option<ContactPopup>,
    pub service_selector: Option<ServiceSelector>,
}

impl Site {
    pub fn mount(window: &Window, document: &Document, page: PageIdentity) -> Self {
        date_display::show_today(document);

        let site = Site {
            page,
            navigation: Navigation::attach(window, document),
            reveal: RevealAnimator::attach(window, document),
            pointer_effect: PointerEffect::attach(window, document),
            contact_form: ContactForm::attach(document),
            magnifier: Magnifier::attach(window, document, page),
            cursor_popup: CursorPopup::attach(window, document, page),
            contact_popup: ContactPopup::attach(document),
            service_selector: ServiceSelector::attach(document, page),
        };
        info!("{:?} page ready: {}", page, site.summary());
        site
    }

    pub fn page(&self) -> PageIdentity {
        self.page
    }

    fn summary(&self) -> String {
        let units = [
            ("navigation", self.navigation.is_some()),
            ("reveal", self.reveal.is_some()),
            ("pointer", self.pointer_effect.is_some()),
            ("form", self.contact_form.is_some()),
            ("magnifier", self.magnifier.is_some()),
            ("cursor-popup", self.cursor_popup.is_some()),
            ("contact-popup", self.contact_popup.is_some()),
            ("services", self.service_selector.is_some()),
        ];
        units
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Keeps every behavior attached for the rest of the page's life.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

/// Entry point: prepares page-wide state now and mounts the behaviors once
/// the DOM has been parsed.
pub fn start() -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::NoWindow)?;
    let document = window.document().ok_or(SiteError::NoDocument)?;
    let page = PageIdentity::from_window(&window);

    ScrollReset::attach(&window).forget();
    page_lifecycle::print_welcome();

    let ready_document = document.clone();
    page_lifecycle::when_dom_ready(&document, move || {
        Site::mount(&window, &ready_document, page).forget();
    });
    Ok(())
}
