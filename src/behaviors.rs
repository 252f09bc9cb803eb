pub mod contact_form;
pub mod contact_popup;
pub mod cursor_popup;
pub mod date_display;
pub mod magnifier;
pub mod navigation;
pub mod page_lifecycle;
pub mod pointer_effect;
pub mod reveal;
pub mod service_selector;
