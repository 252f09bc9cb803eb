use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;

use crate::config::FADE_OUT_MS;
use crate::utils::dom::set_style;

/// Identifies one scheduled hide. Only the most recently issued token is
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token(u64);

#[derive(Debug, Default)]
pub struct Generation(Cell<u64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every earlier token and returns a fresh one.
    pub fn advance(&self) -> Token {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        Token(next)
    }

    pub fn is_current(&self, token: Token) -> bool {
        self.0.get() == token.0
    }
}

/// A floating element that fades out before leaving layout. A delayed hide
/// only lands if no show or newer fade was issued in between.
///
/// At most one conditional and one unconditional hide are pending at a
/// time; scheduling another drops, and so cancels, the one it replaces.
pub struct Fader {
    element: HtmlElement,
    generation: Rc<Generation>,
    pending: RefCell<Option<Timeout>>,
    forced: RefCell<Option<Timeout>>,
}

impl Fader {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            generation: Rc::new(Generation::new()),
            pending: RefCell::new(None),
            forced: RefCell::new(None),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn show(&self, display: &str) {
        self.generation.advance();
        if let Some(pending) = self.pending.borrow_mut().take() {
            pending.cancel();
        }
        set_style(&self.element, "display", display);
        set_style(&self.element, "opacity", "1");
    }

    /// Fades to transparent and hides after the fade delay, unless something
    /// re-showed the element meanwhile.
    pub fn fade_out(&self) {
        let token = self.generation.advance();
        set_style(&self.element, "opacity", "0");
        let element = self.element.clone();
        let generation = self.generation.clone();
        let timeout = Timeout::new(FADE_OUT_MS, move || {
            if generation.is_current(token) {
                set_style(&element, "display", "none");
            }
        });
        *self.pending.borrow_mut() = Some(timeout);
    }

    /// Fades to transparent and hides after the fade delay regardless of
    /// what happens in between.
    pub fn fade_out_unconditionally(&self) {
        self.generation.advance();
        set_style(&self.element, "opacity", "0");
        let element = self.element.clone();
        let timeout = Timeout::new(FADE_OUT_MS, move || {
            set_style(&element, "display", "none");
        });
        *self.forced.borrow_mut() = Some(timeout);
    }
}
