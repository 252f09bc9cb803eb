use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, VisibilityState, Window};

use crate::utils::debounce::Debounce;
use crate::utils::dom::{client_point, query_all, set_style};

const BLOB: &str = ".blob";
/// Narrower viewports keep the blobs still.
pub const MIN_VIEWPORT_WIDTH: f64 = 768.0;
/// How long after the last pointer move the pointer still counts as moving.
pub const POINTER_IDLE_MS: u32 = 100;
const PARALLAX_RANGE: f64 = 30.0;
const PARALLAX_STEP: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub moving: bool,
}

/// Pointer offset from the viewport centre, scaled to the parallax range.
pub fn parallax_offset(pointer: &PointerState, width: f64, height: f64) -> (f64, f64) {
    (
        (pointer.x / width - 0.5) * PARALLAX_RANGE,
        (pointer.y / height - 0.5) * PARALLAX_RANGE,
    )
}

pub fn blob_multiplier(index: usize) -> f64 {
    (index + 1) as f64 * PARALLAX_STEP
}

pub fn blob_transform(offset: (f64, f64), index: usize) -> String {
    let m = blob_multiplier(index);
    format!("translate({}px, {}px)", offset.0 * m, offset.1 * m)
}

pub fn is_active(pointer: &PointerState, viewport_width: f64) -> bool {
    pointer.moving && viewport_width > MIN_VIEWPORT_WIDTH
}

struct Shared {
    window: Window,
    document: Document,
    pointer: Cell<PointerState>,
    idle: Debounce,
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
    /// Cleared only by an explicit stop; hiding the tab merely suspends.
    enabled: Cell<bool>,
}

impl Shared {
    fn viewport(&self) -> (f64, f64) {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width, height)
    }

    fn tick(&self) {
        let pointer = self.pointer.get();
        let (width, height) = self.viewport();
        if !is_active(&pointer, width) || height <= 0.0 {
            return;
        }
        let offset = parallax_offset(&pointer, width, height);
        for (index, blob) in query_all(&self.document, BLOB).into_iter().enumerate() {
            if let Ok(blob) = blob.dyn_into::<HtmlElement>() {
                set_style(&blob, "transform", &blob_transform(offset, index));
            }
        }
    }

    fn track(self: &Rc<Self>, x: f64, y: f64) {
        self.pointer.set(PointerState { x, y, moving: true });
        let shared = self.clone();
        self.idle.call(move || {
            let mut pointer = shared.pointer.get();
            pointer.moving = false;
            shared.pointer.set(pointer);
        });
    }

    fn schedule(self: &Rc<Self>) {
        let shared = self.clone();
        let handle = request_animation_frame(move |_| {
            shared.frame.borrow_mut().take();
            if !shared.running.get() {
                return;
            }
            shared.tick();
            shared.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn resume(self: &Rc<Self>) {
        if !self.enabled.get() || self.running.replace(true) {
            return;
        }
        self.schedule();
    }

    fn suspend(&self) {
        self.running.set(false);
        self.frame.borrow_mut().take();
    }

    fn start(self: &Rc<Self>) {
        self.enabled.set(true);
        self.resume();
    }

    fn stop(&self) {
        self.enabled.set(false);
        self.suspend();
    }
}

/// Drifts the decorative `.blob` shapes against the pointer, once per
/// animation frame, while the pointer is moving on a wide viewport.
pub struct PointerEffect {
    shared: Rc<Shared>,
    _listeners: Vec<EventListener>,
}

impl PointerEffect {
    pub fn attach(window: &Window, document: &Document) -> Option<Self> {
        if query_all(document, BLOB).is_empty() {
            return None;
        }

        let shared = Rc::new(Shared {
            window: window.clone(),
            document: document.clone(),
            pointer: Cell::new(PointerState::default()),
            idle: Debounce::new(POINTER_IDLE_MS),
            frame: RefCell::new(None),
            running: Cell::new(false),
            enabled: Cell::new(false),
        });

        let mut listeners = Vec::new();
        {
            let shared = shared.clone();
            listeners.push(EventListener::new(document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = client_point(event);
                    shared.track(x, y);
                }
            }));
        }
        {
            let shared = shared.clone();
            listeners.push(EventListener::new(document, "visibilitychange", move |_| {
                if shared.document.visibility_state() == VisibilityState::Hidden {
                    shared.suspend();
                } else {
                    shared.resume();
                }
            }));
        }

        shared.start();
        debug!("pointer effect running");
        Some(Self {
            shared,
            _listeners: listeners,
        })
    }

    pub fn start(&self) {
        self.shared.start();
    }

    pub fn stop(&self) {
        self.shared.stop();
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    pub fn pointer(&self) -> PointerState {
        self.shared.pointer.get()
    }
}

impl Drop for PointerEffect {
    fn drop(&mut self) {
        self.shared.stop();
        self.shared.idle.cancel();
    }
}
