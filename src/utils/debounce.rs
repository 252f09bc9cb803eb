use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Trailing-edge debounce: every call restarts the wait, and only the last
/// scheduled action runs once `wait_ms` passes without another call.
pub struct Debounce {
    wait_ms: u32,
    pending: RefCell<Option<Timeout>>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + 'static,
    {
        // Replacing the stored timeout drops, and so cancels, the previous one.
        let timeout = Timeout::new(self.wait_ms, action);
        *self.pending.borrow_mut() = Some(timeout);
    }

    pub fn cancel(&self) {
        if let Some(timeout) = self.pending.borrow_mut().take() {
            timeout.cancel();
        }
    }
}

/// Wraps `func` so that bursts of calls collapse into one call with the last
/// argument, `wait_ms` after the burst ends.
pub fn debounce<A, F>(func: F, wait_ms: u32) -> impl Fn(A)
where
    A: 'static,
    F: Fn(A) + 'static,
{
    let func = Rc::new(func);
    let debounce = Debounce::new(wait_ms);
    move |arg: A| {
        let func = func.clone();
        debounce.call(move || func(arg));
    }
}
