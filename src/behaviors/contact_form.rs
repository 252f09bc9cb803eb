use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement};

use crate::config::{self, CONTACT_EMAIL};
use crate::error::SubmitError;
use crate::utils::dom::{add_class, html_by_id, remove_class, set_style};

pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_TEXT: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";
/// How long the success message stays up before the form is usable again.
pub const SUCCESS_HOLD_MS: u32 = 5000;

pub fn error_text() -> String {
    format!(
        "Oops! Something went wrong. Please try again or email us directly at {}",
        CONTACT_EMAIL
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Success,
    Error,
}

impl SubmitStatus {
    /// Whether the submit control accepts another click in this state.
    pub fn control_enabled(self) -> bool {
        matches!(self, SubmitStatus::Idle | SubmitStatus::Error)
    }
}

/// What the form relay answers with.
#[derive(Debug, Deserialize, PartialEq)]
pub struct RelayReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn parse_reply(body: &str) -> Result<RelayReply, SubmitError> {
    Ok(serde_json::from_str(body)?)
}

pub fn interpret(reply: RelayReply) -> Result<(), SubmitError> {
    if reply.success {
        Ok(())
    } else {
        Err(SubmitError::Rejected { message: reply.message })
    }
}

/// `application/x-www-form-urlencoded` body for the given fields.
pub fn encode_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Text fields of the form, in document order. File inputs are skipped.
fn collect_fields(form: &HtmlFormElement) -> Vec<(String, String)> {
    let Ok(data) = FormData::new_with_form(form) else {
        return Vec::new();
    };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let pair = entry.dyn_into::<js_sys::Array>().ok()?;
            Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
        })
        .collect()
}

async fn send(endpoint: &str, body: String) -> Result<(), SubmitError> {
    let response = Request::post(endpoint)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Accept", "application/json")
        .body(body)
        .send()
        .await?;
    let text = response.text().await?;
    interpret(parse_reply(&text)?)
}

struct FormState {
    endpoint: String,
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    message: Option<HtmlElement>,
    idle_label: String,
    status: Cell<SubmitStatus>,
    reset: RefCell<Option<Timeout>>,
}

impl FormState {
    fn set_control(&self, label: &str, disabled: bool) {
        if let Some(button) = &self.button {
            button.set_text_content(Some(label));
            button.set_disabled(disabled);
        }
    }

    fn restore_control(&self) {
        self.set_control(&self.idle_label, false);
    }

    fn show_message(&self, text: &str, class: &str) {
        if let Some(message) = &self.message {
            message.set_text_content(Some(text));
            add_class(message, class);
            set_style(message, "display", "block");
        }
    }

    fn clear_message(&self) {
        if let Some(message) = &self.message {
            remove_class(message, "success");
            remove_class(message, "error");
            set_style(message, "display", "none");
        }
    }

    fn begin(self: &Rc<Self>) {
        if let Some(pending) = self.reset.borrow_mut().take() {
            pending.cancel();
        }
        self.status.set(SubmitStatus::Sending);
        self.set_control(SENDING_LABEL, true);
        self.clear_message();

        let fields = collect_fields(&self.form);
        let body = encode_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        debug!("submitting contact form with {} fields", fields.len());

        let state = self.clone();
        spawn_local(async move {
            let result = send(&state.endpoint, body).await;
            state.finish(result);
        });
    }

    fn finish(self: &Rc<Self>, result: Result<(), SubmitError>) {
        // The visitor may have navigated or the form may have been swapped
        // out while the request was in flight.
        if !self.form.is_connected() {
            debug!("contact form gone, dropping relay reply");
            return;
        }

        match result {
            Ok(()) => {
                info!("contact form sent");
                self.status.set(SubmitStatus::Success);
                self.show_message(SUCCESS_TEXT, "success");
                self.form.reset();

                let state = self.clone();
                let timeout = Timeout::new(SUCCESS_HOLD_MS, move || {
                    state.restore_control();
                    if let Some(message) = &state.message {
                        set_style(message, "display", "none");
                    }
                    state.status.set(SubmitStatus::Idle);
                });
                *self.reset.borrow_mut() = Some(timeout);
            }
            Err(e) => {
                warn!("contact form failed: {e}");
                self.status.set(SubmitStatus::Error);
                self.show_message(&error_text(), "error");
                self.restore_control();
            }
        }
    }
}

/// Sends `#contactForm` to the form relay instead of letting the browser
/// navigate, and reports the outcome in `#formMessage`.
pub struct ContactForm {
    state: Rc<FormState>,
    _submit: EventListener,
}

impl ContactForm {
    pub fn attach(document: &Document) -> Option<Self> {
        Self::attach_with_endpoint(document, config::get_form_endpoint())
    }

    /// Like [`ContactForm::attach`], posting to `endpoint` instead of the
    /// configured relay.
    pub fn attach_with_endpoint(document: &Document, endpoint: &str) -> Option<Self> {
        let form = document
            .get_element_by_id("contactForm")?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        let button = form
            .query_selector(".btn-submit")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let idle_label = button
            .as_ref()
            .and_then(|b| b.text_content())
            .unwrap_or_default();

        let state = Rc::new(FormState {
            endpoint: endpoint.to_string(),
            form: form.clone(),
            button,
            message: html_by_id(document, "formMessage"),
            idle_label,
            status: Cell::new(SubmitStatus::Idle),
            reset: RefCell::new(None),
        });

        let submit = {
            let state = state.clone();
            EventListener::new_with_options(
                &form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    state.begin();
                },
            )
        };

        debug!("contact form attached");
        Some(Self {
            state,
            _submit: submit,
        })
    }

    pub fn status(&self) -> SubmitStatus {
        self.state.status.get()
    }

    /// Applies the relay's verdict for the submission in flight.
    pub fn complete(&self, result: Result<(), SubmitError>) {
        self.state.finish(result);
    }
}
