use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window object")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
}

/// Why a contact form submission did not go through.
///
/// Every variant renders the same error panel; the distinction only shows up
/// in the console log.
#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not read relay reply: {0}")]
    Decode(String),
    #[error("relay rejected submission: {}", .message.as_deref().unwrap_or("Form submission failed"))]
    Rejected { message: Option<String> },
}

impl From<gloo_net::Error> for SubmitError {
    fn from(e: gloo_net::Error) -> Self {
        SubmitError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(e: serde_json::Error) -> Self {
        SubmitError::Decode(e.to_string())
    }
}
