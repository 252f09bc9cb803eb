use log::Level;

/// Address shown in the contact form's error panel and the console banner.
pub const CONTACT_EMAIL: &str = "Iksh.AI.Tech@gmail.com";

/// Page the home-page cursor popup sends visitors to on a background click.
pub const EXPLORE_DESTINATION: &str = "about.html";

/// Delay between a fade starting and the element being taken out of layout.
pub const FADE_OUT_MS: u32 = 200;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running under `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub fn get_form_endpoint() -> &'static str {
    "https://api.web3forms.com/submit"
}
