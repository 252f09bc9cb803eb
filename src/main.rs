use iksh_frontend::config;
use log::{error, info};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site interactions");
    if let Err(e) = iksh_frontend::start() {
        error!("site interactions disabled: {e}");
    }
}
