//! userdir GUI entry point
//!
//! Reads the same config file as the CLI and opens the desktop window.

#![cfg_attr(windows, windows_subsystem = "windows")]

use userdir::config::Overrides;
use userdir::AppConfig;

fn main() {
    let result = AppConfig::load(None, Overrides::default()).and_then(|config| {
        match userdir::logging::init(config.log_file.as_deref(), config.log_level) {
            Ok(log_path) => {
                log::info!("userdir-gui {} starting, log at {}", userdir::VERSION, log_path.display())
            }
            Err(e) => eprintln!("Logging disabled, cannot open log file: {}", e),
        }

        let source = userdir::http_source(&config)?;
        userdir::gui::run(source, config.match_fields)
    });

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
