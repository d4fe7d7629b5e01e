//! popkit-demo: replay popover interactions from the command line
//!
//! Usage: `popkit-demo [config.json] [scenario.json]`. Without a scenario,
//! every built-in story's walkthrough is replayed.

use std::path::Path;
use std::process::ExitCode;

use popkit::{AppConfig, Scenario, run_catalog, run_scenario};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let scenario_path = args.next();

    let config = match config_path.as_deref() {
        Some(path) => match AppConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };

    // RUST_LOG wins over the configured level
    let _ = env_logger::builder()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .try_init();
    log::info!(
        "{} v{} (log level {})",
        config.app_name,
        env!("CARGO_PKG_VERSION"),
        config.preferences.log_level.name()
    );

    if popkit_ui::set_theme(config.theme.clone()).is_err() {
        log::warn!("Theme was already set, keeping the existing one");
    }

    let result = match scenario_path.as_deref() {
        Some(path) => Scenario::load(Path::new(path))
            .and_then(|scenario| run_scenario(&scenario, &config.theme)),
        None => run_catalog(&config.theme, config.preferences.show_outline),
    };

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
