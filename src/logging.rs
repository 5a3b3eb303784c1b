//! Logger setup for the binary
//!
//! The library only talks to the `log` facade. `main` installs `env_logger`
//! once, before any simulation runs.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger; `RUST_LOG` overrides `verbose`
///
/// Calling this again is harmless: the first logger stays installed.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let installed = Builder::from_env(env)
        .format_timestamp_millis()
        .format_target(false)
        .try_init();

    if installed.is_err() {
        log::debug!("Logger already installed");
    }
}
