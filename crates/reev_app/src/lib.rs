//! REEV headless client: wires the session reducer to the API clients and
//! the local gene store.
mod platform;

pub use platform::app::{run_app, Cli, Session};
pub use platform::config::{apply_env_overrides, load_config, AppConfig, CONFIG_FILENAME};
pub use platform::effects::EffectRunner;
pub use platform::logging::LogDestination;
