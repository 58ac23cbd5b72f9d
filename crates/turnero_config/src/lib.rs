// --- File: crates/turnero_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `<config dir>/default.*` (optional)
/// 2. `<config dir>/<RUN_ENV>.*` (optional, `RUN_ENV` defaults to "debug")
/// 3. Environment variables with the `TURNERO_` prefix and `__` as the
///    section separator (e.g. `TURNERO_BACKEND__BASE_URL`).
///
/// The config directory is `config/` unless `TURNERO_CONFIG_DIR` says
/// otherwise. Every field has a serde-level default, so development works
/// with no config files at all.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("TURNERO_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        default = %default_path.display(),
        env = %env_path.display(),
        "Loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix("TURNERO")
                .prefix_separator("_")
                .separator("__"),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// Loads the file named by `DOTENV_OVERRIDE` (default ".env") exactly once
/// per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());
    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment is process-global, so the default and override cases run in
    // one test instead of racing in parallel ones.
    #[test]
    fn load_config_defaults_and_env_overrides() {
        env::set_var("TURNERO_CONFIG_DIR", "nonexistent-config-dir");

        let config = load_config().expect("defaults should load without files");
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.log.directory, "logs");

        env::set_var("TURNERO_BACKEND__BASE_URL", "http://10.0.0.5:9090");
        env::set_var("TURNERO_BACKEND__TIMEOUT_SECS", "5");
        let config = load_config().expect("env overrides should load");
        assert_eq!(config.backend.base_url, "http://10.0.0.5:9090");
        assert_eq!(config.backend.timeout_secs, 5);

        env::remove_var("TURNERO_BACKEND__BASE_URL");
        env::remove_var("TURNERO_BACKEND__TIMEOUT_SECS");
        env::remove_var("TURNERO_CONFIG_DIR");
    }
}
