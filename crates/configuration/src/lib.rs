use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    Config, DashboardConfig, DataOverrides, DataSettings, LoggingSettings, ServerSettings,
};

/// Prefix of environment variables that override file settings,
/// e.g. `ORDERSCOPE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "ORDERSCOPE";

/// Loads the application configuration.
///
/// Sources are layered in this order, later ones winning:
/// 1. built-in defaults,
/// 2. the TOML file at `path`, or an optional `config.toml` when no path is given,
/// 3. `ORDERSCOPE__SECTION__KEY` environment variables.
///
/// An explicitly given file must exist; the implicit `config.toml` may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(data = %config.data.path.display(), "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "[data] path must not be empty".to_string(),
        ));
    }
    if config.dashboard.top_products == 0 || config.dashboard.top_categories == 0 {
        return Err(ConfigError::ValidationError(
            "[dashboard] top_products and top_categories must be at least 1".to_string(),
        ));
    }
    if config.dashboard.raw_row_limit == 0 {
        return Err(ConfigError::ValidationError(
            "[dashboard] raw_row_limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}
