//! Layered configuration loading
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults for the active environment
//! 2. `<dir>/default.toml` (optional)
//! 3. `<dir>/config.<environment>.toml` (optional)
//! 4. `OH__`-prefixed environment variables, e.g. `OH__VERIFICATION__MAX_ATTEMPTS=3`

use std::path::Path;

use oh_shared::config::{AppConfig, Environment};

use crate::InfrastructureResult;

/// Directory searched for configuration files
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Load configuration for the environment named by `OH_ENV`
///
/// Loads `.env` first when present.
pub fn load_config() -> InfrastructureResult<AppConfig> {
    dotenvy::dotenv().ok();
    load_config_from(Path::new(DEFAULT_CONFIG_DIR), Environment::from_env())
}

/// Load configuration from a specific directory and environment
pub fn load_config_from(dir: &Path, environment: Environment) -> InfrastructureResult<AppConfig> {
    let defaults = config::Config::try_from(&AppConfig::for_environment(environment))?;

    let settings = config::Config::builder()
        .add_source(defaults)
        .add_source(config::File::from(dir.join("default.toml")).required(false))
        .add_source(config::File::from(dir.join(environment.config_file())).required(false))
        .add_source(
            config::Environment::with_prefix("OH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut app_config: AppConfig = settings.try_deserialize()?;
    app_config.environment = environment;

    tracing::debug!(
        environment = %environment,
        dir = %dir.display(),
        hardened = app_config.verification.is_hardened(),
        "Configuration loaded"
    );

    Ok(app_config)
}
