use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of environment overrides (`VSIM__MODEL__MACHINE=4` sets `model.machine`).
pub const ENV_PREFIX: &str = "VSIM";

/// Config file looked up in the working directory when no path is given (any supported
/// extension, e.g. `vsim.toml`).
pub const DEFAULT_FILE: &str = "vsim";

#[vsim_derive::vsim_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: defaults from `T`, then a file, then environment overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads this file; it must exist. Without it [`DEFAULT_FILE`] is read when present.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the process environment as override source.
    #[must_use]
    pub fn env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// # Errors
    /// Returns [`ConfigError::Config`] when an explicit file is missing, a source cannot be
    /// parsed, or the merged values do not fit `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let file = match &self.file {
            Some(path) => {
                info!("Loading config from {}", path.display());
                File::from(path.as_path()).required(true)
            },
            None => {
                debug!("No config file given, probing '{DEFAULT_FILE}'");
                File::with_name(DEFAULT_FILE).required(false)
            },
        };

        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(self.env);

        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")
    }
}

/// Loads `T` from an optional file plus `VSIM__` environment overrides.
///
/// Missing keys fall back to `T`'s serde defaults, so an absent default file and an empty
/// environment yield the default configuration.
///
/// # Errors
/// See [`ConfigLoader::load`].
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    match path {
        Some(path) => loader.file(path).load(),
        None => loader.load(),
    }
}
