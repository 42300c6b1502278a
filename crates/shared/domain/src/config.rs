use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level simulator configuration shared across components.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulatorConfigInner {
    pub service: ServiceConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    #[serde(flatten, default)]
    inner: Arc<SimulatorConfigInner>,
}

impl Deref for SimulatorConfig {
    type Target = SimulatorConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SimulatorConfig {
    fn deref_mut(&mut self) -> &mut SimulatorConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Fixed ids of the service-level singletons.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub property_collector: String,
    pub root_folder: String,
}

/// Size of the generated inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub datacenter: usize,
    pub cluster: usize,
    pub cluster_host: usize,
    pub host: usize,
    pub machine: usize,
    pub datastore: usize,
    /// Power on every generated virtual machine.
    pub autostart: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Rolling log file directory; console only when unset.
    pub directory: Option<PathBuf>,
    /// Extra `EnvFilter` directives appended after `level`.
    pub filter: Option<String>,
}

// --- Default ---

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            property_collector: crate::constants::PROPERTY_COLLECTOR.to_owned(),
            root_folder: crate::constants::ROOT_FOLDER.to_owned(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { datacenter: 1, cluster: 1, cluster_host: 3, host: 1, machine: 2, datastore: 1, autostart: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None, filter: None }
    }
}
