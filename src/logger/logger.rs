use crate::settings;
use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const BOOTSTRAP_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
}

impl LogConfig {
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter).map_err(|e| anyhow!("log filter {:?}: {e}", self.filter))
    }
}

impl From<&settings::Log> for LogConfig {
    fn from(log: &settings::Log) -> Self {
        LogConfig {
            filter: log.filter.clone(),
        }
    }
}

pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    /// Installs the global subscriber. `RUST_LOG` wins over the bootstrap
    /// filter until settings are loaded.
    pub fn new_bootstrap() -> Self {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_FILTER));
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();

        Self { reload_handle }
    }

    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        let filter = config.env_filter()?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}
