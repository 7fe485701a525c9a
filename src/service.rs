use crate::chill::ChillTime;
use crate::config::Config;
use crate::error::XTypeError;
use crate::xtypes::{XType, XTypeRegistry};
use std::sync::Arc;
use tracing::info;

/// Registers a [`ChillTime`] provider with the host for the lifetime of the service.
pub struct ChillTimeService {
    provider: Arc<dyn XType>,
    chill: ChillTime,
}

impl ChillTimeService {
    /// Build the provider from `[ChillTime]` and register it.
    ///
    /// An unknown algorithm is returned as an error and nothing is registered.
    pub fn new(registry: &mut XTypeRegistry, config: &Config) -> Result<Self, XTypeError> {
        let chill = ChillTime::new(&config.chill_time.algorithm)?;
        let provider: Arc<dyn XType> = Arc::new(chill);
        registry.register(provider.clone());

        info!(algorithm = %chill.algorithm(), "Registered chill time provider");
        Ok(Self { provider, chill })
    }

    pub fn chill(&self) -> &ChillTime {
        &self.chill
    }

    pub fn shut_down(self, registry: &mut XTypeRegistry) {
        if registry.unregister(&self.provider) {
            info!("Unregistered chill time provider");
        }
    }
}
