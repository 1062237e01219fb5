//! Server Configuration

use checkout_payments::{ChimoneyConfig, DEFAULT_CAPACITY};

/// Runtime configuration, read once at startup
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Webhook deliveries remembered for redelivery detection
    pub dedup_capacity: usize,

    /// Upstream provider settings
    pub chimoney: ChimoneyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            dedup_capacity: DEFAULT_CAPACITY,
            chimoney: ChimoneyConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            dedup_capacity: std::env::var("WEBHOOK_DEDUP_CAPACITY")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(defaults.dedup_capacity),
            chimoney: ChimoneyConfig::from_env(),
        }
    }
}
