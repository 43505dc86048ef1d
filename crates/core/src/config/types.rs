use serde::{Deserialize, Serialize};

use crate::gateway::GatewayConfig;
use crate::pipeline::SchedulerConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub pipeline: SchedulerConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

impl Config {
    /// Returns a copy safe to log or serialize outward: the access token
    /// is redacted.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        if !config.gateway.access_token.is_empty() {
            config.gateway.access_token = "***".to_string();
        }
        config
    }
}
