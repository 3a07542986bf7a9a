use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Error;

/// Connection settings for the Jenkins server a client implementation talks
/// to. Construction is the caller's concern; this crate only defines the
/// shape and the environment fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// CA certificate for servers using a self-signed certificate.
    #[serde(default)]
    pub ca_cert: Option<String>,
}

impl Config {
    /// Reads settings from `JENKINS_URL`, `JENKINS_USERNAME`,
    /// `JENKINS_PASSWORD` and `JENKINS_CA_CERT`.
    pub fn from_env() -> Result<Self, Error> {
        let server_url = std::env::var("JENKINS_URL").unwrap_or_default();
        if server_url.is_empty() {
            return Err(Error::validation(
                "server_url",
                "required and must be provided in the config or the JENKINS_URL environment variable",
            ));
        }

        Ok(Self {
            server_url,
            username: std::env::var("JENKINS_USERNAME").unwrap_or_default(),
            password: std::env::var("JENKINS_PASSWORD").unwrap_or_default(),
            ca_cert: std::env::var("JENKINS_CA_CERT").ok().filter(|v| !v.is_empty()),
        })
    }

    pub fn trace_loaded(&self) {
        info!(
            server_url = %self.server_url,
            username = %self.username,
            "Loaded Config"
        );
        debug!(has_ca_cert = self.ca_cert.is_some(), "Config loaded");
    }
}
