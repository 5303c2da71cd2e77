//! services/chat_client/src/adapters/health.rs
//!
//! Client-side readiness checks for the collaborators the compose stack starts:
//! the context broker's `/version` endpoint and the backend's liveness page.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Deserialize)]
struct BrokerVersionBody {
    orion: Option<OrionVersion>,
}

#[derive(Deserialize)]
struct OrionVersion {
    version: Option<String>,
}

/// The result of probing one collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Reachable; `detail` is the version or banner it reported, if any.
    Healthy { detail: Option<String> },
    /// Reachable but answered with a non-success status.
    Unhealthy { status: u16 },
    Unreachable { reason: String },
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy { .. })
    }
}

#[derive(Clone)]
pub struct HealthProbe {
    client: Client,
}

impl HealthProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Mirrors the compose health check `curl -f {broker}/version`.
    pub async fn check_broker(&self, broker_url: &str) -> ProbeOutcome {
        let url = format!("{}/version", broker_url.trim_end_matches('/'));
        let outcome = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let detail = response
                    .json::<BrokerVersionBody>()
                    .await
                    .ok()
                    .and_then(|body| body.orion)
                    .and_then(|orion| orion.version);
                ProbeOutcome::Healthy { detail }
            }
            Ok(response) => ProbeOutcome::Unhealthy { status: response.status().as_u16() },
            Err(e) => ProbeOutcome::Unreachable { reason: e.to_string() },
        };
        log_outcome("context broker", &url, &outcome);
        outcome
    }

    /// Fetches the backend's root page, which answers whenever the service is up.
    pub async fn check_backend(&self, backend_url: &str) -> ProbeOutcome {
        let url = format!("{}/", backend_url.trim_end_matches('/'));
        let outcome = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let banner = response
                    .text()
                    .await
                    .ok()
                    .map(|text| text.trim().to_string())
                    .filter(|text| !text.is_empty());
                ProbeOutcome::Healthy { detail: banner }
            }
            Ok(response) => ProbeOutcome::Unhealthy { status: response.status().as_u16() },
            Err(e) => ProbeOutcome::Unreachable { reason: e.to_string() },
        };
        log_outcome("assistant backend", &url, &outcome);
        outcome
    }
}

fn log_outcome(name: &str, url: &str, outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Healthy { detail } => {
            info!("{} at {} is healthy ({})", name, url, detail.as_deref().unwrap_or("no detail"))
        }
        ProbeOutcome::Unhealthy { status } => {
            warn!("{} at {} answered with status {}", name, url, status)
        }
        ProbeOutcome::Unreachable { reason } => {
            warn!("{} at {} is unreachable: {}", name, url, reason)
        }
    }
}
