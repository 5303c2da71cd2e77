//! services/chat_client/src/adapters/broker.rs
//!
//! Read-only queries against the context broker's NGSI v2 entity API, scoped
//! to one tenant through the `Fiware-Service` / `Fiware-ServicePath` headers.

use chat_relay_core::ports::{PortError, PortResult};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info};

/// One NGSI v2 entity as the broker returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Orion reports failures as `{"error": ..., "description": ...}`.
#[derive(Deserialize)]
struct BrokerErrorBody {
    error: Option<String>,
    description: Option<String>,
}

#[derive(Clone)]
pub struct BrokerClient {
    client: Client,
    base_url: String,
    service: String,
    service_path: String,
}

impl BrokerClient {
    pub fn new(
        base_url: impl Into<String>,
        service: impl Into<String>,
        service_path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service: service.into(),
            service_path: service_path.into(),
        })
    }

    fn scoped(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Fiware-Service", &self.service)
            .header("Fiware-ServicePath", &self.service_path)
    }

    fn entities_url(&self) -> PortResult<Url> {
        Url::parse(&format!("{}/v2/entities", self.base_url))
            .map_err(|e| PortError::Unexpected(format!("Invalid broker URL: {}", e)))
    }

    /// Lists the tenant's entities, optionally only those of `entity_type`.
    pub async fn list_entities(&self, entity_type: Option<&str>) -> PortResult<Vec<BrokerEntity>> {
        let mut request = self.scoped(self.client.get(self.entities_url()?));
        if let Some(entity_type) = entity_type {
            request = request.query(&[("type", entity_type)]);
        }

        let response = send(request).await?;
        let entities: Vec<BrokerEntity> = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(format!("Invalid entity list: {}", e)))?;
        info!(
            "Broker returned {} entities (type filter: {})",
            entities.len(),
            entity_type.unwrap_or("none")
        );
        Ok(entities)
    }

    /// Fetches a single entity by its full id.
    pub async fn get_entity(&self, id: &str) -> PortResult<BrokerEntity> {
        let mut url = self.entities_url()?;
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected("Broker URL cannot take a path".to_string()))?
            .push(id);

        let response = send(self.scoped(self.client.get(url))).await?;
        response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(format!("Invalid entity '{}': {}", id, e)))
    }
}

async fn send(request: RequestBuilder) -> PortResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))?;
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<BrokerErrorBody>(&text)
        .ok()
        .and_then(|body| body.description.or(body.error));
    debug!("Broker answered {}: {}", status, text);
    Err(PortError::Rejected { status, message })
}
