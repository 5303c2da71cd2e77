//! services/chat_client/src/bin/stack_check.rs
//!
//! Probes the compose stack the client depends on and exits non-zero if any
//! collaborator is not healthy. Also lists the broker's entities for the
//! configured tenant, optionally filtered by type or narrowed to one id.

use chat_client_lib::{
    adapters::{BrokerClient, HealthProbe},
    config::Config,
    error::ClientError,
    telemetry,
};
use clap::Parser;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "stack-check", about = "Check the context broker and assistant backend")]
struct Args {
    /// Only list entities of this type (e.g. OffStreetParking).
    #[arg(long)]
    entity_type: Option<String>,

    /// Fetch and print one entity by its full id.
    #[arg(long)]
    entity_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let args = Args::parse();
    let config = Config::from_env()?;
    telemetry::init(&config);

    // --- 1. Health Endpoints ---
    let probe = HealthProbe::new(Duration::from_secs(5))?;
    let (broker, backend) = futures::future::join(
        probe.check_broker(&config.broker_url),
        probe.check_backend(&config.backend_url),
    )
    .await;

    println!("context broker    {}: {:?}", config.broker_url, broker);
    println!("assistant backend {}: {:?}", config.backend_url, backend);

    // --- 2. Entity Inspection ---
    let entities_ok = if broker.is_healthy() {
        let client = BrokerClient::new(
            config.broker_url.clone(),
            config.fiware_service.clone(),
            config.fiware_service_path.clone(),
            Duration::from_secs(10),
        )?;
        inspect_entities(&client, &config, &args).await
    } else {
        false
    };

    if broker.is_healthy() && backend.is_healthy() && entities_ok {
        info!("All collaborators are healthy.");
        Ok(())
    } else {
        Err(ClientError::Internal("one or more collaborators are not healthy".to_string()))
    }
}

async fn inspect_entities(client: &BrokerClient, config: &Config, args: &Args) -> bool {
    let scope = format!("{}{}", config.fiware_service, config.fiware_service_path);
    match client.list_entities(args.entity_type.as_deref()).await {
        Ok(entities) => {
            println!("entities in {}: {}", scope, entities.len());
            for entity in &entities {
                println!("  {} ({})", entity.id, entity.entity_type);
            }
        }
        Err(e) => {
            error!("Listing entities in {} failed: {}", scope, e);
            println!("entities in {}: error: {}", scope, e.display_message());
            return false;
        }
    }

    let Some(id) = args.entity_id.as_deref() else {
        return true;
    };
    match client.get_entity(id).await {
        Ok(entity) => {
            match serde_json::to_string_pretty(&entity) {
                Ok(json) => println!("{}", json),
                Err(_) => println!("{:?}", entity),
            }
            true
        }
        Err(e) => {
            error!("Fetching entity '{}' failed: {}", id, e);
            println!("entity {}: error: {}", id, e.display_message());
            false
        }
    }
}
