pub mod broker;
pub mod health;
pub mod http_backend;

pub use broker::{BrokerClient, BrokerEntity};
pub use health::{HealthProbe, ProbeOutcome};
pub use http_backend::HttpChatBackend;
