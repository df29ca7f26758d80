//! Monitoring OpenAPI client: builds the observed host inventory.
//!
//! Lists the software agents known to the monitoring service and flattens
//! their interfaces into a hostname → addresses map for one routing domain.
//!
//! No retries. No async runtime.

mod agent;
mod auth;
mod client;

pub use agent::{collect_actual, parse_agents_json, AgentInterface, AgentRecord};
pub use auth::{sign_request, SignedHeaders};
pub use client::{fetch_actual, CollectionError, SensorClient, SENSORS_PATH};
