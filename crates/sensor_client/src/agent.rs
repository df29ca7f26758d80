//! Agent records and flattening into the observed host map.

use serde::{Deserialize, Serialize};

use hone_recon::{normalize_address, HostMap};

use crate::client::CollectionError;

/// Addresses never reported as observed; they would match every host.
const LOOPBACK: [&str; 2] = ["127.0.0.1", "::1"];

/// One software agent as returned by the sensors API. Unknown fields are
/// ignored; missing or null ones default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub host_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agent_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub interfaces: Vec<AgentInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentInterface {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    /// Routing domain (VRF) id. Missing or null reads as 0.
    #[serde(deserialize_with = "null_as_default")]
    pub vrf_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub family_type: String,
}

// null -> T::default(), value -> T
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flatten agents into canonical hostname → addresses for one routing domain.
///
/// Keeps interfaces in `vrf_id`, drops loopback and blank addresses, and
/// lower-cases hostnames. Agents left with no address are omitted.
pub fn collect_actual(agents: &[AgentRecord], vrf_id: i64) -> HostMap {
    let mut hosts = HostMap::new();

    for agent in agents {
        let hostname = hone_recon::canonical_hostname(agent.host_name.trim());
        if hostname.is_empty() {
            log::debug!("skipping agent {} with no hostname", agent.uuid);
            continue;
        }

        for iface in &agent.interfaces {
            if iface.vrf_id != vrf_id {
                continue;
            }
            let ip = normalize_address(&iface.ip);
            if ip.is_empty() || LOOPBACK.contains(&ip.as_str()) {
                continue;
            }
            hosts.entry(hostname.clone()).or_default().push(ip);
        }
    }

    log::debug!(
        "{} of {} agent(s) have addresses in vrf {vrf_id}",
        hosts.len(),
        agents.len()
    );
    hosts
}

/// Parse a saved sensors response: either the bare array of agents or a
/// page object with `results`.
pub fn parse_agents_json(input: &str) -> Result<Vec<AgentRecord>, CollectionError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Saved {
        List(Vec<AgentRecord>),
        Page { results: Vec<AgentRecord> },
    }

    let saved: Saved = serde_json::from_str(input.trim_start_matches('\u{feff}'))
        .map_err(|e| CollectionError::Parse(format!("agents JSON: {e}")))?;
    Ok(match saved {
        Saved::List(agents) => agents,
        Saved::Page { results } => results,
    })
}
