//! Response bodies of the status API
//!
//! Everything here is a transient view-model: decoded, rendered, dropped.
//! Decoding is lenient the way the browser widget is: a missing key or an
//! explicit `null` falls back to the empty value, and a malformed incident
//! is dropped without taking the rest of the list with it.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `GET /v1/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub recommended_provider: Option<String>,
    /// `None` when the server omits the list or sends `null`.
    #[serde(default)]
    pub rpc_providers: Option<Vec<RpcProvider>>,
    #[serde(default)]
    pub dapps: Option<Vec<DappEntry>>,
    /// Empty unless the server sends a list.
    #[serde(default, deserialize_with = "incident_list_or_empty")]
    pub open_incidents: Vec<Incident>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcProvider {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub healthy: bool,
    #[serde(default)]
    pub latency_ms: Option<f64>,
    #[serde(default)]
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DappEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub healthy: bool,
    #[serde(default)]
    pub latency_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    // Not rendered, so a value of the wrong type is dropped rather than
    // failing the incident.
    #[serde(default, deserialize_with = "none_if_mistyped")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "none_if_mistyped")]
    pub entity_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_name: String,
    #[serde(default, deserialize_with = "none_if_mistyped")]
    pub entity_url: Option<String>,
    #[serde(default, deserialize_with = "none_if_mistyped")]
    pub state: Option<String>,
    /// `CRIT` or any other tier; compared verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub started_at: String,
    #[serde(default, deserialize_with = "none_if_mistyped")]
    pub ended_at: Option<String>,
}

/// Body of `GET /v1/incidents?state=open`.
///
/// Any JSON that is not a list is kept as `Other` and renders as an empty
/// list. Elements of a list that do not decode as incidents are skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IncidentsPayload {
    List(Vec<Incident>),
    Other(Value),
}

impl IncidentsPayload {
    pub fn as_list(&self) -> Option<&[Incident]> {
        match self {
            IncidentsPayload::List(incidents) => Some(incidents.as_slice()),
            IncidentsPayload::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for IncidentsPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => IncidentsPayload::List(decode_incidents(items)),
            other => IncidentsPayload::Other(other),
        })
    }
}

/// Decode each element on its own so one bad entry cannot hide the others.
fn decode_incidents(items: Vec<Value>) -> Vec<Incident> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(incident) => Some(incident),
            Err(e) => {
                debug!("Skipping malformed incident: {}", e);
                None
            }
        })
        .collect()
}

fn incident_list_or_empty<'de, D>(deserializer: D) -> Result<Vec<Incident>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(decode_incidents(items)),
        _ => Ok(Vec::new()),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn none_if_mistyped<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_status_from_server() {
        let body = r#"{
            "recommended_provider": "aptoslabs",
            "rpc_providers": [
                {"name": "aptoslabs", "url": "https://api.mainnet.aptoslabs.com/v1", "healthy": true, "latency_ms": 87},
                {"name": "nodereal", "url": "", "healthy": false, "last_error": "timeout"}
            ],
            "dapps": [{"name": "pontem", "url": "https://pontem.network", "healthy": true, "latency_ms": 0}],
            "open_incidents": [
                {"id": 7, "entity_type": "rpc", "entity_name": "nodereal", "severity": "CRIT",
                 "summary": "3 consecutive failures", "started_at": "2024-05-01T10:00:00Z"}
            ]
        }"#;

        let status: StatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status.recommended_provider.as_deref(), Some("aptoslabs"));

        let providers = status.rpc_providers.unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].latency_ms, Some(87.0));
        assert_eq!(providers[1].latency_ms, None);
        assert_eq!(providers[1].last_error.as_deref(), Some("timeout"));

        assert_eq!(status.dapps.unwrap()[0].latency_ms, Some(0.0));
        assert_eq!(status.open_incidents[0].id, Some(7));
        assert_eq!(status.open_incidents[0].severity, "CRIT");
    }

    #[test]
    fn test_missing_and_null_lists() {
        let status: StatusResponse =
            serde_json::from_str(r#"{"recommended_provider": null, "rpc_providers": null}"#)
                .unwrap();
        assert_eq!(status.recommended_provider, None);
        assert_eq!(status.rpc_providers, None);
        assert_eq!(status.dapps, None);
        assert!(status.open_incidents.is_empty());

        let status: StatusResponse =
            serde_json::from_str(r#"{"open_incidents": null, "dapps": []}"#).unwrap();
        assert!(status.open_incidents.is_empty());
        assert_eq!(status.dapps, Some(Vec::new()));
    }

    #[test]
    fn test_incidents_payload_shapes() {
        let list: IncidentsPayload = serde_json::from_str(
            r#"[{"entity_name": "pontem", "severity": "WARN", "summary": "slow", "started_at": "t", "state": "open"}]"#,
        )
        .unwrap();
        assert_eq!(list.as_list().map(<[Incident]>::len), Some(1));

        let empty: IncidentsPayload = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.as_list().map(<[Incident]>::len), Some(0));

        let object: IncidentsPayload = serde_json::from_str(r#"{"error": "nope"}"#).unwrap();
        assert_eq!(object.as_list(), None);

        let null: IncidentsPayload = serde_json::from_str("null").unwrap();
        assert_eq!(null.as_list(), None);
    }

    #[test]
    fn test_open_incidents_that_is_not_a_list_decodes_as_empty() {
        let body = r#"{
            "recommended_provider": "aptoslabs",
            "rpc_providers": [{"name": "aptoslabs", "healthy": true, "latency_ms": 87}],
            "open_incidents": {}
        }"#;

        let status: StatusResponse = serde_json::from_str(body).unwrap();
        assert!(status.open_incidents.is_empty());
        assert_eq!(status.rpc_providers.map(|p| p.len()), Some(1));

        let status: StatusResponse =
            serde_json::from_str(r#"{"open_incidents": "none"}"#).unwrap();
        assert!(status.open_incidents.is_empty());
    }

    #[test]
    fn test_null_text_fields_decode_as_empty() {
        let body = r#"{
            "rpc_providers": [{"name": null, "url": null, "healthy": null, "latency_ms": null}],
            "dapps": [{"name": null, "healthy": true}],
            "open_incidents": [{"entity_name": "nodereal", "severity": null, "summary": null, "started_at": null}]
        }"#;

        let status: StatusResponse = serde_json::from_str(body).unwrap();
        let provider = &status.rpc_providers.unwrap()[0];
        assert_eq!(provider.name, "");
        assert!(!provider.healthy);
        assert_eq!(status.dapps.unwrap()[0].name, "");

        let incident = &status.open_incidents[0];
        assert_eq!(incident.entity_name, "nodereal");
        assert_eq!(incident.severity, "");
        assert_eq!(incident.started_at, "");
    }

    #[test]
    fn test_malformed_incident_does_not_hide_the_rest() {
        let body = r#"[
            {"entity_name": "a", "severity": "CRIT", "summary": "down", "started_at": "t1"},
            42,
            {"entity_name": "b", "severity": {"tier": 1}},
            {"entity_name": "c", "severity": "WARN", "summary": "slow", "started_at": "t2", "id": "inc-3"}
        ]"#;

        let payload: IncidentsPayload = serde_json::from_str(body).unwrap();
        let incidents = payload.as_list().unwrap();
        let names: Vec<&str> = incidents.iter().map(|i| i.entity_name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(incidents[0].severity, "CRIT");
        assert_eq!(incidents[1].id, None);

        let status: StatusResponse =
            serde_json::from_str(&format!(r#"{{"open_incidents": {}}}"#, body)).unwrap();
        assert_eq!(status.open_incidents.len(), 2);
    }
}
