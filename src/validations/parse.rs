//! Lenient parsing of validation payloads at the resolver boundary
//!
//! Validation data arrives embedded in larger resource payloads, and some
//! backends nest it as a JSON-encoded string blob. Malformed data is never
//! an error here: entries that fail to parse are dropped with a warning and
//! the rest are kept, degrading to an empty map in the worst case. An empty
//! map reads as "not yet evaluated", which gating already treats as
//! unsatisfied for any non-empty requirement, so bad data can only ever
//! block a step, never unlock one.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::{ClusterValidationsInfo, HostValidationsInfo, Validation, ValidationsInfo};

/// Parse a host validation map from an already-decoded JSON value
pub fn host_validations_from_value(value: &Value) -> HostValidationsInfo {
    validations_from_value(value)
}

/// Parse a cluster validation map from an already-decoded JSON value
pub fn cluster_validations_from_value(value: &Value) -> ClusterValidationsInfo {
    validations_from_value(value)
}

/// Parse a host validation map from a JSON-encoded string blob
pub fn host_validations_from_str(raw: &str) -> HostValidationsInfo {
    validations_from_str(raw)
}

/// Parse a cluster validation map from a JSON-encoded string blob
pub fn cluster_validations_from_str(raw: &str) -> ClusterValidationsInfo {
    validations_from_str(raw)
}

fn validations_from_str<G, I>(raw: &str) -> ValidationsInfo<G, I>
where
    G: DeserializeOwned + Ord,
    I: DeserializeOwned,
{
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => validations_from_value(&value),
        Err(err) => {
            warn!(error = %err, "discarding unparseable validations payload");
            BTreeMap::new()
        }
    }
}

fn validations_from_value<G, I>(value: &Value) -> ValidationsInfo<G, I>
where
    G: DeserializeOwned + Ord,
    I: DeserializeOwned,
{
    // A string value is a nested JSON blob; unwrap one level.
    if let Value::String(raw) = value {
        return validations_from_str(raw);
    }

    let Value::Object(categories) = value else {
        if !value.is_null() {
            warn!("discarding non-object validations payload");
        }
        return BTreeMap::new();
    };

    let mut info = BTreeMap::new();
    for (category, entries) in categories {
        let Ok(group) = serde_json::from_value::<G>(Value::String(category.clone())) else {
            warn!(category = %category, "skipping unknown validation category");
            continue;
        };
        let Value::Array(entries) = entries else {
            warn!(category = %category, "skipping non-list validation category");
            continue;
        };
        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<Validation<I>>(entry.clone()) {
                Ok(validation) => parsed.push(validation),
                Err(err) => {
                    warn!(category = %category, error = %err, "skipping unparseable validation entry");
                }
            }
        }
        info.insert(group, parsed);
    }
    info
}

pub(crate) fn deserialize_host_validations<'de, D>(
    deserializer: D,
) -> Result<Option<HostValidationsInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(host_validations_from_value))
}

pub(crate) fn deserialize_cluster_validations<'de, D>(
    deserializer: D,
) -> Result<Option<ClusterValidationsInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(cluster_validations_from_value))
}
