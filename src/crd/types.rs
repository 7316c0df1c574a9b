//! Shared building blocks for the Foundry CRDs

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Condition status following Kubernetes conventions
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ConditionStatus {
    /// Condition is true
    True,
    /// Condition is false
    False,
    /// Condition status is unknown
    #[default]
    Unknown,
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Kubernetes-style condition with a typed condition type
///
/// Follows Kubernetes API conventions (type, status, reason, message,
/// transition timestamp). The type parameter is the per-resource closed
/// enumeration of condition types.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition<T> {
    /// Type of condition (e.g., SpecSynced, Validated)
    #[serde(rename = "type")]
    pub type_: T,

    /// Status of the condition (True, False, Unknown)
    pub status: ConditionStatus,

    /// Machine-readable reason for the condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl<T> StatusCondition<T> {
    /// Create a new condition with the current timestamp
    pub fn new(
        type_: T,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            type_,
            status,
            reason: Some(reason.into()),
            message: Some(message.into()),
            last_transition_time: Some(Utc::now()),
        }
    }

    /// The condition message, or an empty string when none was reported
    pub fn message_or_default(&self) -> String {
        self.message.clone().unwrap_or_default()
    }

    /// True when the condition carries the given machine-readable reason
    pub fn has_reason(&self, reason: &str) -> bool {
        self.reason.as_deref() == Some(reason)
    }
}

/// Backend-reported state snapshot embedded in a resource status
///
/// The state parameter is the per-resource derived-state enumeration.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", bound(deserialize = "S: Deserialize<'de>"))]
pub struct DebugInfo<S> {
    /// Backend-computed state, absent while the backend has not evaluated
    /// the resource yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<S>,

    /// Human-readable explanation of the state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_info: Option<String>,
}

impl<S> Default for DebugInfo<S> {
    fn default() -> Self {
        Self {
            state: None,
            state_info: None,
        }
    }
}

/// Reference to a cluster deployment by name and optional namespace
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReference {
    /// Name of the referenced cluster deployment
    pub name: String,

    /// Namespace of the referenced cluster deployment; same-namespace when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ClusterReference {
    /// Create a same-namespace reference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_timestamp() {
        let before = Utc::now();
        let condition =
            StatusCondition::new("Ready", ConditionStatus::True, "AllChecksPassed", "Ready");
        let after = Utc::now();

        assert_eq!(condition.type_, "Ready");
        assert_eq!(condition.status, ConditionStatus::True);
        assert!(condition.has_reason("AllChecksPassed"));
        let at = condition.last_transition_time.unwrap();
        assert!(at >= before && at <= after);
    }

    #[test]
    fn test_condition_wire_shape() {
        let condition = StatusCondition {
            type_: "SpecSynced",
            status: ConditionStatus::False,
            reason: Some("InputError".to_string()),
            message: None,
            last_transition_time: None,
        };
        let json = serde_json::to_string(&condition).unwrap();
        assert!(json.contains(r#""type":"SpecSynced""#));
        assert!(json.contains(r#""status":"False""#));
        // Absent optional fields are not serialized.
        assert!(!json.contains("message"));
        assert!(!json.contains("lastTransitionTime"));
    }

    #[test]
    fn test_default_condition_status_is_unknown() {
        assert_eq!(ConditionStatus::default(), ConditionStatus::Unknown);
        assert_eq!(ConditionStatus::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_debug_info_camel_case() {
        let info = DebugInfo {
            state: Some("ready"),
            state_info: Some("Cluster is ready".to_string()),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""stateInfo":"Cluster is ready""#));
    }

    #[test]
    fn test_message_or_default() {
        let condition: StatusCondition<&str> = StatusCondition {
            type_: "Validated",
            status: ConditionStatus::Unknown,
            reason: None,
            message: None,
            last_transition_time: None,
        };
        assert_eq!(condition.message_or_default(), "");
    }
}
