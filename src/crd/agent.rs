//! Agent Custom Resource Definition
//!
//! An Agent represents a host that booted the Foundry discovery image and
//! is reporting inventory and validation results. Agents start unapproved;
//! an operator approves them before they may join a cluster.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{ClusterReference, DebugInfo, StatusCondition};
use crate::status::AgentState;
use crate::validations::HostValidationsInfo;

/// Condition types reported on an Agent
#[derive(Clone, Copy, Debug, Serialize, JsonSchema, PartialEq, Eq)]
pub enum AgentConditionType {
    /// Whether the declared spec was successfully applied to the backend
    SpecSynced,
    /// Whether the agent is reporting to the install service
    Connected,
    /// Whether the host may start installation
    ReadyForInstallation,
    /// Whether host validations are passing
    Validated,
    /// Whether installation finished on the host
    Installed,
    /// Whether the agent is bound to a cluster deployment
    Bound,
    /// Condition types introduced by newer backends; ignored by the resolvers
    Other,
}

// Hand-rolled so condition types from newer backends degrade to `Other`
// instead of failing the whole resource.
impl<'de> Deserialize<'de> for AgentConditionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "SpecSynced" => Self::SpecSynced,
            "Connected" => Self::Connected,
            "ReadyForInstallation" => Self::ReadyForInstallation,
            "Validated" => Self::Validated,
            "Installed" => Self::Installed,
            "Bound" => Self::Bound,
            _ => Self::Other,
        })
    }
}

/// Role a host assumes in the installed cluster
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AgentRole {
    /// Let the install service pick a role
    #[default]
    AutoAssign,
    /// Control plane node
    Master,
    /// Worker node
    Worker,
}

/// Specification for an Agent
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "foundry.dev",
    version = "v1alpha1",
    kind = "Agent",
    plural = "agents",
    status = "AgentStatus",
    namespaced,
    printcolumn = r#"{"name":"State","type":"string","jsonPath":".status.debugInfo.state"}"#,
    printcolumn = r#"{"name":"Approved","type":"boolean","jsonPath":".spec.approved"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AgentSpec {
    /// Whether an operator has approved this host for use
    ///
    /// Unapproved agents are surfaced as `discovered` and never as a
    /// validated state, no matter what the backend has computed.
    #[serde(default)]
    pub approved: bool,

    /// Cluster deployment this agent is bound to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_deployment_name: Option<ClusterReference>,

    /// Requested hostname override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Role this host should assume in the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AgentRole>,
}

impl AgentSpec {
    /// Returns true if this agent is bound to a cluster deployment
    pub fn is_bound(&self) -> bool {
        self.cluster_deployment_name.is_some()
    }
}

/// Status for an Agent
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatus {
    /// Conditions representing the agent state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<StatusCondition<AgentConditionType>>,

    /// Backend-computed state snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo<AgentState>>,

    /// Host validation results grouped by category
    ///
    /// Parsed leniently: malformed categories or entries are dropped rather
    /// than failing the whole resource.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::validations::parse::deserialize_host_validations"
    )]
    pub validations_info: Option<HostValidationsInfo>,
}

impl AgentStatus {
    /// Set the backend-computed state and return self for chaining
    pub fn state(mut self, state: AgentState) -> Self {
        self.debug_info.get_or_insert_with(DebugInfo::default).state = Some(state);
        self
    }

    /// Add a condition and return self for chaining
    pub fn condition(mut self, condition: StatusCondition<AgentConditionType>) -> Self {
        // Remove existing condition of the same type
        self.conditions.retain(|c| c.type_ != condition.type_);
        self.conditions.push(condition);
        self
    }

    /// Set the validation map and return self for chaining
    pub fn validations(mut self, info: HostValidationsInfo) -> Self {
        self.validations_info = Some(info);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::crd::types::ConditionStatus;
    use crate::validations::host::HostValidationGroup;

    /// Story: Adding condition with same type replaces the old one
    #[test]
    fn story_new_condition_replaces_old_condition_of_same_type() {
        let syncing = StatusCondition::new(
            AgentConditionType::SpecSynced,
            ConditionStatus::False,
            "InputError",
            "Spec could not be applied",
        );
        let synced = StatusCondition::new(
            AgentConditionType::SpecSynced,
            ConditionStatus::True,
            "SyncOK",
            "Spec applied",
        );

        let status = AgentStatus::default().condition(syncing).condition(synced);

        assert_eq!(status.conditions.len(), 1);
        assert_eq!(status.conditions[0].status, ConditionStatus::True);
    }

    /// Story: Unknown condition types from newer backends still deserialize
    #[test]
    fn story_unknown_condition_type_maps_to_other() {
        let json = json!({
            "conditions": [
                { "type": "RebootedRecently", "status": "True", "reason": "x", "message": "y" }
            ]
        });
        let status: AgentStatus = serde_json::from_value(json).unwrap();
        assert_eq!(status.conditions[0].type_, AgentConditionType::Other);
    }

    /// Story: A full Agent payload deserializes, including validations
    #[test]
    fn story_agent_payload_roundtrip() {
        let json = json!({
            "apiVersion": "foundry.dev/v1alpha1",
            "kind": "Agent",
            "metadata": { "name": "host-0", "namespace": "factory" },
            "spec": {
                "approved": true,
                "clusterDeploymentName": { "name": "edge-1" },
                "hostname": "host-0.example.com",
                "role": "auto-assign"
            },
            "status": {
                "debugInfo": { "state": "insufficient", "stateInfo": "validations failing" },
                "validationsInfo": {
                    "hardware": [
                        { "id": "connected", "status": "success", "message": "ok" }
                    ]
                }
            }
        });
        let agent: Agent = serde_json::from_value(json).unwrap();
        assert!(agent.spec.approved);
        assert!(agent.spec.is_bound());
        assert_eq!(agent.spec.role, Some(AgentRole::AutoAssign));

        let status = agent.status.as_ref().unwrap();
        assert_eq!(
            status.debug_info.as_ref().unwrap().state,
            Some(AgentState::Insufficient)
        );
        let info = status.validations_info.as_ref().unwrap();
        assert_eq!(info[&HostValidationGroup::Hardware].len(), 1);
    }

    /// Story: A validations blob nested as a JSON string still parses
    ///
    /// Some transports flatten the validation map into a string field; the
    /// lenient deserializer unwraps it so nothing downstream sees raw JSON.
    #[test]
    fn story_string_encoded_validations_are_unwrapped() {
        let json = json!({
            "validationsInfo":
                "{\"hardware\":[{\"id\":\"connected\",\"status\":\"success\",\"message\":\"ok\"}]}"
        });
        let status: AgentStatus = serde_json::from_value(json).unwrap();
        let info = status.validations_info.unwrap();
        assert_eq!(info[&HostValidationGroup::Hardware].len(), 1);
    }

    #[test]
    fn test_spec_defaults() {
        let spec: AgentSpec = serde_json::from_value(json!({})).unwrap();
        assert!(!spec.approved);
        assert!(!spec.is_bound());
        assert_eq!(spec.hostname, None);
        assert_eq!(spec.role, None);
    }
}
