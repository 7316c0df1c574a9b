//! ClusterInstall Custom Resource Definition
//!
//! A ClusterInstall drives the installation of one cluster: it references
//! the cluster deployment, declares how many agents the install needs, and
//! carries the backend's aggregate validation results for the cluster.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{ClusterReference, DebugInfo, StatusCondition};
use crate::status::ClusterState;
use crate::validations::ClusterValidationsInfo;

/// Condition types reported on a ClusterInstall
#[derive(Clone, Copy, Debug, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ClusterInstallConditionType {
    /// Whether the declared spec was successfully applied to the backend
    SpecSynced,
    /// Whether cluster validations are passing
    Validated,
    /// Whether the cluster meets all installation requirements
    RequirementsMet,
    /// Whether installation has finished
    Completed,
    /// Whether installation has failed
    Failed,
    /// Whether installation has stopped (failed or cancelled)
    Stopped,
    /// Condition types introduced by newer backends; ignored by the resolvers
    Other,
}

// Hand-rolled so condition types from newer backends degrade to `Other`
// instead of failing the whole resource.
impl<'de> Deserialize<'de> for ClusterInstallConditionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "SpecSynced" => Self::SpecSynced,
            "Validated" => Self::Validated,
            "RequirementsMet" => Self::RequirementsMet,
            "Completed" => Self::Completed,
            "Failed" => Self::Failed,
            "Stopped" => Self::Stopped,
            _ => Self::Other,
        })
    }
}

/// Agent counts required before installation may start
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequirements {
    /// Number of control plane agents (1 for single-node, otherwise odd for HA)
    #[serde(default = "default_control_plane_agents")]
    pub control_plane_agents: u32,

    /// Number of worker agents
    #[serde(default)]
    pub worker_agents: u32,
}

fn default_control_plane_agents() -> u32 {
    3
}

impl Default for ProvisionRequirements {
    fn default() -> Self {
        Self {
            control_plane_agents: default_control_plane_agents(),
            worker_agents: 0,
        }
    }
}

impl ProvisionRequirements {
    /// Returns the total number of required agents
    pub fn total_agents(&self) -> u32 {
        self.control_plane_agents + self.worker_agents
    }

    /// Validates the requirements
    pub fn validate(&self) -> crate::Result<()> {
        if self.control_plane_agents == 0 {
            return Err(crate::Error::validation(
                "control plane agent count must be at least 1",
            ));
        }
        // For HA, the control plane should be odd (1, 3, 5)
        if self.control_plane_agents > 1 && self.control_plane_agents % 2 == 0 {
            return Err(crate::Error::validation(
                "control plane agent count must be odd for HA (1, 3, 5, ...)",
            ));
        }
        Ok(())
    }
}

/// Specification for a ClusterInstall
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "foundry.dev",
    version = "v1alpha1",
    kind = "ClusterInstall",
    plural = "clusterinstalls",
    shortname = "ci",
    status = "ClusterInstallStatus",
    namespaced,
    printcolumn = r#"{"name":"State","type":"string","jsonPath":".status.debugInfo.state"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInstallSpec {
    /// Cluster deployment this install drives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_deployment_ref: Option<ClusterReference>,

    /// Agent counts required before installation may start
    #[serde(default)]
    pub provision_requirements: ProvisionRequirements,
}

impl ClusterInstallSpec {
    /// Validate the install specification
    pub fn validate(&self) -> crate::Result<()> {
        self.provision_requirements.validate()
    }
}

/// Status for a ClusterInstall
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInstallStatus {
    /// Conditions representing the install state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<StatusCondition<ClusterInstallConditionType>>,

    /// Backend-computed state snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo<ClusterState>>,

    /// Cluster validation results grouped by category
    ///
    /// Parsed leniently: malformed categories or entries are dropped rather
    /// than failing the whole resource.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::validations::parse::deserialize_cluster_validations"
    )]
    pub validations_info: Option<ClusterValidationsInfo>,
}

impl ClusterInstallStatus {
    /// Set the backend-computed state and return self for chaining
    pub fn state(mut self, state: ClusterState) -> Self {
        self.debug_info.get_or_insert_with(DebugInfo::default).state = Some(state);
        self
    }

    /// Set the human-readable state info and return self for chaining
    pub fn state_info(mut self, info: impl Into<String>) -> Self {
        self.debug_info
            .get_or_insert_with(DebugInfo::default)
            .state_info = Some(info.into());
        self
    }

    /// Add a condition and return self for chaining
    pub fn condition(mut self, condition: StatusCondition<ClusterInstallConditionType>) -> Self {
        // Remove existing condition of the same type
        self.conditions.retain(|c| c.type_ != condition.type_);
        self.conditions.push(condition);
        self
    }

    /// Set the validation map and return self for chaining
    pub fn validations(mut self, info: ClusterValidationsInfo) -> Self {
        self.validations_info = Some(info);
        self
    }
}
