//! BareMetalHost Custom Resource Definition
//!
//! A BareMetalHost tracks the physical machine underneath an agent: its
//! power state and where it is in the hardware provisioning lifecycle.
//! Unlike agents, bare-metal hosts carry no validation map.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hardware provisioning states reported by the machine controller
#[derive(Clone, Copy, Debug, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisioningState {
    /// The host is being registered with the machine controller
    Registering,
    /// Hardware inspection is running
    Inspecting,
    /// An image is being written to the host
    Provisioning,
    /// The host has been provisioned
    Provisioned,
    /// The host is being wiped
    Deprovisioning,
    /// No provisioning activity yet
    Pending,
    /// States introduced by newer machine controllers
    Unknown,
}

// Hand-rolled so states from newer machine controllers degrade to
// `Unknown` instead of failing the whole resource.
impl<'de> Deserialize<'de> for ProvisioningState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "registering" => Self::Registering,
            "inspecting" => Self::Inspecting,
            "provisioning" => Self::Provisioning,
            "provisioned" => Self::Provisioned,
            "deprovisioning" => Self::Deprovisioning,
            "pending" => Self::Pending,
            _ => Self::Unknown,
        })
    }
}

/// Provisioning progress reported by the machine controller
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningStatus {
    /// Current provisioning state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ProvisioningState>,
}

/// Specification for a BareMetalHost
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "foundry.dev",
    version = "v1alpha1",
    kind = "BareMetalHost",
    plural = "baremetalhosts",
    shortname = "bmh",
    status = "BareMetalHostStatus",
    namespaced,
    printcolumn = r#"{"name":"State","type":"string","jsonPath":".status.provisioning.state"}"#,
    printcolumn = r#"{"name":"Online","type":"boolean","jsonPath":".spec.online"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct BareMetalHostSpec {
    /// Whether the host should be powered on
    #[serde(default)]
    pub online: bool,

    /// MAC address of the NIC used for provisioning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_mac_address: Option<String>,
}

/// Status for a BareMetalHost
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BareMetalHostStatus {
    /// Category of the current hardware error; absent or empty when healthy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Human-readable description of the current hardware error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Provisioning progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning: Option<ProvisioningStatus>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn story_bare_metal_host_payload_roundtrip() {
        let json = json!({
            "apiVersion": "foundry.dev/v1alpha1",
            "kind": "BareMetalHost",
            "metadata": { "name": "rack-2-slot-7", "namespace": "factory" },
            "spec": { "online": true, "bootMacAddress": "52:54:00:a1:b2:c3" },
            "status": {
                "provisioning": { "state": "inspecting" }
            }
        });
        let bmh: BareMetalHost = serde_json::from_value(json).unwrap();
        assert!(bmh.spec.online);
        assert_eq!(
            bmh.spec.boot_mac_address.as_deref(),
            Some("52:54:00:a1:b2:c3")
        );
        assert_eq!(
            bmh.status.unwrap().provisioning.unwrap().state,
            Some(ProvisioningState::Inspecting)
        );
    }

    #[test]
    fn test_unknown_provisioning_state_degrades() {
        let status: ProvisioningStatus =
            serde_json::from_value(json!({ "state": "match-profile" })).unwrap();
        assert_eq!(status.state, Some(ProvisioningState::Unknown));
    }

    #[test]
    fn test_boot_mac_wire_name() {
        let spec = BareMetalHostSpec {
            online: false,
            boot_mac_address: Some("52:54:00:00:00:01".to_string()),
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains(r#""bootMacAddress""#));
    }
}
