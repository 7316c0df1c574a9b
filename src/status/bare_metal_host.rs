//! Bare-metal host status resolution

use crate::crd::{BareMetalHost, ProvisioningState};

use super::BmhState;

/// Derived status of a bare-metal host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmhStatusProjection {
    /// Derived state key
    pub state: BmhState,
    /// Error description reported by the machine controller, if any
    pub error_message: Option<String>,
}

impl From<ProvisioningState> for BmhState {
    fn from(state: ProvisioningState) -> Self {
        match state {
            ProvisioningState::Registering => Self::Registering,
            ProvisioningState::Inspecting => Self::Inspecting,
            ProvisioningState::Provisioning => Self::Provisioning,
            ProvisioningState::Provisioned => Self::Provisioned,
            ProvisioningState::Deprovisioning => Self::Deprovisioning,
            // Unrecognized states degrade to pending rather than guessing.
            ProvisioningState::Pending | ProvisioningState::Unknown => Self::Pending,
        }
    }
}

/// Resolve a bare-metal host to its derived state and error message
///
/// An error type set on the status outranks the provisioning state: a host
/// mid-provisioning that hit a hardware error is an error, full stop. With
/// neither field set the host is `pending`.
pub fn bmh_status(bmh: &BareMetalHost) -> BmhStatusProjection {
    let status = bmh.status.as_ref();

    let has_error = status
        .and_then(|s| s.error_type.as_deref())
        .is_some_and(|t| !t.is_empty());

    let state = if has_error {
        BmhState::BmhError
    } else {
        status
            .and_then(|s| s.provisioning.as_ref())
            .and_then(|p| p.state)
            .map(BmhState::from)
            .unwrap_or(BmhState::Pending)
    };

    BmhStatusProjection {
        state,
        error_message: status.and_then(|s| s.error_message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{BareMetalHostSpec, BareMetalHostStatus, ProvisioningStatus};

    fn bmh(status: Option<BareMetalHostStatus>) -> BareMetalHost {
        let mut bmh = BareMetalHost::new("rack-2-slot-7", BareMetalHostSpec::default());
        bmh.status = status;
        bmh
    }

    fn provisioning(state: ProvisioningState) -> BareMetalHostStatus {
        BareMetalHostStatus {
            provisioning: Some(ProvisioningStatus { state: Some(state) }),
            ..Default::default()
        }
    }

    /// Story: An error outranks the provisioning state
    #[test]
    fn story_error_type_outranks_provisioning_state() {
        let status = BareMetalHostStatus {
            error_type: Some("power management error".to_string()),
            error_message: Some("BMC unreachable".to_string()),
            provisioning: Some(ProvisioningStatus {
                state: Some(ProvisioningState::Provisioning),
            }),
        };
        let projection = bmh_status(&bmh(Some(status)));
        assert_eq!(projection.state, BmhState::BmhError);
        assert_eq!(projection.error_message.as_deref(), Some("BMC unreachable"));
    }

    /// Story: An empty error type string is not an error
    #[test]
    fn story_empty_error_type_is_not_an_error() {
        let status = BareMetalHostStatus {
            error_type: Some(String::new()),
            ..provisioning(ProvisioningState::Inspecting)
        };
        assert_eq!(bmh_status(&bmh(Some(status))).state, BmhState::Inspecting);
    }

    /// Story: A fresh host with no reported state is pending
    #[test]
    fn story_missing_fields_default_to_pending() {
        assert_eq!(bmh_status(&bmh(None)).state, BmhState::Pending);
        assert_eq!(
            bmh_status(&bmh(Some(BareMetalHostStatus::default()))).state,
            BmhState::Pending
        );
    }

    #[test]
    fn test_provisioning_states_map_through() {
        for (wire, state) in [
            (ProvisioningState::Registering, BmhState::Registering),
            (ProvisioningState::Inspecting, BmhState::Inspecting),
            (ProvisioningState::Provisioning, BmhState::Provisioning),
            (ProvisioningState::Provisioned, BmhState::Provisioned),
            (ProvisioningState::Deprovisioning, BmhState::Deprovisioning),
            (ProvisioningState::Unknown, BmhState::Pending),
        ] {
            assert_eq!(bmh_status(&bmh(Some(provisioning(wire)))).state, state);
        }
    }
}
