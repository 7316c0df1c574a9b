//! Cluster install status resolution

use crate::crd::types::ConditionStatus;
use crate::crd::{ClusterInstall, ClusterInstallConditionType, StatusCondition};

use super::ClusterState;

/// Derived status of a cluster install
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterStatusProjection {
    /// Derived state key
    pub state: ClusterState,
    /// Human-readable explanation of the state
    pub state_info: String,
}

/// Resolve a cluster install to its derived state and state info
///
/// A plain projection of the backend-reported debug state, defaulting to
/// `insufficient` with an empty info string when the backend has not
/// evaluated the cluster yet.
pub fn cluster_status(cluster_install: &ClusterInstall) -> ClusterStatusProjection {
    let debug = cluster_install
        .status
        .as_ref()
        .and_then(|s| s.debug_info.as_ref());
    ClusterStatusProjection {
        state: debug
            .and_then(|d| d.state)
            .unwrap_or(ClusterState::Insufficient),
        state_info: debug
            .and_then(|d| d.state_info.clone())
            .unwrap_or_default(),
    }
}

/// Returns true while installation has not started and the configuration
/// can still be freely edited
pub fn is_draft(cluster_install: &ClusterInstall) -> bool {
    matches!(
        cluster_status(cluster_install).state,
        ClusterState::PendingForInput | ClusterState::Insufficient | ClusterState::Ready
    )
}

fn find_condition(
    cluster_install: &ClusterInstall,
    type_: ClusterInstallConditionType,
) -> Option<&StatusCondition<ClusterInstallConditionType>> {
    cluster_install
        .status
        .as_ref()?
        .conditions
        .iter()
        .find(|c| c.type_ == type_)
}

/// Derive a cluster state from its conditions alone
///
/// Fallback path for callers that have conditions but no backend debug
/// state. All four core conditions must be present to say anything beyond
/// `insufficient`.
pub fn cluster_state_from_conditions(cluster_install: &ClusterInstall) -> (ClusterState, String) {
    let (Some(validated), Some(requirements_met), Some(completed), Some(stopped)) = (
        find_condition(cluster_install, ClusterInstallConditionType::Validated),
        find_condition(cluster_install, ClusterInstallConditionType::RequirementsMet),
        find_condition(cluster_install, ClusterInstallConditionType::Completed),
        find_condition(cluster_install, ClusterInstallConditionType::Stopped),
    ) else {
        return (
            ClusterState::Insufficient,
            "ClusterInstall conditions are missing.".to_string(),
        );
    };

    if stopped.status == ConditionStatus::True && stopped.has_reason("InstallationCancelled") {
        return (ClusterState::Cancelled, stopped.message_or_default());
    }
    if stopped.status == ConditionStatus::True && stopped.has_reason("InstallationFailed") {
        return (ClusterState::Error, stopped.message_or_default());
    }
    if completed.status == ConditionStatus::True && completed.has_reason("InstallationCompleted") {
        return (ClusterState::Installed, completed.message_or_default());
    }
    if completed.status == ConditionStatus::False && completed.has_reason("InstallationInProgress")
    {
        return (ClusterState::Installing, completed.message_or_default());
    }
    if validated.status == ConditionStatus::False {
        if validated.has_reason("ValidationsUserPending") {
            return (ClusterState::PendingForInput, validated.message_or_default());
        }
        if validated.has_reason("ValidationsFailing") || validated.has_reason("ValidationsUnknown")
        {
            return (ClusterState::Insufficient, validated.message_or_default());
        }
    }
    if requirements_met.status == ConditionStatus::False
        && (requirements_met.has_reason("ClusterNotReady")
            || requirements_met.has_reason("InsufficientAgents")
            || requirements_met.has_reason("UnapprovedAgents"))
    {
        return (
            ClusterState::Insufficient,
            requirements_met.message_or_default(),
        );
    }
    if completed.status == ConditionStatus::False && completed.has_reason("UnapprovedAgents") {
        return (ClusterState::Insufficient, completed.message_or_default());
    }

    (
        ClusterState::Insufficient,
        "Unexpected ClusterInstall conditions.".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{ClusterInstallSpec, ClusterInstallStatus};

    fn cluster(status: Option<ClusterInstallStatus>) -> ClusterInstall {
        let mut cluster = ClusterInstall::new("edge-1", ClusterInstallSpec::default());
        cluster.status = status;
        cluster
    }

    fn core_conditions(status: ClusterInstallStatus) -> ClusterInstallStatus {
        status
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Validated,
                ConditionStatus::True,
                "ValidationsPassing",
                "All validations are passing",
            ))
            .condition(StatusCondition::new(
                ClusterInstallConditionType::RequirementsMet,
                ConditionStatus::True,
                "ClusterAlreadyInstalling",
                "Installation in progress",
            ))
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Completed,
                ConditionStatus::False,
                "InstallationInProgress",
                "Installation is running",
            ))
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Stopped,
                ConditionStatus::False,
                "InstallationNotStopped",
                "Installation is running",
            ))
    }

    /// Story: No status at all resolves to conservative defaults
    #[test]
    fn story_missing_status_defaults_to_insufficient() {
        let projection = cluster_status(&cluster(None));
        assert_eq!(projection.state, ClusterState::Insufficient);
        assert_eq!(projection.state_info, "");
    }

    /// Story: The backend-reported state passes through unchanged
    #[test]
    fn story_reported_state_passes_through() {
        let status = ClusterInstallStatus::default()
            .state(ClusterState::Ready)
            .state_info("Cluster is ready");
        let projection = cluster_status(&cluster(Some(status)));
        assert_eq!(projection.state, ClusterState::Ready);
        assert_eq!(projection.state_info, "Cluster is ready");
    }

    /// Story: Draft means installation has not started yet
    #[test]
    fn story_draft_states() {
        for (state, draft) in [
            (ClusterState::Insufficient, true),
            (ClusterState::PendingForInput, true),
            (ClusterState::Ready, true),
            (ClusterState::Installing, false),
            (ClusterState::Installed, false),
            (ClusterState::Error, false),
        ] {
            let status = ClusterInstallStatus::default().state(state);
            assert_eq!(is_draft(&cluster(Some(status))), draft, "state {state}");
        }
    }

    // =========================================================================
    // Condition Ladder
    // =========================================================================

    #[test]
    fn test_missing_core_conditions_are_insufficient() {
        let (state, info) = cluster_state_from_conditions(&cluster(None));
        assert_eq!(state, ClusterState::Insufficient);
        assert!(info.contains("missing"));
    }

    #[test]
    fn test_stopped_outranks_completed() {
        let status = core_conditions(ClusterInstallStatus::default())
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Stopped,
                ConditionStatus::True,
                "InstallationCancelled",
                "Cancelled by user",
            ))
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Completed,
                ConditionStatus::True,
                "InstallationCompleted",
                "Done",
            ));
        let (state, info) = cluster_state_from_conditions(&cluster(Some(status)));
        assert_eq!(state, ClusterState::Cancelled);
        assert_eq!(info, "Cancelled by user");
    }

    #[test]
    fn test_installation_in_progress() {
        let status = core_conditions(ClusterInstallStatus::default());
        let (state, _) = cluster_state_from_conditions(&cluster(Some(status)));
        assert_eq!(state, ClusterState::Installing);
    }

    #[test]
    fn test_user_pending_validations() {
        let status = core_conditions(ClusterInstallStatus::default())
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Completed,
                ConditionStatus::False,
                "InstallationNotStarted",
                "Not started",
            ))
            .condition(StatusCondition::new(
                ClusterInstallConditionType::Validated,
                ConditionStatus::False,
                "ValidationsUserPending",
                "Enter the missing network settings",
            ));
        let (state, info) = cluster_state_from_conditions(&cluster(Some(status)));
        assert_eq!(state, ClusterState::PendingForInput);
        assert!(info.contains("network settings"));
    }

    #[test]
    fn test_unhandled_conditions_fall_back_to_insufficient() {
        let status = core_conditions(ClusterInstallStatus::default()).condition(
            StatusCondition::new(
                ClusterInstallConditionType::Completed,
                ConditionStatus::False,
                "SomeNewReason",
                "",
            ),
        );
        let (state, info) = cluster_state_from_conditions(&cluster(Some(status)));
        assert_eq!(state, ClusterState::Insufficient);
        assert!(info.contains("Unexpected"));
    }
}
