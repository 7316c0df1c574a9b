//! The validation data model: per-resource check results grouped by category.
//!
//! Every installer resource carries a bag of independently computed checks.
//! A check is identified by a closed, per-resource-kind id enumeration
//! ([`host::HostValidationId`] and [`cluster::ClusterValidationId`] are
//! separate universes), and checks are grouped into categories. The backend
//! owns producing these results; this crate only interprets them.

pub mod cluster;
pub mod host;
pub mod parse;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of a single check as reported by the backend
///
/// `failure` and `error` are both failed checks and are treated identically
/// everywhere in this crate; the backend emits one or the other depending
/// on which subsystem computed the check.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// The check passed
    Success,
    /// The check failed
    Failure,
    /// The check has not finished computing yet
    Pending,
    /// The check was deliberately skipped and must not block anything
    Disabled,
    /// The check failed (alternate spelling emitted by parts of the backend)
    Error,
}

impl ValidationStatus {
    /// Returns true for the failed outcomes (`failure` and `error`)
    pub fn is_failing(&self) -> bool {
        matches!(self, Self::Failure | Self::Error)
    }
}

/// A single named check result with a human-readable message
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct Validation<I> {
    /// Which check this is
    pub id: I,
    /// Outcome of the check
    pub status: ValidationStatus,
    /// Human-readable explanation of the outcome
    #[serde(default)]
    pub message: String,
}

impl<I> Validation<I> {
    /// Create a validation result
    pub fn new(id: I, status: ValidationStatus, message: impl Into<String>) -> Self {
        Self {
            id,
            status,
            message: message.into(),
        }
    }
}

/// Check results grouped by category
///
/// A category key may be entirely absent (the backend has not evaluated the
/// category yet), present with an empty list, or present with entries.
/// These states are distinct: gating treats a required id with no entry as
/// unsatisfied no matter which of the first two forms the absence takes.
pub type ValidationsInfo<G, I> = BTreeMap<G, Vec<Validation<I>>>;

/// Validation map carried by a host agent
pub type HostValidationsInfo = ValidationsInfo<host::HostValidationGroup, host::HostValidationId>;

/// Validation map carried by a cluster install
pub type ClusterValidationsInfo =
    ValidationsInfo<cluster::ClusterValidationGroup, cluster::ClusterValidationId>;

#[cfg(test)]
mod tests {
    use super::cluster::{ClusterValidationGroup, ClusterValidationId};
    use super::host::{HostValidationGroup, HostValidationId};
    use super::*;

    #[test]
    fn test_status_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&ValidationStatus::Success).unwrap(),
            r#""success""#
        );
        assert_eq!(
            serde_json::to_string(&ValidationStatus::Pending).unwrap(),
            r#""pending""#
        );
        assert_eq!(
            serde_json::to_string(&ValidationStatus::Error).unwrap(),
            r#""error""#
        );
    }

    #[test]
    fn test_is_failing_covers_both_spellings() {
        assert!(ValidationStatus::Failure.is_failing());
        assert!(ValidationStatus::Error.is_failing());
        assert!(!ValidationStatus::Success.is_failing());
        assert!(!ValidationStatus::Pending.is_failing());
        assert!(!ValidationStatus::Disabled.is_failing());
    }

    #[test]
    fn test_host_id_wire_names_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&HostValidationId::NtpSynced).unwrap(),
            r#""ntp-synced""#
        );
        assert_eq!(
            serde_json::to_string(&HostValidationId::ApiIntDomainNameResolvedCorrectly).unwrap(),
            r#""api-int-domain-name-resolved-correctly""#
        );
    }

    #[test]
    fn test_group_wire_names_follow_backend_casing() {
        // Host groups are single lowercase words, cluster groups camelCase.
        assert_eq!(
            serde_json::to_string(&HostValidationGroup::Hardware).unwrap(),
            r#""hardware""#
        );
        assert_eq!(
            serde_json::to_string(&ClusterValidationGroup::HostsData).unwrap(),
            r#""hostsData""#
        );
    }

    #[test]
    fn test_validations_info_roundtrip() {
        let mut info = HostValidationsInfo::new();
        info.insert(
            HostValidationGroup::Network,
            vec![Validation::new(
                HostValidationId::HasDefaultRoute,
                ValidationStatus::Success,
                "Host has a default route",
            )],
        );

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""network""#));
        assert!(json.contains(r#""has-default-route""#));

        let parsed: HostValidationsInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, parsed);
    }

    #[test]
    fn test_message_defaults_to_empty() {
        let json = r#"{"id":"sufficient-masters-count","status":"success"}"#;
        let parsed: Validation<ClusterValidationId> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, ClusterValidationId::SufficientMastersCount);
        assert_eq!(parsed.message, "");
    }
}
