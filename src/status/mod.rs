//! Status resolution: reducing raw resource fields to a single derived state
//!
//! The state of an installer resource is never stored; it is recomputed
//! from the resource's conditions, flags, and backend-reported debug state
//! on every evaluation. Each resolver here is total: any input snapshot
//! maps to a defined state, with conservative defaults when source fields
//! are missing.

pub mod agent;
pub mod bare_metal_host;
pub mod cluster;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use agent::{agent_state_from_conditions, agent_state_key, agent_status, AgentStatusProjection};
pub use bare_metal_host::{bmh_status, BmhStatusProjection};
pub use cluster::{
    cluster_state_from_conditions, cluster_status, is_draft, ClusterStatusProjection,
};

/// Derived state of a host agent
///
/// The `*-unbound` variants distinguish hosts that are not assigned to any
/// cluster from hosts mid-binding; the two must not share a bucket.
/// `discovered` and `spec-sync-err` are synthesized by the resolver and
/// never reported by the backend directly.
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum AgentState {
    /// Bound to a cluster but failing validations
    Insufficient,
    /// Not bound to any cluster and failing validations
    InsufficientUnbound,
    /// Waiting for user-provided configuration
    PendingForInput,
    /// Bound, validated, and ready for installation
    Known,
    /// Validated but not bound to any cluster
    KnownUnbound,
    /// Hardware and network discovery in progress
    Discovering,
    /// Discovery in progress, not bound to any cluster
    DiscoveringUnbound,
    /// The agent has stopped reporting
    Disconnected,
    /// Stopped reporting, not bound to any cluster
    DisconnectedUnbound,
    /// Binding to a cluster is in progress
    Binding,
    /// Unbinding from a cluster is in progress
    Unbinding,
    /// Getting ready to start installation
    PreparingForInstallation,
    /// Installation has started
    Installing,
    /// Installation is progressing on the host
    InstallingInProgress,
    /// Installation is paused waiting for the user
    InstallingPendingUserAction,
    /// Installation finished successfully
    Installed,
    /// Installation failed
    Error,
    /// Installation was cancelled
    Cancelled,
    /// Discovered but not yet approved for use
    Discovered,
    /// The declared spec failed to reconcile; reported state is stale
    SpecSyncErr,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Insufficient => "insufficient",
            Self::InsufficientUnbound => "insufficient-unbound",
            Self::PendingForInput => "pending-for-input",
            Self::Known => "known",
            Self::KnownUnbound => "known-unbound",
            Self::Discovering => "discovering",
            Self::DiscoveringUnbound => "discovering-unbound",
            Self::Disconnected => "disconnected",
            Self::DisconnectedUnbound => "disconnected-unbound",
            Self::Binding => "binding",
            Self::Unbinding => "unbinding",
            Self::PreparingForInstallation => "preparing-for-installation",
            Self::Installing => "installing",
            Self::InstallingInProgress => "installing-in-progress",
            Self::InstallingPendingUserAction => "installing-pending-user-action",
            Self::Installed => "installed",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
            Self::Discovered => "discovered",
            Self::SpecSyncErr => "spec-sync-err",
        };
        write!(f, "{s}")
    }
}

/// Derived state of a cluster install
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterState {
    /// Validations are failing or hosts are missing
    Insufficient,
    /// Waiting for user-provided configuration
    PendingForInput,
    /// All requirements met; installation may start
    Ready,
    /// Getting ready to start installation
    PreparingForInstallation,
    /// Installation is running
    Installing,
    /// Cluster operators are being finalized
    Finalizing,
    /// Installation finished successfully
    Installed,
    /// Installed cluster is accepting additional hosts
    AddingHosts,
    /// Installation was cancelled
    Cancelled,
    /// Installation failed
    Error,
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Insufficient => "insufficient",
            Self::PendingForInput => "pending-for-input",
            Self::Ready => "ready",
            Self::PreparingForInstallation => "preparing-for-installation",
            Self::Installing => "installing",
            Self::Finalizing => "finalizing",
            Self::Installed => "installed",
            Self::AddingHosts => "adding-hosts",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Derived state of a bare-metal host record
///
/// Bare-metal hosts have no validation map, only a linear provisioning
/// state machine with a single overriding error flag.
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum BmhState {
    /// The host controller reported a hardware error
    BmhError,
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
    /// No provisioning activity has been reported yet
    Pending,
}

impl fmt::Display for BmhState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BmhError => "bmh-error",
            Self::Registering => "registering",
            Self::Inspecting => "inspecting",
            Self::Provisioning => "provisioning",
            Self::Provisioned => "provisioned",
            Self::Deprovisioning => "deprovisioning",
            Self::Pending => "pending",
        };
        write!(f, "{s}")
    }
}
