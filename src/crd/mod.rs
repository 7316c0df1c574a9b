//! Custom resource definitions for the Foundry installer
//!
//! These types are snapshots observed by the engine, never owned by it:
//! the embedding application watches them from the API server and hands
//! immutable copies to the resolvers and the wizard gate.

pub mod agent;
pub mod bare_metal_host;
pub mod cluster_install;
pub mod types;

pub use agent::{Agent, AgentConditionType, AgentRole, AgentSpec, AgentStatus};
pub use bare_metal_host::{
    BareMetalHost, BareMetalHostSpec, BareMetalHostStatus, ProvisioningState, ProvisioningStatus,
};
pub use cluster_install::{
    ClusterInstall, ClusterInstallConditionType, ClusterInstallSpec, ClusterInstallStatus,
    ProvisionRequirements,
};
pub use types::{ClusterReference, ConditionStatus, DebugInfo, StatusCondition};
