//! Closed enumerations for cluster-install validations

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Categories the backend groups cluster validations into
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum ClusterValidationGroup {
    /// Pull secret, base domain, and similar install configuration checks
    Configuration,
    /// Aggregate checks over the set of hosts assigned to the cluster
    HostsData,
    /// Cluster-level networking checks
    Network,
    /// Per-operator requirement checks
    Operators,
}

/// Identifiers of the cluster validations the backend computes
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterValidationId {
    /// The machine network CIDR has been set
    MachineCidrDefined,
    /// The cluster network CIDR has been set
    ClusterCidrDefined,
    /// The service network CIDR has been set
    ServiceCidrDefined,
    /// Machine, cluster, and service networks do not overlap
    NoCidrsOverlapping,
    /// All configured networks share an address family
    NetworksSameAddressFamilies,
    /// The cluster network prefix leaves room for every node
    NetworkPrefixValid,
    /// Machine network CIDR matches the one computed from the hosts
    MachineCidrEqualsToCalculatedCidr,
    /// API virtual IPs have been defined
    ApiVipsDefined,
    /// API virtual IPs belong to the machine network and are free
    ApiVipsValid,
    /// Ingress virtual IPs have been defined
    IngressVipsDefined,
    /// Ingress virtual IPs belong to the machine network and are free
    IngressVipsValid,
    /// Every assigned host is ready to start installation
    AllHostsAreReadyToInstall,
    /// Enough control plane agents are assigned
    SufficientMastersCount,
    /// The base DNS domain has been set
    DnsDomainDefined,
    /// A pull secret has been provided
    PullSecretSet,
    /// An NTP server is configured for the cluster
    NtpServerConfigured,
    /// The selected network type is compatible with the topology
    NetworkTypeValid,
    /// Storage operator requirements are met cluster-wide
    OdfRequirementsSatisfied,
    /// Local-storage operator requirements are met cluster-wide
    LsoRequirementsSatisfied,
    /// Virtualization operator requirements are met cluster-wide
    CnvRequirementsSatisfied,
}
