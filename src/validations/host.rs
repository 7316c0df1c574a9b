//! Closed enumerations for host-agent validations

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Categories the backend groups host validations into
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum HostValidationGroup {
    /// CPU, memory, and disk checks
    Hardware,
    /// Connectivity, addressing, and DNS checks
    Network,
    /// Per-operator requirement checks
    Operators,
    /// Discovery-service and image availability checks
    Infrastructure,
}

/// Identifiers of the host validations the backend computes
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(rename_all = "kebab-case")]
pub enum HostValidationId {
    /// The agent has recently contacted the install service
    Connected,
    /// The discovery media is still attached
    MediaConnected,
    /// The agent has reported a hardware inventory
    HasInventory,
    /// Minimum CPU core count is met
    HasMinCpuCores,
    /// At least one installable disk is present
    HasMinValidDisks,
    /// Minimum memory is met
    HasMinMemory,
    /// The machine network CIDR has been set
    MachineCidrDefined,
    /// CPU core count fits the assigned role
    HasCpuCoresForRole,
    /// Memory fits the assigned role
    HasMemoryForRole,
    /// Hostname is unique within the cluster
    HostnameUnique,
    /// Hostname is syntactically valid and not a forbidden name
    HostnameValid,
    /// Host has an address inside the machine network CIDR
    BelongsToMachineCidr,
    /// The ignition payload is reachable from the host
    IgnitionDownloadable,
    /// Host is part of the majority connectivity group
    BelongsToMajorityGroup,
    /// Platform network settings are compatible with installation
    ValidPlatformNetworkSettings,
    /// Host clock is synchronized via NTP
    NtpSynced,
    /// Required container images can be pulled
    ContainerImagesAvailable,
    /// Installation disk is fast enough
    SufficientInstallationDiskSpeed,
    /// API domain name resolves correctly
    ApiDomainNameResolvedCorrectly,
    /// Internal API domain name resolves correctly
    ApiIntDomainNameResolvedCorrectly,
    /// Wildcard apps domain resolves correctly
    AppsDomainNameResolvedCorrectly,
    /// No stray DNS wildcard configuration is present
    DnsWildcardNotConfigured,
    /// Host has a default route
    HasDefaultRoute,
    /// Network latency to other hosts fits the assigned role
    SufficientNetworkLatencyRequirementForRole,
    /// Packet loss to other hosts fits the assigned role
    SufficientPacketLossRequirementForRole,
    /// Storage operator requirements are met on this host
    OdfRequirementsSatisfied,
    /// Local-storage operator requirements are met on this host
    LsoRequirementsSatisfied,
    /// Virtualization operator requirements are met on this host
    CnvRequirementsSatisfied,
    /// Disk encryption requirements are met on this host
    DiskEncryptionRequirementsSatisfied,
}
