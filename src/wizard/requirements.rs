//! Static per-step validation requirements
//!
//! Which validation ids each wizard step cares about is product
//! configuration, not derived state. The table is built once, handed to
//! [`crate::wizard::WizardGate`] by value, and never mutated afterwards;
//! tests construct fixture tables the same way.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::validations::cluster::{ClusterValidationGroup, ClusterValidationId};
use crate::validations::host::{HostValidationGroup, HostValidationId};

/// Identifier of a wizard step
///
/// Variant order is wizard order; `Ord` drives the fix-step search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStepId {
    /// Name, base domain, and pull secret entry
    ClusterDetails,
    /// Picking already-discovered hosts for the cluster
    HostsSelection,
    /// Watching newly booted hosts appear and get validated
    HostsDiscovery,
    /// Cluster and host networking configuration
    Networking,
    /// Final review before installation starts
    Review,
}

impl WizardStepId {
    /// All steps in wizard order
    pub const ALL: [Self; 5] = [
        Self::ClusterDetails,
        Self::HostsSelection,
        Self::HostsDiscovery,
        Self::Networking,
        Self::Review,
    ];
}

impl fmt::Display for WizardStepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClusterDetails => "cluster-details",
            Self::HostsSelection => "hosts-selection",
            Self::HostsDiscovery => "hosts-discovery",
            Self::Networking => "networking",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

impl FromStr for WizardStepId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cluster-details" => Ok(Self::ClusterDetails),
            "hosts-selection" => Ok(Self::HostsSelection),
            "hosts-discovery" => Ok(Self::HostsDiscovery),
            "networking" => Ok(Self::Networking),
            "review" => Ok(Self::Review),
            _ => Err(crate::Error::parse_for(
                "WizardStepId",
                format!(
                    "unknown step id: {s}, expected one of: cluster-details, \
                     hosts-selection, hosts-discovery, networking, review"
                ),
            )),
        }
    }
}

/// Validation requirements one step places on the cluster and on each host
///
/// Per entity kind and category, the set of validation ids that must be
/// passing before the step may advance. Ids outside these sets are ignored
/// by the gate no matter their status. The soft sets name ids whose
/// `failure` is tolerated for this step (surfaced as a degraded sublabel,
/// never as a block).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepRequirements {
    /// Required cluster validation ids per category
    pub cluster: BTreeMap<ClusterValidationGroup, BTreeSet<ClusterValidationId>>,
    /// Required host validation ids per category
    pub host: BTreeMap<HostValidationGroup, BTreeSet<HostValidationId>>,
    /// Cluster validation ids allowed to fail without blocking this step
    pub soft_cluster_ids: BTreeSet<ClusterValidationId>,
    /// Host validation ids allowed to fail without blocking this step
    pub soft_host_ids: BTreeSet<HostValidationId>,
}

impl StepRequirements {
    /// A step with no requirements; trivially satisfied
    pub const EMPTY: Self = Self {
        cluster: BTreeMap::new(),
        host: BTreeMap::new(),
        soft_cluster_ids: BTreeSet::new(),
        soft_host_ids: BTreeSet::new(),
    };

    /// Create an empty requirement set
    pub fn new() -> Self {
        Self::default()
    }

    /// Require cluster validation ids in a category and return self for chaining
    ///
    /// An empty id list registers the category with no required ids, which
    /// the gate treats as trivially satisfied.
    pub fn require_cluster(
        mut self,
        group: ClusterValidationGroup,
        ids: impl IntoIterator<Item = ClusterValidationId>,
    ) -> Self {
        self.cluster.entry(group).or_default().extend(ids);
        self
    }

    /// Require host validation ids in a category and return self for chaining
    pub fn require_host(
        mut self,
        group: HostValidationGroup,
        ids: impl IntoIterator<Item = HostValidationId>,
    ) -> Self {
        self.host.entry(group).or_default().extend(ids);
        self
    }

    /// Mark cluster validation ids as soft for this step and return self
    pub fn soft_cluster(mut self, ids: impl IntoIterator<Item = ClusterValidationId>) -> Self {
        self.soft_cluster_ids.extend(ids);
        self
    }

    /// Mark host validation ids as soft for this step and return self
    pub fn soft_host(mut self, ids: impl IntoIterator<Item = HostValidationId>) -> Self {
        self.soft_host_ids.extend(ids);
        self
    }
}

// Fallback for steps the table does not mention.
static EMPTY_REQUIREMENTS: StepRequirements = StepRequirements::EMPTY;

/// The full step-to-requirements table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WizardStepRequirements {
    steps: BTreeMap<WizardStepId, StepRequirements>,
}

impl WizardStepRequirements {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one step's requirements and return self for chaining
    pub fn with_step(mut self, id: WizardStepId, requirements: StepRequirements) -> Self {
        self.steps.insert(id, requirements);
        self
    }

    /// Requirements for the given step; empty when the table has none
    pub fn step(&self, id: WizardStepId) -> &StepRequirements {
        self.steps.get(&id).unwrap_or(&EMPTY_REQUIREMENTS)
    }

    /// The shipped production table
    pub fn production() -> Self {
        let host_steps = StepRequirements::new()
            .require_cluster(
                ClusterValidationGroup::HostsData,
                [
                    ClusterValidationId::SufficientMastersCount,
                    ClusterValidationId::OdfRequirementsSatisfied,
                    ClusterValidationId::LsoRequirementsSatisfied,
                    ClusterValidationId::CnvRequirementsSatisfied,
                ],
            )
            .require_host(
                HostValidationGroup::Hardware,
                [
                    HostValidationId::Connected,
                    HostValidationId::OdfRequirementsSatisfied,
                    HostValidationId::LsoRequirementsSatisfied,
                    HostValidationId::CnvRequirementsSatisfied,
                ],
            );

        Self::new()
            .with_step(
                WizardStepId::ClusterDetails,
                StepRequirements::new().require_cluster(
                    ClusterValidationGroup::Configuration,
                    [
                        ClusterValidationId::PullSecretSet,
                        ClusterValidationId::DnsDomainDefined,
                    ],
                ),
            )
            .with_step(WizardStepId::HostsSelection, host_steps.clone())
            .with_step(WizardStepId::HostsDiscovery, host_steps)
            .with_step(
                WizardStepId::Networking,
                StepRequirements::new()
                    .require_cluster(
                        ClusterValidationGroup::Network,
                        [
                            ClusterValidationId::ApiVipsDefined,
                            ClusterValidationId::ApiVipsValid,
                        ],
                    )
                    .require_host(
                        HostValidationGroup::Network,
                        [
                            HostValidationId::NtpSynced,
                            HostValidationId::HasDefaultRoute,
                        ],
                    )
                    .soft_host([HostValidationId::NtpSynced]),
            )
            .with_step(
                WizardStepId::Review,
                StepRequirements::new().require_cluster(
                    ClusterValidationGroup::HostsData,
                    [ClusterValidationId::AllHostsAreReadyToInstall],
                ),
            )
    }

    /// Union of every step's soft cluster ids
    pub fn all_soft_cluster_ids(&self) -> BTreeSet<ClusterValidationId> {
        self.steps
            .values()
            .flat_map(|reqs| reqs.soft_cluster_ids.iter().copied())
            .collect()
    }

    /// Union of every step's soft host ids
    pub fn all_soft_host_ids(&self) -> BTreeSet<HostValidationId> {
        self.steps
            .values()
            .flat_map(|reqs| reqs.soft_host_ids.iter().copied())
            .collect()
    }

    /// First step at or after `minimum_step` whose host requirements mention
    /// the given id
    ///
    /// Used to send the user to the wizard step where a failing host
    /// validation can be fixed.
    pub fn step_for_host_validation(
        &self,
        id: HostValidationId,
        minimum_step: WizardStepId,
    ) -> Option<WizardStepId> {
        self.steps
            .iter()
            .filter(|(step, _)| **step >= minimum_step)
            .find(|(_, reqs)| reqs.host.values().any(|ids| ids.contains(&id)))
            .map(|(step, _)| *step)
    }
}
