//! The wizard-step gate: deciding whether a step may advance
//!
//! The gate is a pure, synchronous, idempotent projection over the
//! snapshots it is given. It never retries and holds no state beyond the
//! immutable requirement table it was constructed with; callers re-invoke
//! it whenever a fresher snapshot arrives.

use std::collections::{BTreeMap, BTreeSet};

use crate::crd::{Agent, ClusterInstall};
use crate::status::{agent_status, cluster_status, AgentState, ClusterState};
use crate::validations::host::HostValidationId;
use crate::validations::{
    ClusterValidationsInfo, HostValidationsInfo, Validation, ValidationStatus, ValidationsInfo,
};

use super::requirements::{WizardStepId, WizardStepRequirements};

/// Per-step presentation status for an agent
#[derive(Clone, Debug, PartialEq)]
pub struct StepAgentStatus {
    /// Derived state, upgraded to `known` when the step's host requirements
    /// are already satisfied
    pub state: AgentState,
    /// The agent's validations filtered down to the ids this step requires
    pub validations_info: HostValidationsInfo,
    /// True when the only failing required validations are soft-tagged for
    /// this step; drives the "Some validations failed" sublabel
    pub only_soft_failing: bool,
}

/// Decides whether wizard steps may advance, against a fixed requirement
/// table
///
/// Construct one per table ([`WizardGate::default`] uses the production
/// table) and reuse it for every evaluation; the table is immutable for the
/// life of the gate.
#[derive(Clone, Debug)]
pub struct WizardGate {
    requirements: WizardStepRequirements,
}

impl Default for WizardGate {
    fn default() -> Self {
        Self::new(WizardStepRequirements::production())
    }
}

impl WizardGate {
    /// Create a gate over the given requirement table
    pub fn new(requirements: WizardStepRequirements) -> Self {
        Self { requirements }
    }

    /// The table this gate evaluates against
    pub fn requirements(&self) -> &WizardStepRequirements {
        &self.requirements
    }

    /// Whether the step may advance: the cluster and every relevant agent
    /// must satisfy all of the step's required categories
    pub fn can_advance(
        &self,
        step: WizardStepId,
        cluster_install: &ClusterInstall,
        agents: &[Agent],
    ) -> bool {
        self.cluster_satisfied(step, cluster_install)
            && agents.iter().all(|agent| self.agent_satisfied(step, agent))
    }

    /// Whether the cluster satisfies the step's cluster requirements
    pub fn cluster_satisfied(&self, step: WizardStepId, cluster_install: &ClusterInstall) -> bool {
        let reqs = self.requirements.step(step);
        let info = cluster_validations(cluster_install);
        requirements_satisfied(&info, &reqs.cluster, &reqs.soft_cluster_ids)
    }

    /// Whether one agent satisfies the step's host requirements
    ///
    /// Evaluates the resolver's projection rather than the raw map, so an
    /// agent whose spec failed to sync contributes an empty map and blocks
    /// any non-empty requirement.
    pub fn agent_satisfied(&self, step: WizardStepId, agent: &Agent) -> bool {
        let reqs = self.requirements.step(step);
        let projection = agent_status(agent, false);
        requirements_satisfied(&projection.validations_info, &reqs.host, &reqs.soft_host_ids)
    }

    /// Whether the only reason the cluster fails the step is soft-tagged
    /// failures
    ///
    /// Presentation-only: never consulted by [`WizardGate::can_advance`].
    pub fn is_only_soft_failing_cluster(
        &self,
        cluster_install: &ClusterInstall,
        step: WizardStepId,
    ) -> bool {
        let reqs = self.requirements.step(step);
        let info = cluster_validations(cluster_install);
        only_soft_failing(&info, &reqs.cluster, &reqs.soft_cluster_ids)
    }

    /// Whether the only reason the agent fails the step is soft-tagged
    /// failures
    pub fn is_only_soft_failing_agent(&self, agent: &Agent, step: WizardStepId) -> bool {
        let reqs = self.requirements.step(step);
        let projection = agent_status(agent, false);
        only_soft_failing(&projection.validations_info, &reqs.host, &reqs.soft_host_ids)
    }

    /// Per-step presentation status for an agent
    ///
    /// An `insufficient` or `pending-for-input` agent that already satisfies
    /// this step's host requirements presents as `known` here; the raw
    /// resolver state is about the whole installation, not this step.
    /// `discovered` and `spec-sync-err` agents pass through untouched.
    pub fn step_agent_status(
        &self,
        step: WizardStepId,
        agent: &Agent,
        exclude_discovered: bool,
    ) -> StepAgentStatus {
        let projection = agent_status(agent, exclude_discovered);
        if matches!(
            projection.state,
            AgentState::Discovered | AgentState::SpecSyncErr
        ) {
            return StepAgentStatus {
                state: projection.state,
                validations_info: projection.validations_info,
                only_soft_failing: false,
            };
        }

        let reqs = self.requirements.step(step);
        let satisfied =
            requirements_satisfied(&projection.validations_info, &reqs.host, &reqs.soft_host_ids);
        let state = match projection.state {
            AgentState::Insufficient | AgentState::PendingForInput if satisfied => {
                AgentState::Known
            }
            state => state,
        };
        let only_soft_failing =
            only_soft_failing(&projection.validations_info, &reqs.host, &reqs.soft_host_ids);
        let validations_info = filter_validations(&projection.validations_info, &reqs.host);

        StepAgentStatus {
            state,
            validations_info,
            only_soft_failing,
        }
    }

    /// Per-step presentation status for the cluster
    ///
    /// An `insufficient` or `pending-for-input` cluster whose step
    /// requirements (including every agent's) are already satisfied presents
    /// as `ready` for this step; other states pass through.
    pub fn step_cluster_status(
        &self,
        step: WizardStepId,
        cluster_install: &ClusterInstall,
        agents: &[Agent],
    ) -> ClusterState {
        let projection = cluster_status(cluster_install);
        match projection.state {
            ClusterState::Insufficient | ClusterState::PendingForInput
                if self.can_advance(step, cluster_install, agents) =>
            {
                ClusterState::Ready
            }
            state => state,
        }
    }

    /// An agent validation map filtered down to the step's required ids
    pub fn step_host_validations(
        &self,
        step: WizardStepId,
        info: &HostValidationsInfo,
    ) -> HostValidationsInfo {
        filter_validations(info, &self.requirements.step(step).host)
    }

    /// A cluster validation map filtered down to the step's required ids
    pub fn step_cluster_validations(
        &self,
        step: WizardStepId,
        info: &ClusterValidationsInfo,
    ) -> ClusterValidationsInfo {
        filter_validations(info, &self.requirements.step(step).cluster)
    }

    /// Soft-tagged required host ids currently failing in the given map
    pub fn failing_soft_host_ids(
        &self,
        step: WizardStepId,
        info: &HostValidationsInfo,
    ) -> BTreeSet<HostValidationId> {
        let reqs = self.requirements.step(step);
        info.values()
            .flatten()
            .filter(|v| v.status.is_failing() && reqs.soft_host_ids.contains(&v.id))
            .map(|v| v.id)
            .collect()
    }
}

fn cluster_validations(cluster_install: &ClusterInstall) -> ClusterValidationsInfo {
    cluster_install
        .status
        .as_ref()
        .and_then(|s| s.validations_info.clone())
        .unwrap_or_default()
}

fn find_entry<'a, I: Copy + PartialEq>(
    entries: Option<&'a [Validation<I>]>,
    id: I,
) -> Option<&'a Validation<I>> {
    // An id appears at most once per category, so the first hit is the hit.
    entries.and_then(|entries| entries.iter().find(|v| v.id == id))
}

/// Check one category of a validation map against its required id set
///
/// Every required id must have an entry that is `success` or `disabled`,
/// or a soft-tagged `failure`/`error`. `pending` blocks even when
/// soft-tagged, and so does a required id with no entry at all: a check
/// that was never evaluated cannot count as passed, whether the category is
/// missing entirely or present as an empty list. Entries outside `required`
/// are ignored, and an empty required set is vacuously satisfied.
fn category_satisfied<I: Copy + Ord>(
    entries: Option<&[Validation<I>]>,
    required: &BTreeSet<I>,
    soft: &BTreeSet<I>,
) -> bool {
    required.iter().all(|id| match find_entry(entries, *id) {
        None => false,
        Some(entry) => match entry.status {
            ValidationStatus::Success | ValidationStatus::Disabled => true,
            ValidationStatus::Pending => false,
            ValidationStatus::Failure | ValidationStatus::Error => soft.contains(id),
        },
    })
}

/// Conjunction of [`category_satisfied`] over every category in the
/// requirement map
fn requirements_satisfied<G: Ord, I: Copy + Ord>(
    info: &ValidationsInfo<G, I>,
    required: &BTreeMap<G, BTreeSet<I>>,
    soft: &BTreeSet<I>,
) -> bool {
    required.iter().all(|(group, ids)| {
        category_satisfied(info.get(group).map(Vec::as_slice), ids, soft)
    })
}

/// True when at least one soft-tagged required id is failing and nothing
/// else blocks: the step would pass were it not for tolerated failures
fn only_soft_failing<G: Ord, I: Copy + Ord>(
    info: &ValidationsInfo<G, I>,
    required: &BTreeMap<G, BTreeSet<I>>,
    soft: &BTreeSet<I>,
) -> bool {
    let mut soft_failure_seen = false;
    for (group, ids) in required {
        let entries = info.get(group).map(Vec::as_slice);
        for id in ids {
            match find_entry(entries, *id) {
                None => return false,
                Some(entry) => match entry.status {
                    ValidationStatus::Success | ValidationStatus::Disabled => {}
                    ValidationStatus::Pending => return false,
                    ValidationStatus::Failure | ValidationStatus::Error => {
                        if soft.contains(id) {
                            soft_failure_seen = true;
                        } else {
                            return false;
                        }
                    }
                },
            }
        }
    }
    soft_failure_seen
}

fn filter_validations<G: Clone + Ord, I: Copy + Ord>(
    info: &ValidationsInfo<G, I>,
    required: &BTreeMap<G, BTreeSet<I>>,
) -> ValidationsInfo<G, I> {
    let mut filtered = ValidationsInfo::new();
    for (group, entries) in info {
        let Some(ids) = required.get(group) else {
            continue;
        };
        let selected: Vec<_> = entries
            .iter()
            .filter(|v| ids.contains(&v.id))
            .cloned()
            .collect();
        if !selected.is_empty() {
            filtered.insert(group.clone(), selected);
        }
    }
    filtered
}
