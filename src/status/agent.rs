//! Host/agent status resolution
//!
//! The branch order here is an invariant, not a style choice: a spec sync
//! failure means every other reported field may be stale, so it suppresses
//! both the state and the validation map; and an unapproved host must
//! surface as `discovered` before any computed state, so it can never be
//! mistaken for a validated one.

use crate::crd::types::ConditionStatus;
use crate::crd::{Agent, AgentConditionType, StatusCondition};
use crate::validations::HostValidationsInfo;

use super::AgentState;

/// Derived status of an agent: one state key plus the validation map the
/// state was computed against
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStatusProjection {
    /// Derived state key
    pub state: AgentState,
    /// Validations backing the state; empty when the agent spec failed to sync
    pub validations_info: HostValidationsInfo,
}

fn find_condition(
    agent: &Agent,
    type_: AgentConditionType,
) -> Option<&StatusCondition<AgentConditionType>> {
    agent
        .status
        .as_ref()?
        .conditions
        .iter()
        .find(|c| c.type_ == type_)
}

/// Reduce an agent's conditions, approval flag, and reported state to a
/// single state key
///
/// `exclude_discovered` suppresses the unapproved-to-`discovered` mapping
/// for callers that already operate on approved agents only.
pub fn agent_state_key(agent: &Agent, exclude_discovered: bool) -> AgentState {
    let spec_sync_failed = find_condition(agent, AgentConditionType::SpecSynced)
        .is_some_and(|c| c.status == ConditionStatus::False);
    if spec_sync_failed {
        return AgentState::SpecSyncErr;
    }

    if !exclude_discovered && !agent.spec.approved {
        return AgentState::Discovered;
    }

    agent
        .status
        .as_ref()
        .and_then(|s| s.debug_info.as_ref())
        .and_then(|d| d.state)
        .unwrap_or_else(|| {
            // No computed state yet: an unassigned host is not in the same
            // bucket as one mid-binding.
            if agent.spec.is_bound() {
                AgentState::Insufficient
            } else {
                AgentState::InsufficientUnbound
            }
        })
}

/// Resolve an agent to its derived state and the validation map backing it
pub fn agent_status(agent: &Agent, exclude_discovered: bool) -> AgentStatusProjection {
    let state = agent_state_key(agent, exclude_discovered);
    let validations_info = if state == AgentState::SpecSyncErr {
        HostValidationsInfo::new()
    } else {
        agent
            .status
            .as_ref()
            .and_then(|s| s.validations_info.clone())
            .unwrap_or_default()
    };
    AgentStatusProjection {
        state,
        validations_info,
    }
}

/// Derive an agent state from its conditions alone
///
/// Fallback path for callers that have conditions but no backend debug
/// state. Returns the state together with the matched condition's message.
pub fn agent_state_from_conditions(agent: &Agent) -> (AgentState, String) {
    let installed = find_condition(agent, AgentConditionType::Installed);
    let connected = find_condition(agent, AgentConditionType::Connected);
    let ready = find_condition(agent, AgentConditionType::ReadyForInstallation);

    if let Some(c) = installed {
        match c.status {
            ConditionStatus::True => return (AgentState::Installed, c.message_or_default()),
            ConditionStatus::False if c.has_reason("InstallationFailed") => {
                return (AgentState::Error, c.message_or_default());
            }
            ConditionStatus::False if c.has_reason("InstallationInProgress") => {
                return (AgentState::Installing, c.message_or_default());
            }
            _ => {}
        }
    }
    if let Some(c) = connected {
        if c.status == ConditionStatus::False {
            return (AgentState::Disconnected, c.message_or_default());
        }
    }
    if let Some(c) = ready {
        match c.status {
            ConditionStatus::True => return (AgentState::Known, c.message_or_default()),
            ConditionStatus::False if c.has_reason("AgentIsNotApproved") => {
                return (AgentState::PendingForInput, c.message_or_default());
            }
            ConditionStatus::False if c.has_reason("AgentNotReady") => {
                return (AgentState::Insufficient, c.message_or_default());
            }
            _ => {}
        }
    }

    (
        AgentState::Insufficient,
        "The agent is in an unexpected condition state.".to_string(),
    )
}
