//! Wizard-step gating: requirement tables and the advance decision
//!
//! The requirement table declares, per step, which validation ids must be
//! passing on the cluster and on every relevant host. The gate evaluates
//! entity snapshots against that table and answers two questions: may the
//! step advance, and is the step merely degraded by tolerated failures.

pub mod gate;
pub mod requirements;

pub use gate::{StepAgentStatus, WizardGate};
pub use requirements::{StepRequirements, WizardStepId, WizardStepRequirements};
