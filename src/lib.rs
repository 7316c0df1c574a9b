//! Validation aggregation and wizard-step gating for the Foundry
//! bare-metal cluster installer.
//!
//! Installer resources (cluster installs, host agents, bare-metal hosts)
//! carry independently computed validation results, grouped by category and
//! refreshed by the backend on every poll. This crate interprets those
//! results: the [`status`] resolvers reduce raw conditions, approval flags
//! and validation maps to a single derived state per resource, and the
//! [`wizard::WizardGate`] decides whether the aggregate state of a cluster
//! and its agents permits advancing a wizard step.
//!
//! The crate performs no I/O. Every operation is a synchronous, pure
//! projection over resource snapshots supplied by the caller; watching,
//! patching and rendering belong to the embedding application.

#![deny(missing_docs)]

pub mod crd;
pub mod error;
pub mod status;
pub mod validations;
pub mod wizard;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
