//! Error types for the Foundry install engine
//!
//! The decision paths of this crate are total and never fail; errors only
//! arise from spec validation on the CRD types and from parsing
//! user-supplied identifiers. Each variant carries contextual fields to
//! aid debugging in production.

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for install-engine operations
#[derive(Debug, Error)]
pub enum Error {
    /// Validation error for CRD specs
    #[error("validation error for {resource}: {message}")]
    Validation {
        /// Name of the resource with invalid configuration
        resource: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "spec.provisionRequirements.controlPlaneAgents")
        field: Option<String>,
    },

    /// Failure to parse a value into one of the closed enumerations
    #[error("parse error for {kind}: {message}")]
    Parse {
        /// The type being parsed (e.g., "WizardStepId")
        kind: String,
        /// Description of what failed
        message: String,
    },
}

impl Error {
    /// Create a validation error with the given message
    ///
    /// For simple validation errors without resource context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            resource: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with resource context
    pub fn validation_for(resource: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            resource: resource.into(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with resource context and field path
    pub fn validation_for_field(
        resource: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            resource: resource.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a parse error for the given type
    pub fn parse_for(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            kind: kind.into(),
            message: msg.into(),
        }
    }

    /// Get the resource name if this error is associated with a specific resource
    pub fn resource(&self) -> Option<&str> {
        match self {
            Error::Validation { resource, .. } => Some(resource),
            Error::Parse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Story: Spec validation catches misconfigurations with a clear message
    #[test]
    fn story_validation_errors_are_descriptive() {
        let err = Error::validation("control plane agent count must be at least 1");
        assert!(err.to_string().contains("validation error"));
        assert!(err.to_string().contains("at least 1"));
    }

    /// Story: Structured errors include resource context for debugging
    #[test]
    fn story_structured_errors_include_resource_context() {
        let err = Error::validation_for("prod-cluster", "invalid agent count");
        assert!(err.to_string().contains("prod-cluster"));
        assert_eq!(err.resource(), Some("prod-cluster"));

        let err = Error::validation_for_field(
            "test-cluster",
            "spec.provisionRequirements.controlPlaneAgents",
            "must be odd",
        );
        match &err {
            Error::Validation { field, .. } => {
                assert_eq!(
                    field.as_deref(),
                    Some("spec.provisionRequirements.controlPlaneAgents")
                );
            }
            _ => panic!("Expected Validation variant"),
        }
    }

    /// Story: Error helper functions accept both String and &str
    #[test]
    fn story_error_construction_ergonomics() {
        let dynamic_msg = format!("step {} not known", "host-overview");
        let err = Error::parse_for("WizardStepId", dynamic_msg);
        assert!(err.to_string().contains("host-overview"));
        assert!(err.to_string().contains("WizardStepId"));
        assert_eq!(err.resource(), None);
    }

    #[test]
    fn test_unknown_context_constant() {
        let err = Error::validation("test");
        match &err {
            Error::Validation { resource, .. } => assert_eq!(resource, UNKNOWN_CONTEXT),
            _ => panic!("Expected Validation variant"),
        }
    }
}
