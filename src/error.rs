//! Error types for the cascade model.
//!
//! All errors are strongly typed using thiserror. The model is a closed,
//! fully enumerated data system, so the taxonomy is small: a precondition
//! failure the user must see, lookup misses that callers recover from
//! locally, and validation failures for configuration and effect tables.

use thiserror::Error;

/// Fallback text substituted wherever a lookup misses.
pub const NO_DETAILS: &str = "No details available.";

/// Operation attempted in a phase that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// A drug was applied while the cascade was idle.
    #[error("cascade not triggered: trigger the cascade first by applying stimulus")]
    NotTriggered,
}

/// What kind of catalog a lookup was made against.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Drug,
    Readout,
    Node,
    Element,
    Explanation,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Drug => "drug",
            Self::Readout => "readout",
            Self::Node => "node",
            Self::Element => "element",
            Self::Explanation => "explanation",
        };
        f.write_str(name)
    }
}

/// A name was absent from its catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{name}'")]
pub struct LookupMiss {
    /// Catalog that was searched.
    pub kind: LookupKind,
    /// The name that was not found.
    pub name: String,
}

impl LookupMiss {
    /// Creates a lookup miss for `name` in the `kind` catalog.
    #[must_use]
    pub fn new(kind: LookupKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Validation errors for configuration and effect tables.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid session config: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("Effect table has no entry for drug '{drug}'")]
    MissingDrug {
        drug: String,
    },

    #[error("Effect table lists drug '{drug}' more than once")]
    DuplicateDrug {
        drug: String,
    },

    #[error("Drug '{drug}' overrides readout '{readout}' more than once")]
    DuplicateOverride {
        drug: String,
        readout: String,
    },

    #[error("Status '{status}' is not permitted for readout '{readout}'")]
    StatusNotPermitted {
        readout: String,
        status: String,
    },

    #[error("Field '{field}' cannot be empty")]
    EmptyText {
        field: String,
    },

    #[error("Malformed term markup in '{field}': {reason}")]
    MalformedMarkup {
        field: String,
        reason: String,
    },
}

/// Top-level error type.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CascadeError {
    #[error("Precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("Lookup miss: {0}")]
    Lookup(#[from] LookupMiss),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CascadeError {
    /// Returns true if this is a precondition failure.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }

    /// Returns true if this is a lookup miss.
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the user must be told about this error.
    ///
    /// Lookup misses are recovered locally with [`NO_DETAILS`]; only
    /// precondition failures block the user.
    #[must_use]
    pub const fn needs_notice(&self) -> bool {
        self.is_precondition()
    }
}

/// Result type alias for cascade operations.
pub type CascadeResult<T> = Result<T, CascadeError>;
