//! Error types for tree resolution.
//!
//! Resolution distinguishes three failure shapes: a property that exists but
//! has the wrong type or layout ([`ResolveError::MalformedProperty`]), a
//! property or reference that is absent where one was required
//! ([`ResolveError::PropertyNotFound`]), and a link-name template that fails
//! to render ([`ResolveError::NameFormat`]).
//!
//! Clock acquisition has its own error type, [`crate::clock::ClockError`],
//! which callers never see: [`crate::clock::resolve_clock`] treats every
//! acquisition failure as a soft fallback to the next source.

use thiserror::Error;

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors surfaced by the resolution functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A property exists but its value has the wrong type or layout.
    #[error("malformed property '{property}': {message}")]
    MalformedProperty {
        /// Name of the offending property.
        property: String,
        /// What was wrong with it.
        message: String,
    },

    /// A property or reference is absent where one was required.
    #[error("property '{property}' not found")]
    PropertyNotFound {
        /// Name of the missing property.
        property: String,
    },

    /// A link-name template failed to render.
    #[error("name template error: {message}")]
    NameFormat {
        /// Renderer diagnostic.
        message: String,
    },
}

impl ResolveError {
    /// Build a [`ResolveError::MalformedProperty`] for `property`.
    pub fn malformed(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedProperty {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Build a [`ResolveError::PropertyNotFound`] for `property`.
    pub fn not_found(property: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            property: property.into(),
        }
    }

    /// Check if this error is an absent property or reference.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }

    /// Check if this error is a present-but-malformed property.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedProperty { .. })
    }
}
