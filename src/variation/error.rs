//! Error types for variation lookup

use thiserror::Error;

use super::context::{Axis, VariationContext};

/// Errors that can occur while building a context or resolving a variation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VariationError {
    /// A required axis is missing or malformed in the input mapping
    #[error("invalid variation context: axis '{axis}' {reason}")]
    InvalidContext { axis: Axis, reason: String },

    /// No registered variation is eligible for the context
    #[error("no variation matches context {context}")]
    NoMatchingVariation { context: VariationContext },
}

impl VariationError {
    pub fn missing_axis(axis: Axis) -> Self {
        Self::InvalidContext {
            axis,
            reason: "is missing".to_string(),
        }
    }

    pub fn malformed_axis(axis: Axis, reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            axis,
            reason: reason.into(),
        }
    }

    pub fn no_match(context: &VariationContext) -> Self {
        Self::NoMatchingVariation {
            context: context.clone(),
        }
    }

    /// Whether callers should fall back to an empty editing state
    ///
    /// `NoMatchingVariation` is recoverable; `InvalidContext` is an
    /// integration bug and must fail the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoMatchingVariation { .. })
    }
}
