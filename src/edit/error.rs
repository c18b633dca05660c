//! Error types for the zone edit flow

use thiserror::Error;

use crate::loader::LoaderError;
use crate::model::ZoneError;
use crate::variation::VariationError;

/// Errors that can occur while editing a zone
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    /// Edit input was neither a zone nor a zone update action
    #[error("zone edition only supports a zone or a zone update action, \"{type_name}\" given")]
    UnsupportedInputType { type_name: String },

    #[error(transparent)]
    Variation(#[from] VariationError),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Loader(#[from] LoaderError),
}

impl EditError {
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedInputType {
            type_name: type_name.into(),
        }
    }

    /// Whether the editor should render an empty or restricted state
    /// rather than failing the request
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Variation(e) => e.is_recoverable(),
            Self::Zone(e) => e.is_recoverable(),
            Self::UnsupportedInputType { .. } | Self::Loader(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentTypeId, ZoneTypeId};
    use crate::variation::Axis;

    #[test]
    fn test_unsupported_display() {
        let err = EditError::unsupported("alloc::string::String");
        insta::assert_snapshot!(
            err.to_string(),
            @r#"zone edition only supports a zone or a zone update action, "alloc::string::String" given"#
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_recoverability_follows_source() {
        let disallowed: EditError = ZoneError::disallowed(
            &ComponentTypeId::new("video"),
            &ZoneTypeId::new("sidebar"),
        )
        .into();
        assert!(disallowed.is_recoverable());

        let invalid: EditError = VariationError::missing_axis(Axis::Theme).into();
        assert!(!invalid.is_recoverable());
    }
}
