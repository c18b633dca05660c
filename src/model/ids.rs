//! Identifier newtypes for theme entities

use serde::{Deserialize, Serialize};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

identifier!(
    /// Top-level visual/structural package
    ThemeId
);
identifier!(
    /// Kind of content being rendered (article, product, ...)
    ContentTypeId
);
identifier!(
    /// Page layout kind within a theme
    TemplateTypeId
);
identifier!(
    /// Named placement region within a template type
    ZoneTypeId
);
identifier!(
    /// Kind of placeable content unit
    ComponentTypeId
);
identifier!(ComponentId);
