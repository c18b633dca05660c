//! Zonekit - theme zones, components and variation resolution
//!
//! Themes contain template types, template types contain zones, zones
//! contain components. Each component is rendered with a *variation*: the
//! configuration picked by matching the rendering context (theme, content
//! type, template type, zone type, component type) against the theme's
//! registered variations.
//!
//! # Example
//!
//! ```rust
//! use zonekit::{ThemeEngine, VariationContext, ZoneEditOptions};
//!
//! let engine = ThemeEngine::from_str(r#"
//!     [theme]
//!     id = "dark"
//!
//!     [[component_types]]
//!     id = "banner"
//!
//!     [[zone_types]]
//!     id = "sidebar"
//!     allowed = ["banner"]
//!
//!     [[variations]]
//!     zone_type = "sidebar"
//!     template = "sidebar.html"
//! "#).unwrap();
//!
//! let context = VariationContext::new("dark", "article", "full", "sidebar");
//! assert_eq!(engine.resolve(&context).unwrap().template(), Some("sidebar.html"));
//!
//! let session = engine
//!     .open_zone(&"sidebar".into(), &ZoneEditOptions::new("dark", "article", "full"))
//!     .unwrap();
//! assert!(session.can_add_components());
//! ```

pub mod catalog;
pub mod config;
pub mod edit;
pub mod loader;
pub mod logging;
pub mod model;
pub mod variation;

pub use catalog::{CatalogError, ThemeCatalog};
pub use config::{ConfigError, ThemeConfig};
pub use edit::{EditError, EditInput, UpdateAction, ZoneEditOptions, ZoneEditSession, ZoneEditor};
pub use loader::{ComponentLoader, Criteria, LoaderError};
pub use model::{Component, ComponentType, Zone, ZoneError, ZoneType, ZoneTypeId};
pub use variation::{Variation, VariationContext, VariationError, VariationResolver};

use std::path::Path;

use thiserror::Error;

/// Errors surfaced by [`ThemeEngine`]
#[derive(Debug, Error)]
pub enum Error {
    /// Theme file could not be loaded
    #[error("theme configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Zone edit failed
    #[error("zone edit error: {0}")]
    Edit(#[from] EditError),

    /// Zone type is not declared by the theme
    #[error("unknown zone type '{0}'")]
    UnknownZoneType(ZoneTypeId),
}

/// A loaded theme ready to resolve variations and edit zones
#[derive(Debug, Clone)]
pub struct ThemeEngine {
    config: ThemeConfig,
    editor: ZoneEditor,
}

impl ThemeEngine {
    pub fn new(config: ThemeConfig) -> Self {
        let editor = ZoneEditor::new(config.variation_resolver());
        Self { config, editor }
    }

    /// Load the theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        Ok(Self::new(ThemeConfig::from_file(path)?))
    }

    /// Load the theme from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(source: &str) -> Result<Self, Error> {
        Ok(Self::new(ThemeConfig::from_str(source)?))
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.config.catalog
    }

    pub fn resolver(&self) -> &VariationResolver {
        self.editor.resolver()
    }

    pub fn editor(&self) -> &ZoneEditor {
        &self.editor
    }

    /// Resolve the variation for a context
    pub fn resolve(&self, context: &VariationContext) -> Result<Variation, VariationError> {
        self.resolver().resolve(context)
    }

    /// An empty zone of a declared zone type
    pub fn new_zone(&self, zone_type: &ZoneTypeId) -> Result<Zone, Error> {
        self.catalog()
            .zone_type(zone_type)
            .map(Zone::new)
            .ok_or_else(|| Error::UnknownZoneType(zone_type.clone()))
    }

    /// Open an edit session on an empty zone of the given type
    pub fn open_zone(
        &self,
        zone_type: &ZoneTypeId,
        options: &ZoneEditOptions,
    ) -> Result<ZoneEditSession, Error> {
        let zone = self.new_zone(zone_type)?;
        Ok(self.editor.open(zone.into(), options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"
        [theme]
        id = "dark"

        [[component_types]]
        id = "banner"

        [[zone_types]]
        id = "sidebar"
        allowed = ["banner"]
    "#;

    #[test]
    fn test_unknown_zone_type() {
        let engine = ThemeEngine::from_str(THEME).unwrap();
        let err = engine.new_zone(&ZoneTypeId::new("header")).unwrap_err();
        assert!(matches!(err, Error::UnknownZoneType(_)));
        assert_eq!(err.to_string(), "unknown zone type 'header'");
    }

    #[test]
    fn test_open_zone_without_variations() {
        let engine = ThemeEngine::from_str(THEME).unwrap();
        let session = engine
            .open_zone(
                &ZoneTypeId::new("sidebar"),
                &ZoneEditOptions::new("dark", "article", "full"),
            )
            .unwrap();
        assert!(!session.can_add_components());
        assert_eq!(session.view().component_types.len(), 1);
    }

    #[test]
    fn test_config_error_wrapped() {
        let err = ThemeEngine::from_str("[theme]").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
