//! Theme configuration files
//!
//! A theme is described by a TOML document declaring its content types,
//! template types, component types, zone types and the ordered list of
//! variations. Variations are registered in document order.
//!
//! ```toml
//! [theme]
//! id = "dark"
//! name = "Dark"
//!
//! [resolver]
//! tie_break = "first-registered"
//!
//! [[component_types]]
//! id = "banner"
//! name = "Banner"
//!
//! [[zone_types]]
//! id = "sidebar"
//! name = "Sidebar"
//! allowed = ["banner"]
//!
//! [[variations]]
//! zone_type = "sidebar"
//! template = "sidebar.html"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{CatalogError, ThemeCatalog};
use crate::model::{ComponentType, ComponentTypeId, ContentTypeId, TemplateTypeId, ZoneType, ZoneTypeId};
use crate::variation::{
    Axis, Pins, ResolverConfig, VariationDefinition, VariationPayload, VariationRegistry,
    VariationResolver,
};

/// Errors that can occur when loading a theme file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse theme TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid theme: {0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid variation #{index}: {message}")]
    InvalidVariation { index: usize, message: String },
}

/// A loaded theme: its catalog, its variations and resolver settings
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub catalog: ThemeCatalog,
    pub registry: VariationRegistry,
    pub resolver: ResolverConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTheme {
    theme: TomlMetadata,
    #[serde(default)]
    resolver: ResolverConfig,
    #[serde(default)]
    content_types: Vec<TomlEntry>,
    #[serde(default)]
    template_types: Vec<TomlEntry>,
    #[serde(default)]
    component_types: Vec<TomlEntry>,
    #[serde(default)]
    zone_types: Vec<TomlZoneType>,
    #[serde(default)]
    variations: Vec<TomlVariation>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlMetadata {
    id: String,
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEntry {
    id: String,
    name: Option<String>,
}

impl TomlEntry {
    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlZoneType {
    id: String,
    name: Option<String>,
    template_type: Option<String>,
    #[serde(default)]
    allowed: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlVariation {
    name: Option<String>,
    theme: Option<String>,
    content_type: Option<String>,
    template_type: Option<String>,
    zone_type: Option<String>,
    component_type: Option<String>,
    template: Option<String>,
    #[serde(default)]
    options: BTreeMap<String, toml::Value>,
}

impl ThemeConfig {
    /// Load a theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a theme from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        let mut catalog = ThemeCatalog::new(
            parsed.theme.id.as_str(),
            parsed
                .theme
                .name
                .clone()
                .unwrap_or_else(|| parsed.theme.id.clone()),
        );
        for entry in &parsed.content_types {
            catalog.add_content_type(entry.id.as_str(), entry.display_name())?;
        }
        for entry in &parsed.template_types {
            catalog.add_template_type(entry.id.as_str(), entry.display_name())?;
        }
        for entry in &parsed.component_types {
            catalog.add_component_type(ComponentType::new(entry.id.as_str(), entry.display_name()))?;
        }
        for zt in &parsed.zone_types {
            catalog.add_zone_type(build_zone_type(&catalog, zt)?)?;
        }

        let mut registry = VariationRegistry::new();
        for (index, variation) in parsed.variations.into_iter().enumerate() {
            registry.register(build_variation(&catalog, index, variation)?);
        }

        info!(
            theme = %catalog.id,
            zone_types = catalog.zone_types().count(),
            component_types = catalog.component_types().count(),
            variations = registry.len(),
            "theme loaded"
        );

        Ok(Self {
            catalog,
            registry,
            resolver: parsed.resolver,
        })
    }

    /// A resolver over this theme's variations
    pub fn variation_resolver(&self) -> VariationResolver {
        VariationResolver::with_config(self.registry.clone(), self.resolver.clone())
    }
}

fn build_zone_type(catalog: &ThemeCatalog, zt: &TomlZoneType) -> Result<ZoneType, CatalogError> {
    let zone_id = ZoneTypeId::new(zt.id.as_str());
    let mut zone_type = ZoneType::new(
        zone_id.clone(),
        zt.name.clone().unwrap_or_else(|| zt.id.clone()),
    );
    if let Some(template_type) = &zt.template_type {
        zone_type = zone_type.with_template_type(template_type.as_str());
    }
    for allowed in &zt.allowed {
        let id = ComponentTypeId::new(allowed.as_str());
        let component_type = catalog
            .component_type(&id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownComponentType {
                zone_type: zone_id.clone(),
                component_type: id.clone(),
            })?;
        zone_type = zone_type.allow(component_type);
    }
    Ok(zone_type)
}

fn build_variation(
    catalog: &ThemeCatalog,
    index: usize,
    raw: TomlVariation,
) -> Result<VariationDefinition, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidVariation { index, message };

    if let Some(theme) = &raw.theme {
        if theme.as_str() != catalog.id.as_str() {
            warn!(index, pinned = %theme, theme = %catalog.id, "variation pinned to another theme");
        }
    }
    if let Some(id) = &raw.content_type {
        if !catalog.has_content_type(&ContentTypeId::new(id.as_str())) {
            return Err(invalid(format!("unknown content type '{}'", id)));
        }
    }
    if let Some(id) = &raw.template_type {
        if !catalog.has_template_type(&TemplateTypeId::new(id.as_str())) {
            return Err(invalid(format!("unknown template type '{}'", id)));
        }
    }
    if let Some(id) = &raw.zone_type {
        if catalog.zone_type(&ZoneTypeId::new(id.as_str())).is_none() {
            return Err(invalid(format!("unknown zone type '{}'", id)));
        }
    }
    if let Some(id) = &raw.component_type {
        if catalog.component_type(&ComponentTypeId::new(id.as_str())).is_none() {
            return Err(invalid(format!("unknown component type '{}'", id)));
        }
    }

    let mut pins = Pins::any();
    for (axis, value) in [
        (Axis::Theme, raw.theme),
        (Axis::ContentType, raw.content_type),
        (Axis::TemplateType, raw.template_type),
        (Axis::ZoneType, raw.zone_type),
        (Axis::ComponentType, raw.component_type),
    ] {
        if let Some(value) = value {
            pins = pins.pin(axis, value);
        }
    }

    let definition = VariationDefinition::new(
        pins,
        VariationPayload {
            template: raw.template,
            options: raw.options,
        },
    );
    Ok(match raw.name {
        Some(name) => definition.named(name),
        None => definition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variation::{TieBreak, VariationContext};

    const THEME: &str = r#"
[theme]
id = "dark"
name = "Dark"

[resolver]
tie_break = "last-registered"

[[content_types]]
id = "article"

[[template_types]]
id = "full"
name = "Full page"

[[component_types]]
id = "banner"
name = "Banner"

[[component_types]]
id = "text"
name = "Text block"

[[zone_types]]
id = "sidebar"
name = "Sidebar"
template_type = "full"
allowed = ["banner", "text"]

[[variations]]
name = "default"
template = "default.html"

[[variations]]
name = "sidebar"
zone_type = "sidebar"
template = "sidebar.html"
[variations.options]
columns = 1
"#;

    #[test]
    fn test_load_theme() {
        let config = ThemeConfig::from_str(THEME).expect("Should parse");
        assert_eq!(config.catalog.id.as_str(), "dark");
        assert_eq!(config.catalog.name, "Dark");
        assert_eq!(config.registry.len(), 2);
        assert_eq!(config.resolver.tie_break, TieBreak::LastRegistered);

        let sidebar = config
            .catalog
            .zone_type(&ZoneTypeId::new("sidebar"))
            .expect("sidebar declared");
        assert_eq!(sidebar.allowed_component_types().len(), 2);
        assert_eq!(sidebar.allowed_component_types()[1].name, "Text block");
    }

    #[test]
    fn test_resolver_from_theme() {
        let config = ThemeConfig::from_str(THEME).unwrap();
        let variation = config
            .variation_resolver()
            .resolve(&VariationContext::new("dark", "article", "full", "sidebar"))
            .unwrap();
        assert_eq!(variation.name.as_deref(), Some("sidebar"));
        assert_eq!(variation.option("columns"), Some(&toml::Value::Integer(1)));
    }

    #[test]
    fn test_unknown_allowed_component_type() {
        let source = r#"
[theme]
id = "dark"

[[zone_types]]
id = "sidebar"
allowed = ["video"]
"#;
        let err = ThemeConfig::from_str(source).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(CatalogError::UnknownComponentType { .. })
        ));
    }

    #[test]
    fn test_unknown_zone_type_in_variation() {
        let source = r#"
[theme]
id = "dark"

[[variations]]
zone_type = "header"
"#;
        let err = ThemeConfig::from_str(source).unwrap_err();
        match err {
            ConfigError::InvalidVariation { index, message } => {
                assert_eq!(index, 0);
                assert!(message.contains("header"));
            }
            other => panic!("Expected InvalidVariation, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_component_type() {
        let source = r#"
[theme]
id = "dark"

[[component_types]]
id = "banner"

[[component_types]]
id = "banner"
"#;
        let err = ThemeConfig::from_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::Catalog(CatalogError::Duplicate { .. })));
    }

    #[test]
    fn test_misspelled_pin_rejected() {
        let source = r#"
[theme]
id = "dark"

[[zone_types]]
id = "sidebar"

[[variations]]
zone = "sidebar"
template = "sidebar.html"
"#;
        let err = ThemeConfig::from_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("zone"));
    }

    #[test]
    fn test_unknown_zone_type_key_rejected() {
        let source = r#"
[theme]
id = "dark"

[[zone_types]]
id = "sidebar"
allow = ["banner"]
"#;
        assert!(matches!(
            ThemeConfig::from_str(source),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = ThemeConfig::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = ThemeConfig::from_file(Path::new("/nonexistent/theme.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
