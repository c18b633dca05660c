//! Theme catalog: the component, zone, template and content types of a theme

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{
    ComponentType, ComponentTypeId, ContentTypeId, TemplateTypeId, ThemeId, ZoneType, ZoneTypeId,
};

/// Errors that can occur while populating a catalog
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    /// Same id registered twice for one kind of entity
    #[error("duplicate {kind} definition: {id}")]
    Duplicate { kind: &'static str, id: String },

    /// A zone type refers to a component type that was never declared
    #[error("zone type '{zone_type}' allows unknown component type '{component_type}'")]
    UnknownComponentType {
        zone_type: ZoneTypeId,
        component_type: ComponentTypeId,
    },

    /// A zone type refers to a template type that was never declared
    #[error("zone type '{zone_type}' belongs to unknown template type '{template_type}'")]
    UnknownTemplateType {
        zone_type: ZoneTypeId,
        template_type: TemplateTypeId,
    },
}

/// Everything a theme package declares, indexed by id
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    pub id: ThemeId,
    pub name: String,
    content_types: BTreeMap<ContentTypeId, String>,
    template_types: BTreeMap<TemplateTypeId, String>,
    component_types: BTreeMap<ComponentTypeId, ComponentType>,
    zone_types: BTreeMap<ZoneTypeId, Arc<ZoneType>>,
}

impl ThemeCatalog {
    pub fn new(id: impl Into<ThemeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content_types: BTreeMap::new(),
            template_types: BTreeMap::new(),
            component_types: BTreeMap::new(),
            zone_types: BTreeMap::new(),
        }
    }

    pub fn add_content_type(
        &mut self,
        id: impl Into<ContentTypeId>,
        name: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let id = id.into();
        if self.content_types.contains_key(&id) {
            return Err(CatalogError::Duplicate {
                kind: "content type",
                id: id.0,
            });
        }
        self.content_types.insert(id, name.into());
        Ok(())
    }

    pub fn add_template_type(
        &mut self,
        id: impl Into<TemplateTypeId>,
        name: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let id = id.into();
        if self.template_types.contains_key(&id) {
            return Err(CatalogError::Duplicate {
                kind: "template type",
                id: id.0,
            });
        }
        self.template_types.insert(id, name.into());
        Ok(())
    }

    pub fn add_component_type(&mut self, component_type: ComponentType) -> Result<(), CatalogError> {
        if self.component_types.contains_key(&component_type.id) {
            return Err(CatalogError::Duplicate {
                kind: "component type",
                id: component_type.id.0,
            });
        }
        self.component_types
            .insert(component_type.id.clone(), component_type);
        Ok(())
    }

    /// Register a zone type whose allowed set and template type refer to
    /// already registered entries
    pub fn add_zone_type(&mut self, zone_type: ZoneType) -> Result<Arc<ZoneType>, CatalogError> {
        if self.zone_types.contains_key(&zone_type.id) {
            return Err(CatalogError::Duplicate {
                kind: "zone type",
                id: zone_type.id.0,
            });
        }
        for allowed in zone_type.allowed_component_types() {
            if !self.component_types.contains_key(&allowed.id) {
                return Err(CatalogError::UnknownComponentType {
                    zone_type: zone_type.id.clone(),
                    component_type: allowed.id.clone(),
                });
            }
        }
        if let Some(template_type) = &zone_type.template_type {
            if !self.template_types.contains_key(template_type) {
                return Err(CatalogError::UnknownTemplateType {
                    zone_type: zone_type.id.clone(),
                    template_type: template_type.clone(),
                });
            }
        }

        let zone_type = Arc::new(zone_type);
        self.zone_types
            .insert(zone_type.id.clone(), Arc::clone(&zone_type));
        Ok(zone_type)
    }

    pub fn component_type(&self, id: &ComponentTypeId) -> Option<&ComponentType> {
        self.component_types.get(id)
    }

    pub fn zone_type(&self, id: &ZoneTypeId) -> Option<Arc<ZoneType>> {
        self.zone_types.get(id).cloned()
    }

    pub fn has_content_type(&self, id: &ContentTypeId) -> bool {
        self.content_types.contains_key(id)
    }

    pub fn has_template_type(&self, id: &TemplateTypeId) -> bool {
        self.template_types.contains_key(id)
    }

    pub fn component_types(&self) -> impl Iterator<Item = &ComponentType> {
        self.component_types.values()
    }

    pub fn zone_types(&self) -> impl Iterator<Item = &Arc<ZoneType>> {
        self.zone_types.values()
    }

    /// Zone types declared for a template type
    pub fn zone_types_for(&self, template_type: &TemplateTypeId) -> Vec<Arc<ZoneType>> {
        self.zone_types
            .values()
            .filter(|zt| zt.template_type.as_ref() == Some(template_type))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ThemeCatalog {
        let mut catalog = ThemeCatalog::new("dark", "Dark");
        catalog.add_template_type("full", "Full page").unwrap();
        catalog
            .add_component_type(ComponentType::new("banner", "Banner"))
            .unwrap();
        catalog
    }

    #[test]
    fn test_add_zone_type() {
        let mut catalog = catalog();
        let banner = catalog
            .component_type(&ComponentTypeId::new("banner"))
            .cloned()
            .unwrap();
        catalog
            .add_zone_type(
                ZoneType::new("sidebar", "Sidebar")
                    .with_template_type("full")
                    .allow(banner),
            )
            .expect("Should register");

        assert!(catalog.zone_type(&ZoneTypeId::new("sidebar")).is_some());
        assert_eq!(catalog.zone_types_for(&TemplateTypeId::new("full")).len(), 1);
        assert!(catalog
            .zone_types_for(&TemplateTypeId::new("other"))
            .is_empty());
    }

    #[test]
    fn test_duplicate_component_type() {
        let mut catalog = catalog();
        let err = catalog
            .add_component_type(ComponentType::new("banner", "Again"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { kind: "component type", .. }));
    }

    #[test]
    fn test_unknown_allowed_component_type() {
        let mut catalog = catalog();
        let err = catalog
            .add_zone_type(ZoneType::new("sidebar", "Sidebar").allow(ComponentType::new("video", "Video")))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownComponentType { .. }));
    }

    #[test]
    fn test_unknown_template_type() {
        let mut catalog = catalog();
        let err = catalog
            .add_zone_type(ZoneType::new("sidebar", "Sidebar").with_template_type("half"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTemplateType { .. }));
    }
}
