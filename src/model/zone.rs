//! Zone types and zone instances

use std::sync::Arc;

use thiserror::Error;

use super::component::{Component, ComponentType};
use crate::variation::VariationPayload;
use super::ids::{ComponentId, ComponentTypeId, TemplateTypeId, ZoneTypeId};

/// Errors raised when mutating a zone's contents
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZoneError {
    /// Component type is not in the zone type's allowed set
    #[error("component type '{component_type}' is not allowed in zone type '{zone_type}'")]
    DisallowedComponentType {
        component_type: ComponentTypeId,
        zone_type: ZoneTypeId,
    },

    /// No component with this id in the zone
    #[error("component '{id}' not found in zone")]
    ComponentNotFound { id: ComponentId },

    /// Insert or move target beyond the end of the sequence
    #[error("position {position} out of range for zone with {len} components")]
    PositionOutOfRange { position: usize, len: usize },

    /// A component with this id is already placed in the zone
    #[error("component '{id}' is already in zone")]
    DuplicateComponent { id: ComponentId },
}

impl ZoneError {
    pub fn disallowed(component_type: &ComponentTypeId, zone_type: &ZoneTypeId) -> Self {
        Self::DisallowedComponentType {
            component_type: component_type.clone(),
            zone_type: zone_type.clone(),
        }
    }

    /// Whether the editor should show a restricted state instead of failing
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DisallowedComponentType { .. })
    }
}

/// A named placement region within a template type
///
/// Zone types are immutable theme configuration. The allowed set is
/// authoritative: every component placed in a zone of this type must have
/// one of these component types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneType {
    pub id: ZoneTypeId,
    pub name: String,
    /// Template type this zone belongs to, if declared
    pub template_type: Option<TemplateTypeId>,
    allowed: Vec<ComponentType>,
}

impl ZoneType {
    pub fn new(id: impl Into<ZoneTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            template_type: None,
            allowed: Vec::new(),
        }
    }

    /// Attach the owning template type
    pub fn with_template_type(mut self, template_type: impl Into<TemplateTypeId>) -> Self {
        self.template_type = Some(template_type.into());
        self
    }

    /// Add a component type to the allowed set (duplicates are ignored)
    pub fn allow(mut self, component_type: ComponentType) -> Self {
        if !self.allows(&component_type.id) {
            self.allowed.push(component_type);
        }
        self
    }

    /// Component types that may be placed in zones of this type, in declaration order
    pub fn allowed_component_types(&self) -> &[ComponentType] {
        &self.allowed
    }

    pub fn allows(&self, component_type: &ComponentTypeId) -> bool {
        self.allowed.iter().any(|ct| &ct.id == component_type)
    }

    /// Fail with `DisallowedComponentType` unless the type is allowed
    pub fn check_allowed(&self, component_type: &ComponentTypeId) -> Result<(), ZoneError> {
        if self.allows(component_type) {
            Ok(())
        } else {
            Err(ZoneError::disallowed(component_type, &self.id))
        }
    }
}

/// A concrete zone holding an ordered list of components
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    zone_type: Arc<ZoneType>,
    components: Vec<Component>,
}

impl Zone {
    pub fn new(zone_type: Arc<ZoneType>) -> Self {
        Self {
            zone_type,
            components: Vec::new(),
        }
    }

    /// Build a zone from existing contents, validating every component
    pub fn with_components(
        zone_type: Arc<ZoneType>,
        components: Vec<Component>,
    ) -> Result<Self, ZoneError> {
        let mut zone = Self::new(zone_type);
        for component in components {
            zone.add_component(component)?;
        }
        Ok(zone)
    }

    pub fn zone_type(&self) -> &ZoneType {
        &self.zone_type
    }

    pub fn zone_type_arc(&self) -> Arc<ZoneType> {
        Arc::clone(&self.zone_type)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Replace the variation payload of every component.
    ///
    /// `payload_for` maps a component type to its payload; components whose
    /// type maps to `None` lose any payload they carried.
    pub fn apply_variations<F>(&mut self, payload_for: F)
    where
        F: Fn(&ComponentTypeId) -> Option<VariationPayload>,
    {
        for component in &mut self.components {
            component.variation = payload_for(&component.component_type);
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    fn position_of(&self, id: &ComponentId) -> Result<usize, ZoneError> {
        self.components
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| ZoneError::ComponentNotFound { id: id.clone() })
    }

    fn check_placeable(&self, component: &Component) -> Result<(), ZoneError> {
        self.zone_type.check_allowed(&component.component_type)?;
        if self.get(&component.id).is_some() {
            return Err(ZoneError::DuplicateComponent {
                id: component.id.clone(),
            });
        }
        Ok(())
    }

    /// Append a component at the end of the zone
    pub fn add_component(&mut self, component: Component) -> Result<(), ZoneError> {
        self.check_placeable(&component)?;
        self.components.push(component);
        Ok(())
    }

    /// Insert a component at `position` (0 = first)
    pub fn insert_component(
        &mut self,
        position: usize,
        component: Component,
    ) -> Result<(), ZoneError> {
        self.check_placeable(&component)?;
        if position > self.components.len() {
            return Err(ZoneError::PositionOutOfRange {
                position,
                len: self.components.len(),
            });
        }
        self.components.insert(position, component);
        Ok(())
    }

    /// Remove a component by id, returning it
    pub fn remove_component(&mut self, id: &ComponentId) -> Result<Component, ZoneError> {
        let index = self.position_of(id)?;
        Ok(self.components.remove(index))
    }

    /// Move a component to a new position within the zone
    pub fn move_component(&mut self, id: &ComponentId, position: usize) -> Result<(), ZoneError> {
        let index = self.position_of(id)?;
        if position >= self.components.len() {
            return Err(ZoneError::PositionOutOfRange {
                position,
                len: self.components.len(),
            });
        }
        let component = self.components.remove(index);
        self.components.insert(position, component);
        Ok(())
    }
}
