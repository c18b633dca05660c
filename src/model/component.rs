//! Component types and component instances

use std::collections::BTreeMap;

use crate::variation::VariationPayload;

use super::ids::{ComponentId, ComponentTypeId};

/// A kind of placeable content unit (banner, text block, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentType {
    pub id: ComponentTypeId,
    pub name: String,
}

impl ComponentType {
    pub fn new(id: impl Into<ComponentTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A concrete component placed in a zone
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub component_type: ComponentTypeId,
    /// Content data edited by the user
    pub data: BTreeMap<String, toml::Value>,
    /// Rendering configuration chosen for this component, once resolved
    pub variation: Option<VariationPayload>,
}

impl Component {
    pub fn new(id: impl Into<ComponentId>, component_type: impl Into<ComponentTypeId>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            data: BTreeMap::new(),
            variation: None,
        }
    }

    /// Set a content data field
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Attach a rendering configuration, as stored with loaded content
    pub fn with_variation(mut self, payload: VariationPayload) -> Self {
        self.variation = Some(payload);
        self
    }

    /// Look up a field by name for criteria matching
    ///
    /// `id` and `component_type` are reserved and map to the component's own
    /// fields; everything else reads from `data`.
    pub fn field(&self, name: &str) -> Option<toml::Value> {
        match name {
            "id" => Some(toml::Value::String(self.id.0.clone())),
            "component_type" => Some(toml::Value::String(self.component_type.0.clone())),
            other => self.data.get(other).cloned(),
        }
    }
}
