//! Variation context: the axes of a variation lookup

use std::fmt;

use serde::Deserialize;

use crate::model::{ComponentTypeId, ContentTypeId, TemplateTypeId, ThemeId, ZoneTypeId};

use super::error::VariationError;

/// A lookup axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Theme,
    ContentType,
    TemplateType,
    ZoneType,
    ComponentType,
}

impl Axis {
    /// All axes, in display order
    pub const ALL: [Axis; 5] = [
        Axis::Theme,
        Axis::ContentType,
        Axis::TemplateType,
        Axis::ZoneType,
        Axis::ComponentType,
    ];

    /// Axes that must be present to build a context
    pub const REQUIRED: [Axis; 4] = [
        Axis::Theme,
        Axis::ContentType,
        Axis::TemplateType,
        Axis::ZoneType,
    ];

    /// Mapping key used when (de)normalizing a context
    pub fn key(self) -> &'static str {
        match self {
            Axis::Theme => "theme",
            Axis::ContentType => "content_type",
            Axis::TemplateType => "template_type",
            Axis::ZoneType => "zone_type",
            Axis::ComponentType => "component_type",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.key() == key)
    }

    pub fn is_required(self) -> bool {
        self != Axis::ComponentType
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Immutable description of what is being rendered or edited
///
/// Equality is structural: two contexts with the same axis values resolve
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariationContext {
    theme: ThemeId,
    content_type: ContentTypeId,
    template_type: TemplateTypeId,
    zone_type: ZoneTypeId,
    component_type: Option<ComponentTypeId>,
}

impl VariationContext {
    pub fn new(
        theme: impl Into<ThemeId>,
        content_type: impl Into<ContentTypeId>,
        template_type: impl Into<TemplateTypeId>,
        zone_type: impl Into<ZoneTypeId>,
    ) -> Self {
        Self {
            theme: theme.into(),
            content_type: content_type.into(),
            template_type: template_type.into(),
            zone_type: zone_type.into(),
            component_type: None,
        }
    }

    /// Narrow the context to a single component type
    pub fn with_component_type(mut self, component_type: impl Into<ComponentTypeId>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    /// Build a context from a flat mapping of axis name to value.
    ///
    /// Each axis value must be a non-empty string, or a table carrying a
    /// non-empty string `id` (an entity reference). The four required axes
    /// must be present; `component_type` is optional. Unknown keys are
    /// ignored.
    pub fn denormalize(mapping: &toml::Table) -> Result<Self, VariationError> {
        let required = |axis: Axis| -> Result<String, VariationError> {
            match mapping.get(axis.key()) {
                Some(value) => axis_value(axis, value),
                None => Err(VariationError::missing_axis(axis)),
            }
        };

        let mut context = Self {
            theme: ThemeId(required(Axis::Theme)?),
            content_type: ContentTypeId(required(Axis::ContentType)?),
            template_type: TemplateTypeId(required(Axis::TemplateType)?),
            zone_type: ZoneTypeId(required(Axis::ZoneType)?),
            component_type: None,
        };

        if let Some(value) = mapping.get(Axis::ComponentType.key()) {
            context.component_type = Some(ComponentTypeId(axis_value(
                Axis::ComponentType,
                value,
            )?));
        }

        Ok(context)
    }

    /// Inverse of [`denormalize`](Self::denormalize), with every axis as a plain string
    pub fn normalize(&self) -> toml::Table {
        let mut table = toml::Table::new();
        for axis in Axis::ALL {
            if let Some(value) = self.get(axis) {
                table.insert(axis.key().to_string(), toml::Value::String(value.to_string()));
            }
        }
        table
    }

    /// Value of an axis, `None` only for an absent component type
    pub fn get(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::Theme => Some(self.theme.as_str()),
            Axis::ContentType => Some(self.content_type.as_str()),
            Axis::TemplateType => Some(self.template_type.as_str()),
            Axis::ZoneType => Some(self.zone_type.as_str()),
            Axis::ComponentType => self.component_type.as_ref().map(|c| c.as_str()),
        }
    }

    pub fn theme(&self) -> &ThemeId {
        &self.theme
    }

    pub fn content_type(&self) -> &ContentTypeId {
        &self.content_type
    }

    pub fn template_type(&self) -> &TemplateTypeId {
        &self.template_type
    }

    pub fn zone_type(&self) -> &ZoneTypeId {
        &self.zone_type
    }

    pub fn component_type(&self) -> Option<&ComponentTypeId> {
        self.component_type.as_ref()
    }
}

impl fmt::Display for VariationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Axis::ALL
            .into_iter()
            .filter_map(|axis| self.get(axis).map(|v| format!("{}={}", axis, v)))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

fn axis_value(axis: Axis, value: &toml::Value) -> Result<String, VariationError> {
    let id = match value {
        toml::Value::String(s) => s.as_str(),
        toml::Value::Table(entity) => match entity.get("id") {
            Some(toml::Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(VariationError::malformed_axis(
                    axis,
                    format!("has an entity id of type {}", other.type_str()),
                ))
            }
            None => {
                return Err(VariationError::malformed_axis(
                    axis,
                    "is a table without an 'id' field",
                ))
            }
        },
        other => {
            return Err(VariationError::malformed_axis(
                axis,
                format!("expected an identifier, found {}", other.type_str()),
            ))
        }
    };

    if id.is_empty() {
        return Err(VariationError::malformed_axis(axis, "is empty"));
    }
    Ok(id.to_string())
}
