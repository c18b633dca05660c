//! Variation definitions and resolved variations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::context::{Axis, VariationContext};

/// Rendering configuration carried by a variation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationPayload {
    /// Template reference used to render the component
    #[serde(default)]
    pub template: Option<String>,
    /// Free-form rendering options
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
}

impl VariationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Partial context: pinned axes must match exactly, absent axes are wildcards
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pins {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub template_type: Option<String>,
    #[serde(default)]
    pub zone_type: Option<String>,
    #[serde(default)]
    pub component_type: Option<String>,
}

impl Pins {
    /// Wildcard on every axis
    pub fn any() -> Self {
        Self::default()
    }

    pub fn pin(mut self, axis: Axis, value: impl Into<String>) -> Self {
        *self.slot(axis) = Some(value.into());
        self
    }

    pub fn get(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::Theme => self.theme.as_deref(),
            Axis::ContentType => self.content_type.as_deref(),
            Axis::TemplateType => self.template_type.as_deref(),
            Axis::ZoneType => self.zone_type.as_deref(),
            Axis::ComponentType => self.component_type.as_deref(),
        }
    }

    fn slot(&mut self, axis: Axis) -> &mut Option<String> {
        match axis {
            Axis::Theme => &mut self.theme,
            Axis::ContentType => &mut self.content_type,
            Axis::TemplateType => &mut self.template_type,
            Axis::ZoneType => &mut self.zone_type,
            Axis::ComponentType => &mut self.component_type,
        }
    }

    pub fn pinned_count(&self) -> usize {
        Axis::ALL.into_iter().filter(|a| self.get(*a).is_some()).count()
    }

    /// Score these pins against a context.
    ///
    /// Returns `None` when any pinned axis disagrees with the context (or the
    /// context has no value for it), otherwise the match specificity.
    pub fn score(&self, context: &VariationContext) -> Option<Specificity> {
        let mut specificity = Specificity::default();
        for axis in Axis::ALL {
            match self.get(axis) {
                None => specificity.wildcard += 1,
                Some(pinned) if context.get(axis) == Some(pinned) => specificity.exact += 1,
                Some(_) => return None,
            }
        }
        Some(specificity)
    }
}

/// How closely a variation matched its context
///
/// Comparison, equality and hashing only consider `exact`; `wildcard` is
/// informational.
#[derive(Debug, Clone, Copy, Default)]
pub struct Specificity {
    /// Pinned axes equal to the context value
    pub exact: usize,
    /// Axes left open by the definition
    pub wildcard: usize,
}

impl PartialEq for Specificity {
    fn eq(&self, other: &Self) -> bool {
        self.exact == other.exact
    }
}

impl Eq for Specificity {}

impl std::hash::Hash for Specificity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.exact.hash(state);
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.exact.cmp(&other.exact)
    }
}

/// A registered variation: pins plus the payload to apply on match
#[derive(Debug, Clone, PartialEq)]
pub struct VariationDefinition {
    /// Optional label for diagnostics
    pub name: Option<String>,
    pub pins: Pins,
    pub payload: VariationPayload,
}

impl VariationDefinition {
    pub fn new(pins: Pins, payload: VariationPayload) -> Self {
        Self {
            name: None,
            pins,
            payload,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Result of a successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Variation {
    pub name: Option<String>,
    pub payload: VariationPayload,
    pub specificity: Specificity,
    /// Position of the winning definition in registration order
    pub index: usize,
}

impl Variation {
    pub fn template(&self) -> Option<&str> {
        self.payload.template.as_deref()
    }

    pub fn option(&self, key: &str) -> Option<&toml::Value> {
        self.payload.options.get(key)
    }
}
