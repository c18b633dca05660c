//! Lookup criteria: field name to expected value

use std::collections::BTreeMap;
use std::fmt;

use crate::model::Component;

/// Something criteria can be evaluated against
pub trait Queryable {
    /// Current value of a named field, if the entity has it
    fn field(&self, name: &str) -> Option<toml::Value>;
}

impl Queryable for Component {
    fn field(&self, name: &str) -> Option<toml::Value> {
        Component::field(self, name)
    }
}

/// Conjunction of field equalities; empty criteria match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    fields: BTreeMap<String, toml::Value>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria selecting a single entity by id
    pub fn id(id: impl Into<String>) -> Self {
        Self::new().with_field("id", id.into())
    }

    /// Require `field` to equal `value`
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches<T: Queryable>(&self, entity: &T) -> bool {
        self.fields
            .iter()
            .all(|(name, expected)| entity.field(name).as_ref() == Some(expected))
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_match_all() {
        assert!(Criteria::new().matches(&Component::new("c1", "banner")));
    }

    #[test]
    fn test_all_fields_must_match() {
        let c = Component::new("c1", "banner").with_data("lang", "en");
        assert!(Criteria::new()
            .with_field("component_type", "banner")
            .with_field("lang", "en")
            .matches(&c));
        assert!(!Criteria::new()
            .with_field("component_type", "banner")
            .with_field("lang", "fr")
            .matches(&c));
        assert!(!Criteria::new().with_field("missing", "x").matches(&c));
    }

    #[test]
    fn test_display() {
        let text = Criteria::id("c1").to_string();
        assert!(text.starts_with("{id="));
        assert!(text.contains("c1"));
    }
}
