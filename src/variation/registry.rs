//! Ordered registry of variation definitions

use super::definition::VariationDefinition;

/// Variation definitions in registration order
///
/// Registration order is observable: it breaks ties between equally
/// specific candidates. The registry is populated once at configuration load
/// and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct VariationRegistry {
    definitions: Vec<VariationDefinition>,
}

impl VariationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition, returning its registration index
    pub fn register(&mut self, definition: VariationDefinition) -> usize {
        self.definitions.push(definition);
        self.definitions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&VariationDefinition> {
        self.definitions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &VariationDefinition)> {
        self.definitions.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<VariationDefinition> for VariationRegistry {
    fn from_iter<I: IntoIterator<Item = VariationDefinition>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}
