//! In-memory repository, used for tests and for themes shipped as files

use super::criteria::{Criteria, Queryable};
use super::{LoaderError, Repository};

/// Vector-backed repository preserving insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository<T> {
    items: Vec<T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> FromIterator<T> for InMemoryRepository<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Queryable + Clone> Repository<T> for InMemoryRepository<T> {
    fn query(&self, criteria: &Criteria) -> Result<Vec<T>, LoaderError> {
        Ok(self
            .items
            .iter()
            .filter(|item| criteria.matches(*item))
            .cloned()
            .collect())
    }
}
