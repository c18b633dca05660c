//! Component loader contract and storage adapters
//!
//! The edit flow only depends on [`ComponentLoader`]. Storage technologies
//! plug in by implementing the generic [`Repository`] capability and
//! wrapping it in a [`RepositoryLoader`].

mod criteria;
mod memory;

pub use criteria::{Criteria, Queryable};
pub use memory::InMemoryRepository;

use thiserror::Error;
use tracing::debug;

use crate::model::{Component, ComponentId};

/// Errors reported by loaders and their storage backends
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoaderError {
    /// Nothing matched a lookup that requires a result
    #[error("no component matches {criteria}")]
    NotFound { criteria: String },

    /// The storage backend failed
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl LoaderError {
    pub fn not_found(criteria: &Criteria) -> Self {
        Self::NotFound {
            criteria: criteria.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Generic query capability over a storage backend
pub trait Repository<T> {
    /// Every entity matching `criteria`, in storage order
    fn query(&self, criteria: &Criteria) -> Result<Vec<T>, LoaderError>;
}

/// Lookup contract for components
///
/// Calls are synchronous from the caller's perspective; caching and
/// transactions belong to the implementation.
pub trait ComponentLoader {
    /// First component matching `criteria`, if any
    fn find_one_by(&self, criteria: &Criteria) -> Result<Option<Component>, LoaderError>;

    /// All components matching `criteria`
    fn find_by(&self, criteria: &Criteria) -> Result<Vec<Component>, LoaderError>;

    /// Component with the given id, failing with `NotFound` when absent
    fn retrieve(&self, id: &ComponentId) -> Result<Component, LoaderError> {
        let criteria = Criteria::id(id.as_str());
        self.find_one_by(&criteria)?
            .ok_or_else(|| LoaderError::not_found(&criteria))
    }

    /// Page through the components matching `criteria`
    fn retrieve_all(
        &self,
        criteria: &Criteria,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Component>, LoaderError> {
        let found = self.find_by(criteria)?;
        Ok(found
            .into_iter()
            .skip(offset.unwrap_or(0))
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }
}

/// [`ComponentLoader`] backed by any component [`Repository`]
#[derive(Debug, Clone)]
pub struct RepositoryLoader<R> {
    repository: R,
}

impl<R> RepositoryLoader<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_inner(self) -> R {
        self.repository
    }
}

impl<R: Repository<Component>> ComponentLoader for RepositoryLoader<R> {
    fn find_one_by(&self, criteria: &Criteria) -> Result<Option<Component>, LoaderError> {
        let found = self.repository.query(criteria)?.into_iter().next();
        debug!(%criteria, found = found.is_some(), "component lookup");
        Ok(found)
    }

    fn find_by(&self, criteria: &Criteria) -> Result<Vec<Component>, LoaderError> {
        let found = self.repository.query(criteria)?;
        debug!(%criteria, count = found.len(), "component collection lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> RepositoryLoader<InMemoryRepository<Component>> {
        let mut repo = InMemoryRepository::new();
        repo.insert(Component::new("c1", "banner"));
        repo.insert(Component::new("c2", "text"));
        repo.insert(Component::new("c3", "banner"));
        RepositoryLoader::new(repo)
    }

    struct FailingRepository;

    impl Repository<Component> for FailingRepository {
        fn query(&self, _criteria: &Criteria) -> Result<Vec<Component>, LoaderError> {
            Err(LoaderError::storage("connection refused"))
        }
    }

    #[test]
    fn test_find_one_by() {
        let loader = loader();
        let found = loader
            .find_one_by(&Criteria::new().with_field("component_type", "banner"))
            .unwrap();
        assert_eq!(found.map(|c| c.id.0), Some("c1".to_string()));

        let missing = loader.find_one_by(&Criteria::id("nope")).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_find_by() {
        let found = loader()
            .find_by(&Criteria::new().with_field("component_type", "banner"))
            .unwrap();
        let ids: Vec<_> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[test]
    fn test_retrieve() {
        let loader = loader();
        assert_eq!(loader.retrieve(&ComponentId::new("c2")).unwrap().id.as_str(), "c2");
        assert!(matches!(
            loader.retrieve(&ComponentId::new("c9")),
            Err(LoaderError::NotFound { .. })
        ));
    }

    #[test]
    fn test_retrieve_all_pagination() {
        let loader = loader();
        let page = loader
            .retrieve_all(&Criteria::new(), Some(2), Some(1))
            .unwrap();
        let ids: Vec<_> = page.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c3"]);

        let all = loader.retrieve_all(&Criteria::new(), None, None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_storage_error_propagates() {
        let loader = RepositoryLoader::new(FailingRepository);
        let err = loader.find_by(&Criteria::new()).unwrap_err();
        assert_eq!(err, LoaderError::storage("connection refused"));
    }
}
