//! Zoo use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points with existence-checked update/delete.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - `update_zoo` and `delete_zoo` fail with `ZooNotFound` when the target id
//!   is absent; create and reads pass through to the repository.
//! - The existence check and the mutating call are two repository calls;
//!   single-writer handling is assumed at this layer.

use crate::model::zoo::{Zoo, ZooId};
use crate::repo::zoo_repo::{RepoError, ZooRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ZooServiceResult<T> = Result<T, ZooServiceError>;

/// Service error for zoo use-cases.
#[derive(Debug)]
pub enum ZooServiceError {
    /// Update or delete targeted an id absent from the store.
    ZooNotFound(ZooId),
    /// Persistence-layer failure, propagated unhandled.
    Repo(RepoError),
}

impl Display for ZooServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // Fixed contract string; callers match on it.
            Self::ZooNotFound(id) => write!(f, "Zoo not found with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ZooServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ZooNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ZooServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper enforcing existence-checked CRUD semantics.
pub struct ZooService<R: ZooRepository> {
    repo: R,
}

impl<R: ZooRepository> ZooService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all zoos in insertion order.
    pub fn get_all_zoos(&self) -> ZooServiceResult<Vec<Zoo>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one zoo by id; absent ids yield `None`, not an error.
    pub fn get_zoo_by_id(&self, id: ZooId) -> ZooServiceResult<Option<Zoo>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Persists a new zoo and returns it with its assigned id.
    pub fn create_zoo(&self, zoo: &Zoo) -> ZooServiceResult<Zoo> {
        Ok(self.repo.save(zoo)?)
    }

    /// Overwrites the zoo with the given id using the supplied fields.
    ///
    /// The supplied id wins over any id carried by `zoo`, so callers can pass
    /// a freshly built record without threading the id through it.
    ///
    /// # Errors
    /// - `ZooNotFound` when no zoo with `id` exists.
    pub fn update_zoo(&self, id: ZooId, zoo: &Zoo) -> ZooServiceResult<Zoo> {
        if self.repo.find_by_id(id)?.is_none() {
            return Err(ZooServiceError::ZooNotFound(id));
        }

        let updated = Zoo {
            id: Some(id),
            ..zoo.clone()
        };
        Ok(self.repo.save(&updated)?)
    }

    /// Deletes the zoo with the given id.
    ///
    /// # Errors
    /// - `ZooNotFound` when no zoo with `id` exists.
    pub fn delete_zoo(&self, id: ZooId) -> ZooServiceResult<()> {
        if !self.repo.exists_by_id(id)? {
            return Err(ZooServiceError::ZooNotFound(id));
        }

        Ok(self.repo.delete_by_id(id)?)
    }

    /// Finds zoos whose name contains the needle, case-insensitively.
    pub fn find_zoos_by_name(&self, needle: &str) -> ZooServiceResult<Vec<Zoo>> {
        Ok(self.repo.find_by_name_containing(needle)?)
    }

    /// Finds zoos whose location contains the needle, case-insensitively.
    pub fn find_zoos_by_location(&self, needle: &str) -> ZooServiceResult<Vec<Zoo>> {
        Ok(self.repo.find_by_location_containing(needle)?)
    }

    /// Returns whether a zoo with this id is currently stored.
    pub fn zoo_exists(&self, id: ZooId) -> ZooServiceResult<bool> {
        Ok(self.repo.exists_by_id(id)?)
    }
}
