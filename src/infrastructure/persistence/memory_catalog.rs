use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::application::ports::{
    ActivityError, ActivityRepository, RepositoryStore, StoreError, TagStore,
};
use crate::domain::entities::{ActivityEntry, Author, Repository, Tag};
use crate::domain::value_objects::{Digest, NamespaceRef, RepositoryId, TagId};

#[derive(Default)]
struct CatalogState {
    next_repository_id: i64,
    next_tag_id: i64,
    repositories: BTreeMap<RepositoryId, Repository>,
    tags: BTreeMap<TagId, Tag>,
}

/// Process-local catalog backing both store ports.
///
/// Used when no database is configured and by the HTTP tests. Each call
/// takes the lock once, so every operation is atomic per record. Like the
/// database schema, it refuses to remove a repository that still owns tags.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository, as a push event would
    pub fn create_repository(
        &self,
        name: &str,
        namespace: NamespaceRef,
    ) -> Result<Repository, StoreError> {
        let mut state = self.state.write();

        let duplicate = state
            .repositories
            .values()
            .any(|r| r.name() == name && r.namespace().id() == namespace.id());
        if duplicate {
            return Err(StoreError::ConstraintViolation(format!(
                "repository {}/{} already exists",
                namespace.name(),
                name
            )));
        }

        state.next_repository_id += 1;
        let id = RepositoryId::new(state.next_repository_id);
        let repository = Repository::new(id, name, namespace)
            .map_err(|e| StoreError::ConstraintViolation(e.to_string()))?;
        state.repositories.insert(id, repository.clone());
        Ok(repository)
    }

    /// Register a tag inside an existing repository
    pub fn create_tag(
        &self,
        repository_id: RepositoryId,
        name: &str,
        digest: impl Into<Digest>,
        author: Author,
    ) -> Result<Tag, StoreError> {
        let mut state = self.state.write();

        if !state.repositories.contains_key(&repository_id) {
            return Err(StoreError::NotFound(format!("repository {}", repository_id)));
        }
        if state
            .tags
            .values()
            .any(|t| t.repository_id() == repository_id && t.name() == name)
        {
            return Err(StoreError::ConstraintViolation(format!(
                "tag {} already exists in repository {}",
                name, repository_id
            )));
        }

        state.next_tag_id += 1;
        let id = TagId::new(state.next_tag_id);
        let tag = Tag::new(id, name, digest.into(), author, repository_id)
            .map_err(|e| StoreError::ConstraintViolation(e.to_string()))?
            .with_updated_at(Utc::now());
        state.tags.insert(id, tag.clone());
        Ok(tag)
    }

    pub fn repository_count(&self) -> usize {
        self.state.read().repositories.len()
    }

    pub fn tag_count(&self) -> usize {
        self.state.read().tags.len()
    }
}

#[async_trait]
impl RepositoryStore for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<Repository>, StoreError> {
        Ok(self.state.read().repositories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: RepositoryId) -> Result<Option<Repository>, StoreError> {
        Ok(self.state.read().repositories.get(&id).cloned())
    }

    async fn delete(&self, id: RepositoryId) -> Result<bool, StoreError> {
        let mut state = self.state.write();
        if state.tags.values().any(|t| t.repository_id() == id) {
            return Ok(false);
        }
        Ok(state.repositories.remove(&id).is_some())
    }
}

#[async_trait]
impl TagStore for InMemoryCatalog {
    async fn list_by_repository(
        &self,
        repository_id: RepositoryId,
    ) -> Result<Vec<Tag>, StoreError> {
        Ok(self
            .state
            .read()
            .tags
            .values()
            .filter(|t| t.repository_id() == repository_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, StoreError> {
        Ok(self.state.read().tags.get(&id).cloned())
    }

    async fn delete(&self, id: TagId) -> Result<bool, StoreError> {
        Ok(self.state.write().tags.remove(&id).is_some())
    }
}

/// Activity trail kept in memory
#[derive(Default)]
pub struct InMemoryActivityRepository {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.read().clone()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn record(&self, entry: ActivityEntry) -> Result<(), ActivityError> {
        self.entries.write().push(entry);
        Ok(())
    }
}
