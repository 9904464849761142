use std::sync::Arc;

use crate::application::dto::{RepositoryDto, TagDto};
use crate::application::errors::CatalogError;
use crate::application::ports::{NamespacePolicy, RepositoryStore, TagStore};
use crate::domain::authorization::UserContext;
use crate::domain::entities::{Repository, Tag};
use crate::domain::tag_grouping::group_by_digest;
use crate::domain::value_objects::{RepositoryId, TagId};

/// Read-only lookups over repositories and their tags
pub struct CatalogQueryService {
    repository_store: Arc<dyn RepositoryStore>,
    tag_store: Arc<dyn TagStore>,
    namespace_policy: Arc<dyn NamespacePolicy>,
}

impl CatalogQueryService {
    pub fn new(
        repository_store: Arc<dyn RepositoryStore>,
        tag_store: Arc<dyn TagStore>,
        namespace_policy: Arc<dyn NamespacePolicy>,
    ) -> Self {
        Self {
            repository_store,
            tag_store,
            namespace_policy,
        }
    }

    /// Repositories whose namespace `user` may see
    pub async fn list_repositories(
        &self,
        user: &UserContext,
    ) -> Result<Vec<RepositoryDto>, CatalogError> {
        let repositories = self.repository_store.list().await?;

        Ok(repositories
            .into_iter()
            .filter(|repo| self.namespace_policy.can_view(user, repo.namespace()))
            .map(RepositoryDto::from)
            .collect())
    }

    pub async fn get_repository(&self, id: RepositoryId) -> Result<RepositoryDto, CatalogError> {
        self.find_repository(id).await.map(RepositoryDto::from)
    }

    /// Tags of a repository in creation order
    pub async fn list_tags(&self, repository_id: RepositoryId) -> Result<Vec<TagDto>, CatalogError> {
        let tags = self.load_tags(repository_id).await?;
        Ok(tags.into_iter().map(TagDto::from).collect())
    }

    /// One tag, looked up inside its repository
    pub async fn get_tag(
        &self,
        repository_id: RepositoryId,
        tag_id: TagId,
    ) -> Result<TagDto, CatalogError> {
        self.find_repository(repository_id).await?;

        let tag = self
            .tag_store
            .find_by_id(tag_id)
            .await?
            .filter(|tag| tag.ensure_belongs_to(repository_id).is_ok())
            .ok_or(CatalogError::TagNotFound(tag_id))?;

        Ok(TagDto::from(tag))
    }

    /// Tags collapsed by digest, newest group first
    pub async fn grouped_tags(
        &self,
        repository_id: RepositoryId,
    ) -> Result<Vec<Vec<TagDto>>, CatalogError> {
        let tags = self.load_tags(repository_id).await?;

        Ok(group_by_digest(tags)
            .into_iter()
            .map(|group| group.into_iter().map(TagDto::from).collect())
            .collect())
    }

    async fn find_repository(&self, id: RepositoryId) -> Result<Repository, CatalogError> {
        self.repository_store
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::RepositoryNotFound(id))
    }

    async fn load_tags(&self, repository_id: RepositoryId) -> Result<Vec<Tag>, CatalogError> {
        self.find_repository(repository_id).await?;
        Ok(self.tag_store.list_by_repository(repository_id).await?)
    }
}
