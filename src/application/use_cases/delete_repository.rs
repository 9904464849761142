use futures_util::{stream, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::ports::{
    ActivityRepository, DeleteSettings, RegistryGateway, RepositoryStore, StoreError, TagStore,
};
use crate::domain::authorization::UserContext;
use crate::domain::entities::{ActivityEntry, Repository, Tag};
use crate::domain::value_objects::RepositoryId;

/// Tags that could not be removed during one deletion attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    failures: BTreeMap<String, String>,
}

impl DeletionOutcome {
    pub fn record_failure(&mut self, tag_name: impl Into<String>, reason: impl Into<String>) {
        self.failures.insert(tag_name.into(), reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failed_tags(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }

    pub fn reason(&self, tag_name: &str) -> Option<&str> {
        self.failures.get(tag_name).map(String::as_str)
    }
}

impl std::fmt::Display for DeletionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (tag, reason) in &self.failures {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "could not remove {} tag: {}", tag, reason)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum DeleteRepositoryError {
    #[error("Repository not found: {0}")]
    NotFound(RepositoryId),

    #[error("Repository deletion is disabled")]
    DeletionDisabled,

    #[error("{0}")]
    TagRemovalFailed(DeletionOutcome),

    #[error("could not remove repository {0}")]
    RepositoryRemovalFailed(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case: delete a repository from the registry and the catalog.
///
/// Every tag is removed from the registry first and from the catalog right
/// after its own registry call succeeds. A tag the registry refuses stays in
/// the catalog, and the repository record is only removed once no failure was
/// recorded. Tags removed before a failure stay removed.
pub struct DeleteRepositoryUseCase {
    repository_store: Arc<dyn RepositoryStore>,
    tag_store: Arc<dyn TagStore>,
    registry: Arc<dyn RegistryGateway>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
}

impl DeleteRepositoryUseCase {
    pub fn new(
        repository_store: Arc<dyn RepositoryStore>,
        tag_store: Arc<dyn TagStore>,
        registry: Arc<dyn RegistryGateway>,
    ) -> Self {
        Self {
            repository_store,
            tag_store,
            registry,
            activity_repo: None,
        }
    }

    /// Record deletions in the activity trail
    pub fn with_activity_repo(mut self, activity_repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(activity_repo);
        self
    }

    /// Execute delete workflow
    pub async fn execute(
        &self,
        settings: &DeleteSettings,
        actor: &UserContext,
        repository_id: RepositoryId,
    ) -> Result<(), DeleteRepositoryError> {
        // 1. Find repository
        let repository = self
            .repository_store
            .find_by_id(repository_id)
            .await?
            .ok_or(DeleteRepositoryError::NotFound(repository_id))?;

        // 2. Feature flag, as read at request entry
        if !settings.enabled {
            info!(%repository_id, "repository deletion rejected: delete.enabled is off");
            return Err(DeleteRepositoryError::DeletionDisabled);
        }

        // 3. Remove every tag, registry first
        let tags = self.tag_store.list_by_repository(repository_id).await?;
        let tag_count = tags.len();
        info!(
            %repository_id,
            repository = %repository.full_name(),
            tag_count,
            "deleting repository"
        );

        let outcome = self
            .remove_tags(&repository, tags, settings.concurrency, actor)
            .await;

        if !outcome.is_empty() {
            warn!(
                %repository_id,
                tag_count,
                failed = outcome.len(),
                "repository kept: some tags could not be removed"
            );
            return Err(DeleteRepositoryError::TagRemovalFailed(outcome));
        }

        // 4. Remove the repository record itself
        if !self.repository_store.delete(repository_id).await? {
            // A concurrent request may have finished the job already
            if self.repository_store.find_by_id(repository_id).await?.is_none() {
                debug!(%repository_id, "repository record already removed");
                return Ok(());
            }
            warn!(%repository_id, "repository store refused to remove the record");
            return Err(DeleteRepositoryError::RepositoryRemovalFailed(
                repository.full_name(),
            ));
        }

        self.record_activity(ActivityEntry::repository_deleted(
            &repository,
            &actor.user_id,
        ))
        .await;

        info!(%repository_id, tag_count, "repository deleted");
        Ok(())
    }

    async fn remove_tags(
        &self,
        repository: &Repository,
        tags: Vec<Tag>,
        concurrency: usize,
        actor: &UserContext,
    ) -> DeletionOutcome {
        let results: Vec<(String, Result<(), String>)> = stream::iter(tags)
            .map(|tag| async move {
                let result = self.remove_tag(repository, &tag, actor).await;
                (tag.name().to_string(), result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut outcome = DeletionOutcome::default();
        for (tag_name, result) in results {
            if let Err(reason) = result {
                outcome.record_failure(tag_name, reason);
            }
        }
        outcome
    }

    /// Remove one tag; the error is the human readable reason
    async fn remove_tag(
        &self,
        repository: &Repository,
        tag: &Tag,
        actor: &UserContext,
    ) -> Result<(), String> {
        if let Err(e) = self.registry.delete(repository, tag).await {
            warn!(
                repository = %repository.full_name(),
                tag = %tag.name(),
                error = %e,
                "registry refused tag deletion"
            );
            return Err(e.to_string());
        }

        match self.tag_store.delete(tag.id()).await {
            Ok(true) => {}
            Ok(false) => {
                // Already gone locally, which is the state this call is after
                debug!(tag_id = %tag.id(), "tag record already removed");
                return Ok(());
            }
            Err(e) => {
                error!(tag_id = %tag.id(), error = %e, "failed to remove tag record");
                return Err("tag record could not be removed".to_string());
            }
        }

        self.record_activity(ActivityEntry::tag_deleted(repository, tag, &actor.user_id))
            .await;
        Ok(())
    }

    async fn record_activity(&self, entry: ActivityEntry) {
        if let Some(activity_repo) = &self.activity_repo {
            let kind = entry.kind;
            if let Err(e) = activity_repo.record(entry).await {
                warn!(%kind, error = %e, "failed to record activity");
            }
        }
    }
}
