use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::application::ports::{RepositoryStore, StoreError};
use crate::domain::entities::Repository;
use crate::domain::value_objects::{NamespaceRef, RepositoryId, Visibility};

const SELECT_REPOSITORY: &str = r#"
    SELECT r.id, r.name, r.created_at, r.updated_at,
           n.id AS namespace_id, n.name AS namespace_name,
           n.visibility AS namespace_visibility, n.global AS namespace_global
    FROM repositories r
    JOIN namespaces n ON n.id = r.namespace_id
"#;

pub struct PostgresRepositoryStore {
    pool: PgPool,
}

impl PostgresRepositoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RepositoryStore for PostgresRepositoryStore {
    async fn list(&self) -> Result<Vec<Repository>, StoreError> {
        let rows = sqlx::query_as::<_, RepositoryRow>(&format!("{SELECT_REPOSITORY} ORDER BY r.id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_domain()).collect()
    }

    async fn find_by_id(&self, id: RepositoryId) -> Result<Option<Repository>, StoreError> {
        let row =
            sqlx::query_as::<_, RepositoryRow>(&format!("{SELECT_REPOSITORY} WHERE r.id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.into_domain()).transpose()
    }

    async fn delete(&self, id: RepositoryId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM repositories WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            // Tag rows still reference the repository
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                warn!(repository_id = %id, "repository delete blocked by remaining tags");
                Ok(false)
            }
            Err(e) => Err(StoreError::Database(e)),
        }
    }
}

#[derive(sqlx::FromRow)]
struct RepositoryRow {
    id: i64,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    namespace_id: i64,
    namespace_name: String,
    namespace_visibility: String,
    namespace_global: bool,
}

impl RepositoryRow {
    fn into_domain(self) -> Result<Repository, StoreError> {
        let visibility = self
            .namespace_visibility
            .parse::<Visibility>()
            .map_err(StoreError::Internal)?;

        let namespace = NamespaceRef::reconstruct(
            self.namespace_id,
            self.namespace_name,
            visibility,
            self.namespace_global,
        );

        Ok(Repository::reconstruct(
            RepositoryId::new(self.id),
            self.name,
            namespace,
            self.created_at,
            self.updated_at,
        ))
    }
}
