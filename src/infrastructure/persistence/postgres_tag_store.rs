use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{StoreError, TagStore};
use crate::domain::entities::{Author, Tag};
use crate::domain::value_objects::{Digest, RepositoryId, TagId};

const SELECT_TAG: &str = r#"
    SELECT t.id, t.name, t.digest, t.image_id, t.repository_id,
           t.created_at, t.updated_at,
           u.id AS author_id, u.username AS author_username
    FROM tags t
    JOIN users u ON u.id = t.user_id
"#;

pub struct PostgresTagStore {
    pool: PgPool,
}

impl PostgresTagStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStore for PostgresTagStore {
    async fn list_by_repository(
        &self,
        repository_id: RepositoryId,
    ) -> Result<Vec<Tag>, StoreError> {
        let rows = sqlx::query_as::<_, TagRow>(&format!(
            "{SELECT_TAG} WHERE t.repository_id = $1 ORDER BY t.id"
        ))
        .bind(repository_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, StoreError> {
        let row = sqlx::query_as::<_, TagRow>(&format!("{SELECT_TAG} WHERE t.id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TagRow::into_domain))
    }

    async fn delete(&self, id: TagId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    digest: String,
    image_id: Option<String>,
    repository_id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    author_id: i64,
    author_username: String,
}

impl TagRow {
    fn into_domain(self) -> Tag {
        Tag::reconstruct(
            TagId::new(self.id),
            self.name,
            Digest::new(self.digest),
            self.image_id,
            Author::new(self.author_id, self.author_username),
            RepositoryId::new(self.repository_id),
            self.created_at,
            self.updated_at,
        )
    }
}
