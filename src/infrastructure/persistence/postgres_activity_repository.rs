use async_trait::async_trait;
use sqlx::PgPool;

use crate::application::ports::{ActivityError, ActivityRepository};
use crate::domain::entities::ActivityEntry;

pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn record(&self, entry: ActivityEntry) -> Result<(), ActivityError> {
        sqlx::query(
            r#"
            INSERT INTO activities (key, owner_id, trackable, namespace_id, parameters, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.kind.to_string())
        .bind(entry.owner_id)
        .bind(entry.trackable)
        .bind(entry.namespace_id)
        .bind(entry.parameters)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
