use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use super::repo_types::{Movie, MovieAttributes, MovieRow};
use crate::db::StoreError;

/// Persistence for movie records.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies, newest first.
    async fn list(&self) -> Result<Vec<Movie>, StoreError>;

    async fn create(&self, attributes: MovieAttributes) -> Result<Movie, StoreError>;

    /// Merges `attributes` into the stored set; `StoreError::NotFound` for an unknown id.
    async fn update(&self, id: i64, attributes: MovieAttributes) -> Result<Movie, StoreError>;

    /// `StoreError::NotFound` for an unknown id.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgMovieStore {
    db: PgPool,
}

impl PgMovieStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, attributes, created_at
            FROM movies
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn create(&self, attributes: MovieAttributes) -> Result<Movie, StoreError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            INSERT INTO movies (attributes)
            VALUES ($1)
            RETURNING id, attributes, created_at
            "#,
        )
        .bind(Json(attributes))
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: i64, attributes: MovieAttributes) -> Result<Movie, StoreError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            UPDATE movies
               SET attributes = attributes || $2
             WHERE id = $1
            RETURNING id, attributes, created_at
            "#,
        )
        .bind(id)
        .bind(Json(attributes))
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
