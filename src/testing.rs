//! In-memory stores for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::{repo::UserStore, repo_types::User},
    db::StoreError,
    movies::{
        repo::MovieStore,
        repo_types::{Movie, MovieAttributes},
    },
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Every call fails with a backend error.
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _email: &str, _password_hash: &str) -> Result<User, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }
}

/// Every call fails with a backend error.
pub struct FailingMovieStore;

#[async_trait]
impl MovieStore for FailingMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _attributes: MovieAttributes) -> Result<Movie, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _attributes: MovieAttributes) -> Result<Movie, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }
}

#[derive(Default)]
pub struct MemoryMovieStore {
    inner: Mutex<MovieTable>,
}

#[derive(Default)]
struct MovieTable {
    next_id: i64,
    rows: Vec<Movie>,
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn list(&self) -> Result<Vec<Movie>, StoreError> {
        let table = self.inner.lock().unwrap();
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn create(&self, attributes: MovieAttributes) -> Result<Movie, StoreError> {
        let mut table = self.inner.lock().unwrap();
        table.next_id += 1;
        let movie = Movie {
            id: table.next_id,
            attributes,
            created_at: OffsetDateTime::now_utc(),
        };
        table.rows.push(movie.clone());
        Ok(movie)
    }

    async fn update(&self, id: i64, attributes: MovieAttributes) -> Result<Movie, StoreError> {
        let mut table = self.inner.lock().unwrap();
        let movie = table
            .rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;
        movie.attributes.extend(attributes);
        Ok(movie.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.inner.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|m| m.id != id);
        if table.rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
