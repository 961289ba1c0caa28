use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{error, info, instrument};

use super::{
    dto::{without_reserved, MessageResponse},
    repo_types::{Movie, MovieAttributes},
};
use crate::{auth::extractors::AuthUser, error::AppError, state::AppState};

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/:id", put(update_movie).delete(delete_movie))
}

/// Movie ids are integers; anything else is treated like an unknown id.
fn parse_id(raw: &str, failure: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        error!(id = %raw, "movie id is not an integer");
        AppError::StoreFailure(failure.into())
    })
}

/// Any unreadable body is reported like a failed write.
fn attributes_or(
    body: Result<Json<MovieAttributes>, JsonRejection>,
    failure: &str,
) -> Result<MovieAttributes, AppError> {
    match body {
        Ok(Json(attrs)) => Ok(without_reserved(attrs)),
        Err(rejection) => {
            error!(error = %rejection, "movie body rejected");
            Err(AppError::StoreFailure(failure.into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = state.movies.list().await.map_err(|e| {
        error!(error = %e, "list movies failed");
        AppError::StoreFailure("Failed to fetch movies".into())
    })?;
    Ok(Json(movies))
}

#[instrument(skip(state, user, body))]
pub async fn create_movie(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<MovieAttributes>, JsonRejection>,
) -> Result<Json<Movie>, AppError> {
    const FAILURE: &str = "Failed to save movie";
    let attributes = attributes_or(body, FAILURE)?;
    let movie = state.movies.create(attributes).await.map_err(|e| {
        error!(error = %e, user_id = %user.id, "create movie failed");
        AppError::StoreFailure(FAILURE.into())
    })?;
    info!(movie_id = movie.id, user_id = %user.id, "movie created");
    Ok(Json(movie))
}

#[instrument(skip(state, user, body))]
pub async fn update_movie(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<MovieAttributes>, JsonRejection>,
) -> Result<Json<Movie>, AppError> {
    const FAILURE: &str = "Failed to update movie";
    let id = parse_id(&id, FAILURE)?;
    let attributes = attributes_or(body, FAILURE)?;
    let movie = state
        .movies
        .update(id, attributes)
        .await
        .map_err(|e| {
            error!(error = %e, movie_id = id, user_id = %user.id, "update movie failed");
            AppError::StoreFailure(FAILURE.into())
        })?;
    info!(movie_id = id, user_id = %user.id, "movie updated");
    Ok(Json(movie))
}

#[instrument(skip(state, user))]
pub async fn delete_movie(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    const FAILURE: &str = "Failed to delete";
    let id = parse_id(&id, FAILURE)?;
    state.movies.delete(id).await.map_err(|e| {
        error!(error = %e, movie_id = id, user_id = %user.id, "delete movie failed");
        AppError::StoreFailure(FAILURE.into())
    })?;
    info!(movie_id = id, user_id = %user.id, "movie deleted");
    Ok(Json(MessageResponse { message: "Deleted" }))
}
