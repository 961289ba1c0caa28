use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        jwt::JwtKeys,
        services,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, AppError> {
    let user = services::register(state.users.as_ref(), &payload.email, &payload.password).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let token =
        services::login(state.users.as_ref(), &keys, &payload.email, &payload.password).await?;
    info!(email = %payload.email, "user logged in");
    Ok(Json(LoginResponse { token }))
}
