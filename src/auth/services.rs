//! Credential manager: registration and login.

use tracing::{error, warn};

use crate::{
    auth::{jwt::JwtKeys, password, repo::UserStore, repo_types::User},
    db::StoreError,
    error::AppError,
};

/// Hashes `password` and stores a new user.
pub async fn register(users: &dyn UserStore, email: &str, password: &str) -> Result<User, AppError> {
    match users.find_by_email(email).await {
        Ok(Some(_)) => {
            warn!(email = %email, "email already registered");
            return Err(AppError::DuplicateUser);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::StoreFailure("Failed to register user".into()));
        }
    }

    let hash = password::hash_password_blocking(password.to_owned())
        .await
        .map_err(|e| {
            error!(error = %e, "hash_password failed");
            AppError::StoreFailure("Failed to register user".into())
        })?;

    // The unique index still catches a concurrent registration of the same email.
    users.create(email, &hash).await.map_err(|e| match e {
        StoreError::Conflict => {
            warn!(email = %email, "email already registered");
            AppError::DuplicateUser
        }
        e => {
            error!(error = %e, "create user failed");
            AppError::StoreFailure("Failed to register user".into())
        }
    })
}

/// Checks credentials and returns a signed token for the user.
pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match users.find_by_email(email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::NotFound);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::StoreFailure("Failed to log in".into()));
        }
    };

    let ok = password::verify_password_blocking(password.to_owned(), user.password_hash.clone())
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            AppError::StoreFailure("Failed to log in".into())
        })?;

    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    keys
        .claims_for(user.id, &user.email)
        .and_then(|claims| keys.issue(&claims))
        .map_err(|e| {
            error!(error = %e, "jwt sign failed");
            AppError::StoreFailure("Failed to log in".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::testing::{FailingUserStore, MemoryUserStore};

    fn keys() -> JwtKeys {
        keys_with_ttl(None)
    }

    fn keys_with_ttl(ttl_minutes: Option<i64>) -> JwtKeys {
        JwtKeys::from(&JwtConfig {
            secret: "svc-secret".into(),
            issuer: "svc".into(),
            ttl_minutes,
        })
    }

    #[tokio::test]
    async fn register_hashes_password() {
        let users = MemoryUserStore::default();
        let user = register(&users, "a@b.io", "hunter22").await.unwrap();
        assert_eq!(user.email, "a@b.io");
        assert_ne!(user.password_hash, "hunter22");
        assert!(password::verify_password("hunter22", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn register_twice_is_duplicate() {
        let users = MemoryUserStore::default();
        register(&users, "a@b.io", "pw").await.unwrap();
        let err = register(&users, "a@b.io", "other").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateUser));
    }

    #[tokio::test]
    async fn login_returns_token_for_user() {
        let users = MemoryUserStore::default();
        let keys = keys();
        let user = register(&users, "a@b.io", "pw").await.unwrap();
        let token = login(&users, &keys, "a@b.io", "pw").await.unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, user.email);
    }

    #[tokio::test]
    async fn login_failures() {
        let users = MemoryUserStore::default();
        let keys = keys();
        register(&users, "a@b.io", "pw").await.unwrap();

        let err = login(&users, &keys, "a@b.io", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        let err = login(&users, &keys, "nobody@b.io", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn store_errors_surface_as_store_failure() {
        let users = FailingUserStore;
        let err = register(&users, "a@b.io", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::StoreFailure(_)));
        let err = login(&users, &keys(), "a@b.io", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::StoreFailure(_)));
    }

    #[tokio::test]
    async fn unrepresentable_expiry_fails_login_without_panic() {
        let users = MemoryUserStore::default();
        register(&users, "a@b.io", "pw").await.unwrap();
        let keys = keys_with_ttl(Some(10_000_000_000_000));
        let err = login(&users, &keys, "a@b.io", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::StoreFailure(m) if m == "Failed to log in"));
    }
}
