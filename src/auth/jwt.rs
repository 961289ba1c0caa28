use std::time::Duration;

use anyhow::Context;
use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{auth::claims::Claims, config::JwtConfig, error::AppError, state::AppState};

/// Signing and verification keys for bearer tokens.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub ttl: Option<Duration>,
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            ttl: cfg
                .ttl_minutes
                .map(|m| Duration::from_secs(u64::try_from(m).unwrap_or(0).saturating_mul(60))),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from(&state.config.jwt)
    }
}

/// Second space-separated segment of an `Authorization` value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.split(' ').nth(1).filter(|t| !t.is_empty())
}

impl JwtKeys {
    /// Claims for a user, stamped with `iat`, `iss` and (if configured) `exp`.
    ///
    /// Fails when `now + ttl` is not a representable timestamp.
    pub fn claims_for(&self, user_id: Uuid, email: &str) -> anyhow::Result<Claims> {
        let now = OffsetDateTime::now_utc();
        let exp = match self.ttl {
            Some(ttl) => {
                let secs = i64::try_from(ttl.as_secs()).context("token ttl out of range")?;
                let exp = now
                    .checked_add(TimeDuration::seconds(secs))
                    .context("token expiry out of range")?;
                Some(exp.unix_timestamp() as usize)
            }
            None => None,
        };
        Ok(Claims {
            id: user_id,
            email: email.to_owned(),
            iat: now.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            exp,
        })
    }

    pub fn issue(&self, claims: &Claims) -> anyhow::Result<String> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?;
        debug!(user_id = %claims.id, "jwt signed");
        Ok(token)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        if self.ttl.is_some() {
            validation.set_required_spec_claims(&["exp", "iss"]);
        } else {
            validation.set_required_spec_claims(&["iss"]);
        }
        validation
    }

    /// Signature, issuer and (when a TTL is configured) expiry check.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation()).map_err(|e| {
            warn!(error = %e, "token rejected");
            AppError::Forbidden
        })?;
        debug!(user_id = %data.claims.id, "jwt verified");
        Ok(data.claims)
    }

    /// Full guard decision for an optional `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Claims, AppError> {
        let token = header
            .and_then(bearer_token)
            .ok_or(AppError::Unauthenticated)?;
        self.verify(token)
    }
}
