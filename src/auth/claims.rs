use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload identifying the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: Uuid,      // user ID
    pub email: String, // user email
    pub iat: usize,    // issued at (unix timestamp)
    pub iss: String,   // issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>, // only present when a token TTL is configured
}
