use serde::Serialize;

use super::repo_types::MovieAttributes;

/// Keys owned by the store; ignored when a client sends them.
const RESERVED_KEYS: [&str; 2] = ["id", "createdAt"];

pub fn without_reserved(mut attrs: MovieAttributes) -> MovieAttributes {
    for key in RESERVED_KEYS {
        attrs.remove(key);
    }
    attrs
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
