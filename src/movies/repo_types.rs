use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;

/// Caller-supplied movie fields, stored as a JSONB object.
pub type MovieAttributes = Map<String, Value>;

#[derive(Debug, FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub attributes: Json<MovieAttributes>,
    pub created_at: OffsetDateTime,
}

/// A movie as returned to clients: its attributes flattened next to `id` and `createdAt`.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(flatten)]
    pub attributes: MovieAttributes,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<MovieRow> for Movie {
    fn from(r: MovieRow) -> Self {
        Self {
            id: r.id,
            attributes: r.attributes.0,
            created_at: r.created_at,
        }
    }
}
