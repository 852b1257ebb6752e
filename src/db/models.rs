use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public view of a cafe, as returned by list and detail lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Cafe {
    pub id: i64,
    pub nombre: String,
    pub direccion: Option<String>,
    pub cafes_pendientes: i32,
}

/// Full `cafes` row, returned after a counter update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct CafeRecord {
    pub id: i64,
    pub nombre: String,
    pub direccion: Option<String>,
    pub cafes_pendientes: i32,
    pub usuario_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

/// Stored credential for a user name. `password` is whatever the active
/// `PasswordScheme` wrote at registration time.
#[derive(Debug, Clone, FromRow)]
pub struct StoredCredential {
    pub id: i64,
    pub password: String,
}

/// Everything needed to create a user together with its cafe.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub usuario: String,
    pub password: String,
    pub nombre_cafe: String,
    pub direccion: Option<String>,
}
