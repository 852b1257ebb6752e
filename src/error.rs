use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum CafeteriaError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid path identifier: {0}")]
    InvalidId(String),

    #[error("required fields are missing or blank")]
    MissingFields,

    #[error("user already exists")]
    UserExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("cafe {0} not found")]
    CafeNotFound(i64),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Unsupported database url scheme: {0}")]
    UnsupportedDatabase(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl CafeteriaError {
    /// Map sqlx errors from user inserts, turning a UNIQUE violation into `UserExists`.
    pub fn from_user_insert(e: SqlxError) -> Self {
        if let SqlxError::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return CafeteriaError::UserExists;
        }
        CafeteriaError::DatabaseError(e)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CafeteriaError::InvalidRequest(_)
            | CafeteriaError::InvalidId(_)
            | CafeteriaError::MissingFields
            | CafeteriaError::UserExists => StatusCode::BAD_REQUEST,
            CafeteriaError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            CafeteriaError::CafeNotFound(_) => StatusCode::NOT_FOUND,
            CafeteriaError::DatabaseError(_)
            | CafeteriaError::UnsupportedDatabase(_)
            | CafeteriaError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> &'static str {
        match self {
            CafeteriaError::InvalidRequest(_) => "Solicitud inválida",
            CafeteriaError::InvalidId(_) => "Identificador inválido",
            CafeteriaError::MissingFields => "Faltan campos obligatorios",
            CafeteriaError::UserExists => "El usuario ya existe",
            CafeteriaError::InvalidCredentials => "Credenciales inválidas",
            CafeteriaError::CafeNotFound(_) => "Café no encontrado",
            _ => "Error del servidor",
        }
    }
}

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for CafeteriaError {
    /// Only transport-level failures while reaching the store are worth another attempt.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            CafeteriaError::DatabaseError(SqlxError::Io(_) | SqlxError::PoolTimedOut)
        )
    }
}

impl IntoResponse for CafeteriaError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ApiFailure {
            success: false,
            message: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Failure envelope shared by every endpoint: `{ "success": false, "message": ... }`.
#[derive(Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: CafeteriaError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, serde_json::from_slice(&body).expect("body was not json"))
    }

    #[tokio::test]
    async fn duplicate_user_is_a_bad_request() {
        let (status, body) = render(CafeteriaError::UserExists).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "El usuario ya existe");
    }

    #[tokio::test]
    async fn store_failures_do_not_leak_details() {
        let (status, body) = render(CafeteriaError::DatabaseError(SqlxError::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error del servidor");
        assert!(!body.to_string().contains("RowNotFound"));
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            CafeteriaError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(CafeteriaError::CafeNotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            CafeteriaError::MissingFields.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CafeteriaError::PasswordHash("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(CafeteriaError::DatabaseError(SqlxError::PoolTimedOut).is_retryable());
        assert!(!CafeteriaError::DatabaseError(SqlxError::RowNotFound).is_retryable());
        assert!(!CafeteriaError::UserExists.is_retryable());
    }
}
