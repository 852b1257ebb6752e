use axum::{Json, extract::State};

use crate::middleware::extract::ApiJson;
use crate::service::accounts::AccountService;
use crate::types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::{CafeteriaError, router::CafeteriaState};

/// POST /api/register -> creates a user and its cafe in one transaction.
pub async fn register_handler(
    State(state): State<CafeteriaState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, CafeteriaError> {
    AccountService::new(&state.store, state.password_scheme)
        .register(req)
        .await?;

    Ok(Json(RegisterResponse {
        success: true,
        message: "Usuario y café registrados exitosamente",
    }))
}

/// POST /api/login -> returns the matching user id.
pub async fn login_handler(
    State(state): State<CafeteriaState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, CafeteriaError> {
    let user_id = AccountService::new(&state.store, state.password_scheme)
        .login(req)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        user_id,
    }))
}
