use axum::{Json, extract::State};
use tracing::info;

use crate::db::Cafe;
use crate::middleware::extract::{ApiJson, CafeId};
use crate::types::api::{CountUpdateRequest, CountUpdateResponse};
use crate::{CafeteriaError, router::CafeteriaState};

/// GET /api/cafes -> every cafe, ordered by name.
pub async fn list_cafes_handler(
    State(state): State<CafeteriaState>,
) -> Result<Json<Vec<Cafe>>, CafeteriaError> {
    Ok(Json(state.store.list_cafes().await?))
}

/// GET /api/cafes/{id}
pub async fn get_cafe_handler(
    State(state): State<CafeteriaState>,
    CafeId(id): CafeId,
) -> Result<Json<Cafe>, CafeteriaError> {
    state
        .store
        .get_cafe(id)
        .await?
        .map(Json)
        .ok_or(CafeteriaError::CafeNotFound(id))
}

/// PUT /api/cafes/{id}/count -> overwrites the pending counter and returns the full row.
pub async fn update_count_handler(
    State(state): State<CafeteriaState>,
    CafeId(id): CafeId,
    ApiJson(req): ApiJson<CountUpdateRequest>,
) -> Result<Json<CountUpdateResponse>, CafeteriaError> {
    let Some(cafe) = state
        .store
        .set_pending_count(id, req.cafes_pendientes)
        .await?
    else {
        return Err(CafeteriaError::CafeNotFound(id));
    };

    info!(cafe_id = id, cafes_pendientes = cafe.cafes_pendientes, "pending counter updated");
    Ok(Json(CountUpdateResponse {
        success: true,
        cafe,
    }))
}
