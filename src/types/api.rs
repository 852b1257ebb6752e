use serde::{Deserialize, Serialize};

use crate::db::CafeRecord;
use crate::error::CafeteriaError;

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Body of `POST /api/register`. Absent text fields deserialize as empty and
/// are rejected by `validate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "nombreCafe")]
    pub nombre_cafe: String,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), CafeteriaError> {
        if is_blank(&self.usuario) || is_blank(&self.password) || is_blank(&self.nombre_cafe) {
            return Err(CafeteriaError::MissingFields);
        }
        Ok(())
    }
}

/// Body of `POST /api/login`. Absent fields deserialize as empty and simply
/// match no user.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /api/cafes/{id}/count`. Any integer is written as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct CountUpdateRequest {
    pub cafes_pendientes: i32,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CountUpdateResponse {
    pub success: bool,
    pub cafe: CafeRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_accepts_camel_case_cafe_name() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "usuario": "ana",
            "password": "pw",
            "nombreCafe": "La Esquina",
            "direccion": "Calle 1"
        }))
        .unwrap();
        assert_eq!(req.nombre_cafe, "La Esquina");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_without_cafe_name_is_missing_fields() {
        let req: RegisterRequest =
            serde_json::from_value(json!({ "usuario": "ana", "password": "pw" })).unwrap();
        assert!(matches!(req.validate(), Err(CafeteriaError::MissingFields)));
    }

    #[test]
    fn empty_login_body_deserializes_to_blank_fields() {
        let req: LoginRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.usuario.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn counter_accepts_negative_values() {
        let req: CountUpdateRequest =
            serde_json::from_value(json!({ "cafes_pendientes": -3 })).unwrap();
        assert_eq!(req.cafes_pendientes, -3);
    }

    #[test]
    fn login_response_uses_user_id_key() {
        let body = serde_json::to_value(LoginResponse {
            success: true,
            user_id: 4,
        })
        .unwrap();
        assert_eq!(body, json!({ "success": true, "userId": 4 }));
    }
}
