use tracing::{debug, info};

use crate::db::{NewRegistration, Store};
use crate::error::CafeteriaError;
use crate::service::password::PasswordScheme;
use crate::types::api::{LoginRequest, RegisterRequest};

/// Registration and login on top of the store, independent of the credential scheme.
pub struct AccountService<'a> {
    store: &'a Store,
    scheme: PasswordScheme,
}

impl<'a> AccountService<'a> {
    pub fn new(store: &'a Store, scheme: PasswordScheme) -> Self {
        Self { store, scheme }
    }

    /// Create the user and its cafe atomically. Returns the new user id.
    pub async fn register(&self, req: RegisterRequest) -> Result<i64, CafeteriaError> {
        req.validate()?;

        let password = self.scheme.encode(&req.password)?;
        let new = NewRegistration {
            usuario: req.usuario,
            password,
            nombre_cafe: req.nombre_cafe,
            direccion: req.direccion,
        };

        let user_id = self.store.register(&new).await?;
        info!(user_id, usuario = %new.usuario, cafe = %new.nombre_cafe, "registered user and cafe");
        Ok(user_id)
    }

    /// Resolve credentials to a user id. Unknown or blank names and wrong
    /// passwords all end as `InvalidCredentials`.
    pub async fn login(&self, req: LoginRequest) -> Result<i64, CafeteriaError> {
        let Some(stored) = self.store.find_credential(&req.usuario).await? else {
            debug!(usuario = %req.usuario, "login for unknown user");
            return Err(CafeteriaError::InvalidCredentials);
        };

        if !self.scheme.verify(&req.password, &stored.password) {
            debug!(usuario = %req.usuario, "login with wrong password");
            return Err(CafeteriaError::InvalidCredentials);
        }

        Ok(stored.id)
    }
}
