use crate::db::models::{Cafe, CafeRecord, NewRegistration, StoredCredential};
use crate::db::{POSTGRES_INIT, statements};
use crate::error::CafeteriaError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;

// Ids are projected as BIGINT so tables created with SERIAL/INTEGER keys
// decode into the same `i64` fields as BIGSERIAL ones.
const INSERT_USER: &str =
    "INSERT INTO usuarios (usuario, password) VALUES ($1, $2) RETURNING id::BIGINT AS id";
const INSERT_CAFE: &str =
    "INSERT INTO cafes (nombre, direccion, usuario_id) VALUES ($1, $2, $3)";
const SELECT_CREDENTIAL: &str =
    "SELECT id::BIGINT AS id, password FROM usuarios WHERE usuario = $1";
const LIST_CAFES: &str = "SELECT id::BIGINT AS id, nombre, direccion, cafes_pendientes \
     FROM cafes ORDER BY nombre";
const SELECT_CAFE: &str = "SELECT id::BIGINT AS id, nombre, direccion, cafes_pendientes \
     FROM cafes WHERE id = $1";
const UPDATE_COUNT: &str = "UPDATE cafes SET cafes_pendientes = $1 WHERE id = $2 \
     RETURNING id::BIGINT AS id, nombre, direccion, cafes_pendientes, \
     usuario_id::BIGINT AS usuario_id, created_at";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect with TLS required when `require_tls` is set, plain TCP otherwise.
    pub async fn connect(
        url: &str,
        require_tls: bool,
        max_connections: u32,
    ) -> Result<Self, CafeteriaError> {
        let ssl_mode = if require_tls {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };
        let options = PgConnectOptions::from_str(url)?.ssl_mode(ssl_mode);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn init_schema(&self) -> Result<(), CafeteriaError> {
        for stmt in statements(POSTGRES_INIT) {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert user and cafe inside one transaction; returns the new user id.
    pub async fn register(&self, new: &NewRegistration) -> Result<i64, CafeteriaError> {
        let mut tx = self.pool.begin().await?;

        let (user_id,): (i64,) = sqlx::query_as(INSERT_USER)
            .bind(&new.usuario)
            .bind(&new.password)
            .fetch_one(&mut *tx)
            .await
            .map_err(CafeteriaError::from_user_insert)?;

        sqlx::query(INSERT_CAFE)
            .bind(&new.nombre_cafe)
            .bind(&new.direccion)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user_id)
    }

    pub async fn find_credential(
        &self,
        usuario: &str,
    ) -> Result<Option<StoredCredential>, CafeteriaError> {
        let row = sqlx::query_as(SELECT_CREDENTIAL)
            .bind(usuario)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_cafes(&self) -> Result<Vec<Cafe>, CafeteriaError> {
        let rows = sqlx::query_as(LIST_CAFES).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_cafe(&self, id: i64) -> Result<Option<Cafe>, CafeteriaError> {
        let row = sqlx::query_as(SELECT_CAFE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn set_pending_count(
        &self,
        id: i64,
        cafes_pendientes: i32,
    ) -> Result<Option<CafeRecord>, CafeteriaError> {
        let row = sqlx::query_as(UPDATE_COUNT)
            .bind(cafes_pendientes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_projection_is_widened_to_bigint() {
        for sql in [INSERT_USER, SELECT_CREDENTIAL, LIST_CAFES, SELECT_CAFE, UPDATE_COUNT] {
            assert!(sql.contains("id::BIGINT AS id"), "{sql}");
        }
        assert!(UPDATE_COUNT.contains("usuario_id::BIGINT AS usuario_id"));
        assert!(!UPDATE_COUNT.contains("RETURNING *"));
    }
}
