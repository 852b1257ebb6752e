use crate::db::models::{Cafe, CafeRecord, NewRegistration, StoredCredential};
use crate::db::{SQLITE_INIT, statements};
use crate::error::CafeteriaError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database file behind `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, CafeteriaError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn init_schema(&self) -> Result<(), CafeteriaError> {
        for stmt in statements(SQLITE_INIT) {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert user and cafe inside one transaction; returns the new user id.
    pub async fn register(&self, new: &NewRegistration) -> Result<i64, CafeteriaError> {
        let mut tx = self.pool.begin().await?;

        let (user_id,): (i64,) =
            sqlx::query_as("INSERT INTO usuarios (usuario, password) VALUES (?, ?) RETURNING id")
                .bind(&new.usuario)
                .bind(&new.password)
                .fetch_one(&mut *tx)
                .await
                .map_err(CafeteriaError::from_user_insert)?;

        sqlx::query("INSERT INTO cafes (nombre, direccion, usuario_id) VALUES (?, ?, ?)")
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
        let row = sqlx::query_as("SELECT id, password FROM usuarios WHERE usuario = ?")
            .bind(usuario)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list_cafes(&self) -> Result<Vec<Cafe>, CafeteriaError> {
        let rows = sqlx::query_as(
            "SELECT id, nombre, direccion, cafes_pendientes FROM cafes ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_cafe(&self, id: i64) -> Result<Option<Cafe>, CafeteriaError> {
        let row = sqlx::query_as(
            "SELECT id, nombre, direccion, cafes_pendientes FROM cafes WHERE id = ?",
        )
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
        let row = sqlx::query_as(
            r#"UPDATE cafes SET cafes_pendientes = ? WHERE id = ?
               RETURNING id, nombre, direccion, cafes_pendientes, usuario_id, created_at"#,
        )
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
