use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::models::{Cafe, CafeRecord, NewRegistration, StoredCredential};
use crate::db::postgres::PostgresStore;
use crate::db::sqlite::SqliteStore;
use crate::error::{CafeteriaError, IsRetryable};

fn connect_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// Store handle shared by all handlers. Cloning is cheap: both variants wrap a pool.
#[derive(Clone)]
pub enum Store {
    Sqlite(SqliteStore),
    Postgres(PostgresStore),
}

impl Store {
    /// Pick the backend from the URL scheme and open a pool.
    pub async fn connect(
        database_url: &str,
        require_tls: bool,
        max_connections: u32,
    ) -> Result<Self, CafeteriaError> {
        if database_url.starts_with("sqlite:") {
            let store = SqliteStore::connect(database_url, max_connections).await?;
            Ok(Store::Sqlite(store))
        } else if database_url.starts_with("postgres://")
            || database_url.starts_with("postgresql://")
        {
            let store = PostgresStore::connect(database_url, require_tls, max_connections).await?;
            Ok(Store::Postgres(store))
        } else {
            let scheme = database_url
                .split_once(':')
                .map(|(s, _)| s)
                .unwrap_or(database_url);
            Err(CafeteriaError::UnsupportedDatabase(scheme.to_string()))
        }
    }

    /// Startup entry point: connect with backoff on transient failures, then bootstrap tables.
    pub async fn open(cfg: &Config) -> Result<Self, CafeteriaError> {
        let store = (|| async move {
            Store::connect(&cfg.database_url, cfg.require_tls(), cfg.max_connections).await
        })
        .retry(connect_retry_policy())
        .when(|e: &CafeteriaError| e.is_retryable())
        .notify(|err, dur: Duration| {
            warn!(error = %err, "store connection failed, retrying in {:?}", dur);
        })
        .await?;

        store.init_schema().await?;
        info!(backend = store.backend_name(), "store ready, tables initialized");
        Ok(store)
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Sqlite(_) => "sqlite",
            Store::Postgres(_) => "postgres",
        }
    }

    pub async fn init_schema(&self) -> Result<(), CafeteriaError> {
        match self {
            Store::Sqlite(s) => s.init_schema().await,
            Store::Postgres(s) => s.init_schema().await,
        }
    }

    pub async fn register(&self, new: &NewRegistration) -> Result<i64, CafeteriaError> {
        match self {
            Store::Sqlite(s) => s.register(new).await,
            Store::Postgres(s) => s.register(new).await,
        }
    }

    pub async fn find_credential(
        &self,
        usuario: &str,
    ) -> Result<Option<StoredCredential>, CafeteriaError> {
        match self {
            Store::Sqlite(s) => s.find_credential(usuario).await,
            Store::Postgres(s) => s.find_credential(usuario).await,
        }
    }

    pub async fn list_cafes(&self) -> Result<Vec<Cafe>, CafeteriaError> {
        match self {
            Store::Sqlite(s) => s.list_cafes().await,
            Store::Postgres(s) => s.list_cafes().await,
        }
    }

    pub async fn get_cafe(&self, id: i64) -> Result<Option<Cafe>, CafeteriaError> {
        match self {
            Store::Sqlite(s) => s.get_cafe(id).await,
            Store::Postgres(s) => s.get_cafe(id).await,
        }
    }

    pub async fn set_pending_count(
        &self,
        id: i64,
        cafes_pendientes: i32,
    ) -> Result<Option<CafeRecord>, CafeteriaError> {
        match self {
            Store::Sqlite(s) => s.set_pending_count(id, cafes_pendientes).await,
            Store::Postgres(s) => s.set_pending_count(id, cafes_pendientes).await,
        }
    }

    /// Drain and close the pool; call once after the server stops accepting requests.
    pub async fn close(&self) {
        match self {
            Store::Sqlite(s) => s.close().await,
            Store::Postgres(s) => s.close().await,
        }
        info!(backend = self.backend_name(), "store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let err = Store::connect("mysql://localhost/cafes", false, 1)
            .await
            .err()
            .expect("mysql must not be accepted");
        assert!(matches!(err, CafeteriaError::UnsupportedDatabase(ref s) if s == "mysql"));
    }
}
