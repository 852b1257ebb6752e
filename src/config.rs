use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use url::Url;

use crate::service::password::PasswordScheme;

/// Deployment environment. `production` turns on TLS for PostgreSQL connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub app_env: AppEnv,
    pub loglevel: String,
    pub static_dir: PathBuf,
    pub password_scheme: PasswordScheme,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            database_url: "sqlite://cafeteria.db".to_string(),
            app_env: AppEnv::Development,
            loglevel: "info".to_string(),
            static_dir: PathBuf::from("static"),
            password_scheme: PasswordScheme::Plaintext,
            max_connections: 10,
        }
    }
}

impl Config {
    /// Layered sources: defaults, then `PORT`/`DATABASE_URL`/`APP_ENV`,
    /// then anything prefixed with `CAFETERIA_`.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["port", "database_url", "app_env"]))
            .merge(Env::prefixed("CAFETERIA_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn require_tls(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    /// Database URL safe for logs: any password component is masked.
    pub fn redacted_database_url(&self) -> String {
        match Url::parse(&self.database_url) {
            Ok(mut url) if url.password().is_some() => {
                let _ = url.set_password(Some("****"));
                url.to_string()
            }
            _ => self.database_url.clone(),
        }
    }
}
