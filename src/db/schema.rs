//! SQL DDL for bootstrapping the store. Every statement is idempotent so the
//! scripts run on each startup.

/// SQLite schema:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT on both tables
/// - `usuarios.usuario` UNIQUE
/// - `cafes.usuario_id` references `usuarios(id)` (enforced with `foreign_keys=ON`)
/// - `created_at` stored as `YYYY-MM-DD HH:MM:SS` text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    usuario VARCHAR(50) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS cafes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre VARCHAR(100) NOT NULL,
    direccion VARCHAR(255) NULL,
    cafes_pendientes INTEGER NOT NULL DEFAULT 0,
    usuario_id INTEGER NULL REFERENCES usuarios(id),
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_cafes_nombre ON cafes(nombre);
"#;

/// PostgreSQL schema. Keys are BIGSERIAL so both backends decode ids as `i64`.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id BIGSERIAL PRIMARY KEY,
    usuario VARCHAR(50) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS cafes (
    id BIGSERIAL PRIMARY KEY,
    nombre VARCHAR(100) NOT NULL,
    direccion VARCHAR(255) NULL,
    cafes_pendientes INTEGER NOT NULL DEFAULT 0,
    usuario_id BIGINT NULL REFERENCES usuarios(id),
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_cafes_nombre ON cafes(nombre);
"#;
