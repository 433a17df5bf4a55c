//! Handles settings for the application. Configuration is written in
//! `settings.toml` and can be overridden with `LEDGERLY__*` environment
//! variables, e.g. `LEDGERLY__SERVER__PORT=8080`.
//!
//! See `settings.toml` for the configuration.
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Database,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("LEDGERLY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            "#,
        );
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.bind, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.database.url(), "sqlite::memory:");
    }

    #[test]
    fn sqlite_database_path() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            port = 8080
            database = { sqlite = "data/ledgerly.db" }
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.server.database.url(),
            "sqlite:data/ledgerly.db?mode=rwc"
        );
    }
}
