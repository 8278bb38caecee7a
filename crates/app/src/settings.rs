//! Settings of the application. Configuration is read from `settings.toml`
//! (optional) and `BUDGET_*` environment variables, e.g.
//! `BUDGET_SERVER__PORT=8080`.
//!
//! ```toml
//! [app]
//! level = "info"
//! timezone = "Europe/Rome"
//! seed_demo = true
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 3000
//! storage = { json = "data/budget.json" }
//! ```

use chrono_tz::Tz;
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("unknown timezone \"{0}\"")]
    Timezone(String),
}

#[derive(Debug, Parser)]
#[command(version, about = "Income and expense tracker HTTP service")]
struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, env = "BUDGET_CONFIG", default_value = "settings")]
    config: String,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    #[default]
    Memory,
    Json(PathBuf),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
    pub timezone: String,
    pub seed_demo: bool,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    #[serde(default)]
    pub storage: Storage,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let cli = Cli::parse();
        Self::load(&cli.config)
    }

    fn load(file: &str) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("app.timezone", "UTC")?
            .set_default("app.seed_demo", false)?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("BUDGET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Calendar used to bucket transactions by year and month.
    pub fn timezone(&self) -> Result<Tz, SettingsError> {
        self.app
            .timezone
            .parse()
            .map_err(|_| SettingsError::Timezone(self.app.timezone.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_settings(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, body).unwrap();
        dir.path().join("settings").to_string_lossy().into_owned()
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("missing").to_string_lossy()).unwrap();

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.storage, Storage::Memory);
        assert_eq!(settings.timezone().unwrap(), Tz::UTC);
        assert!(!settings.app.seed_demo);
    }

    #[test]
    fn reads_json_storage_and_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_settings(
            &dir,
            r#"
            [app]
            timezone = "Europe/Rome"
            seed_demo = true

            [server]
            port = 8080
            storage = { json = "data/budget.json" }
            "#,
        );

        let settings = Settings::load(&file).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.server.storage,
            Storage::Json(PathBuf::from("data/budget.json"))
        );
        assert_eq!(settings.timezone().unwrap(), Tz::Europe__Rome);
        assert!(settings.app.seed_demo);
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_settings(&dir, "[app]\ntimezone = \"Mars/Olympus\"\n");

        let settings = Settings::load(&file).unwrap();
        assert!(matches!(
            settings.timezone(),
            Err(SettingsError::Timezone(_))
        ));
    }
}
