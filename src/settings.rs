//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` in the working directory, overridden by
//! `GROUPSPLIT_*` environment variables (`__` separates nested keys, e.g.
//! `GROUPSPLIT_AUTH__SECRET`).
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

use crate::balance::BalanceOptions;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub secret: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
    #[serde(default)]
    pub balance: BalanceOptions,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(File::with_name("settings").required(false))
    }

    fn load<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("GROUPSPLIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
