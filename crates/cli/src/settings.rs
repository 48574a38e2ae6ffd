//! Handles settings for the machine. Configuration is read from an optional
//! TOML file, `CAFETERA_*` environment variables, and command-line overrides,
//! in that order.
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/cafetera.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the env filter (error, warn, info, debug, trace).
    pub level: String,
    pub admin: AdminSettings,
    pub capacity: CapacitySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CapacitySettings {
    pub water_ml: u32,
    pub milk_ml: u32,
    pub beans_g: u32,
    pub cups: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            admin: AdminSettings::default(),
            capacity: CapacitySettings::default(),
        }
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        let factory = engine::AdminCredentials::default();
        Self {
            username: factory.username,
            password: factory.password,
        }
    }
}

impl Default for CapacitySettings {
    fn default() -> Self {
        let capacity = engine::Capacity::default();
        Self {
            water_ml: capacity.water_ml,
            milk_ml: capacity.milk_ml,
            beans_g: capacity.beans_g,
            cups: capacity.cups,
        }
    }
}

impl Settings {
    pub fn capacity(&self) -> engine::Capacity {
        engine::Capacity {
            water_ml: self.capacity.water_ml,
            milk_ml: self.capacity.milk_ml,
            beans_g: self.capacity.beans_g,
            cups: self.capacity.cups,
        }
    }

    pub fn admin_credentials(&self) -> engine::AdminCredentials {
        engine::AdminCredentials::new(&self.admin.username, &self.admin.password)
    }
}

#[derive(Debug, Parser)]
#[command(name = "cafetera", about = "Interactive coffee vending machine")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<Settings> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CAFETERA").separator("__"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_engine_factory_values() {
        let settings = Settings::default();
        assert_eq!(settings.level, "info");
        assert_eq!(settings.capacity(), engine::Capacity::default());
        assert_eq!(
            settings.admin_credentials(),
            engine::AdminCredentials::default()
        );
    }
}
