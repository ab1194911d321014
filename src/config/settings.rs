use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::models::Result;
use crate::progression::{ThresholdSettings, ThresholdTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub certification: CertificationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationSettings {
    pub thresholds: ThresholdSettings,
    pub issuing_body: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Career Engine".to_string(),
                log_level: "info".to_string(),
            },
            database: DatabaseSettings {
                url: "sqlite://career_saves.db?mode=rwc".to_string(),
                max_connections: 5,
                connect_timeout_seconds: 30,
            },
            certification: CertificationSettings {
                thresholds: ThresholdSettings::default(),
                issuing_body: "RIAA".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> std::result::Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CAREER_ENGINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::result::Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn threshold_table(&self) -> Result<ThresholdTable> {
        ThresholdTable::from_settings(&self.certification.thresholds)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.threshold_table().map_err(|e| e.to_string())?;

        if self.database.max_connections == 0 {
            return Err("Database pool needs at least one connection".to_string());
        }

        if self.certification.issuing_body.trim().is_empty() {
            return Err("Issuing body must not be empty".to_string());
        }

        Ok(())
    }
}
