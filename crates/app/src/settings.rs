//! Handles settings for the application. Configuration is read from
//! `config/roomsplit.toml` (optional) and `ROOMSPLIT_*` environment variables,
//! nested keys separated by `__` (e.g. `ROOMSPLIT_TARIFF__SERVICE_FEE`).
use engine::{Currency, Tariff};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/roomsplit";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the `roomsplit` and `engine` targets.
    pub level: String,
    pub currency: Currency,
    /// Default prices of a new rent bill.
    pub tariff: Tariff,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: Currency::Vnd,
            tariff: Tariff::default(),
        }
    }
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("ROOMSPLIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use engine::Money;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::new(Some("does/not/exist")).unwrap();
        assert_eq!(settings.currency, Currency::Vnd);
        assert_eq!(settings.tariff, Tariff::default());
    }

    #[test]
    fn toml_overrides_tariff_partially() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                "level = \"debug\"\n[tariff]\nservice_fee = 150000\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.tariff.service_fee, Money::new(150_000));
        assert_eq!(settings.tariff.room_base_fee, Money::new(3_000_000));
    }
}
