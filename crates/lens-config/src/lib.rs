//! # lens-config
//!
//! Layered configuration loading for Marketlens using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LENS_*` prefix, `__` as separator)
//! 2. Project-level `.lens/config.toml`
//! 3. User-level `~/.config/lens/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LENS_API__BASE_URL` -> `api.base_url`,
//! `LENS_VIEWS__PAGE_SIZES__SELLERS` -> `views.page_sizes.sellers`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lens_config::LensConfig;
//!
//! let config = LensConfig::load_with_dotenv().expect("config");
//! if config.api.is_configured() {
//!     println!("API: {}", config.api.base_url);
//! }
//! ```

mod api;
mod error;
mod radar;
mod views;
mod weekday;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use radar::RadarConfig;
pub use views::ViewsConfig;
pub use weekday::WeekdayConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct LensConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub views: ViewsConfig,
    #[serde(default)]
    pub weekday: WeekdayConfig,
    #[serde(default)]
    pub radar: RadarConfig,
}

impl LensConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lens/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LENS_").split("__"))
    }

    /// Reject values that would make views or charts degenerate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero page sizes, a zero
    /// timeout, or radar axes with a non-positive ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.views.default_page_size == 0 {
            return Err(invalid("views.default_page_size", "must be at least 1"));
        }
        if let Some((view, _)) = self.views.page_sizes.iter().find(|(_, size)| **size == 0) {
            return Err(invalid(
                &format!("views.page_sizes.{view}"),
                "must be at least 1",
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be at least 1"));
        }
        if let Some(axis) = self
            .radar
            .axes
            .iter()
            .find(|axis| !(axis.ceiling.is_finite() && axis.ceiling > 0.0))
        {
            return Err(invalid(
                &format!("radar.axes.{}", axis.field),
                &format!("ceiling must be positive, got {}", axis.ceiling),
            ));
        }
        Ok(())
    }

    /// Require the API section, for commands that fetch over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `api.base_url` is empty.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        if self.api.is_configured() {
            Ok(&self.api)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lens").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::{AxisSpec, IndexConvention, MonthConvention};

    #[test]
    fn default_config_is_valid() {
        let config = LensConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.api.is_configured());
        assert_eq!(config.views.default_page_size, 10);
        assert_eq!(config.weekday.index_convention, IndexConvention::SundayZero);
        assert_eq!(config.weekday.month_convention, MonthConvention::OneBased);
        assert_eq!(config.radar.axes.len(), 5);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = LensConfig::default();
        config.views.page_sizes.insert("sellers".into(), 0);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "views.page_sizes.sellers"
        ));
    }

    #[test]
    fn non_positive_ceiling_is_rejected() {
        let mut config = LensConfig::default();
        config.radar.axes.push(AxisSpec::new("Broken", "broken", 0.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn require_api_reports_section() {
        let err = LensConfig::default().require_api().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotConfigured { ref section } if section == "api"
        ));
    }
}
