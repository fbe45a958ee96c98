//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lens_config::{ConfigError, LensConfig};
use lens_core::{IndexConvention, MonthConvention};
use pretty_assertions::assert_eq;

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://api.example.com/v1"
token = "secret"
timeout_secs = 30

[views]
default_page_size = 20

[views.page_sizes]
sellers = 50

[weekday]
index_convention = "monday_one"
month_convention = "zero_based"

[[radar.axes]]
label = "Revenue"
field = "revenue"
ceiling = 1000000.0
"#,
        )?;

        let config: LensConfig = Figment::from(Serialized::defaults(LensConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.api.is_configured());
        assert!(config.api.has_token());
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.views.page_size_for("sellers"), 50);
        assert_eq!(config.views.page_size_for("brands"), 20);
        assert_eq!(config.weekday.index_convention, IndexConvention::MondayOne);
        assert_eq!(config.weekday.month_convention, MonthConvention::ZeroBased);
        assert_eq!(config.radar.axes.len(), 1);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lens")?;
        jail.create_file(
            ".lens/config.toml",
            r#"
[api]
base_url = "http://localhost:8080"
"#,
        )?;

        let config = LensConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 15);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[views]
default_page_size = 20
"#,
        )?;
        jail.set_env("LENS_VIEWS__DEFAULT_PAGE_SIZE", "5");
        jail.set_env("LENS_WEEKDAY__INDEX_CONVENTION", "monday_zero");

        let config: LensConfig = Figment::from(Serialized::defaults(LensConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("LENS_").split("__"))
            .extract()?;

        assert_eq!(config.views.default_page_size, 5);
        assert_eq!(config.weekday.index_convention, IndexConvention::MondayZero);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("LENS_VIEWS__DEFAULT_PAGE_SIZE", "0");

        let err = LensConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn unknown_convention_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("LENS_WEEKDAY__INDEX_CONVENTION", "tuesday_seven");

        let err = LensConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
