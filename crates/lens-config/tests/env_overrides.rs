use figment::Jail;
use lens_config::LensConfig;

#[test]
fn api_settings_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("LENS_API__BASE_URL", "https://api.example.com");
        jail.set_env("LENS_API__TOKEN", "tok_from_env");
        jail.set_env("LENS_API__TIMEOUT_SECS", "3");

        let config = LensConfig::load().expect("config loads");
        assert!(config.api.is_configured());
        assert_eq!(config.api.token, "tok_from_env");
        assert_eq!(config.api.timeout_secs, 3);
        assert!(config.require_api().is_ok());
        Ok(())
    });
}

#[test]
fn per_view_page_size_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("LENS_VIEWS__PAGE_SIZES__BLOGGERS", "25");

        let config = LensConfig::load().expect("config loads");
        assert_eq!(config.views.page_size_for("bloggers"), 25);
        assert_eq!(config.views.page_size_for("queries"), 10);
        Ok(())
    });
}

#[test]
fn without_env_api_is_unconfigured() {
    Jail::expect_with(|_jail| {
        let config = LensConfig::load().expect("config loads");
        assert!(config.require_api().is_err());
        Ok(())
    });
}
