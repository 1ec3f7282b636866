//! Tests for CLI vs TOML precedence rules.

use std::time::Duration;

use super::*;

const FULL_TOML: &str = r#"
    [refresh]
    interval = 120

    [lookup]
    url = "https://toml.example.com/ip"
    timeout = 8
"#;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_interval_overrides_toml() {
        let cli = cli(&["--refresh-interval", "45"]);
        let toml = toml(FULL_TOML);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.refresh_interval, Duration::from_secs(45));
    }

    #[test]
    fn cli_timeout_overrides_toml() {
        let cli = cli(&["--lookup-timeout", "1"]);
        let toml = toml(FULL_TOML);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.lookup_timeout, Duration::from_secs(1));
    }

    #[test]
    fn cli_url_overrides_toml() {
        let cli = cli(&["--lookup-url", "https://cli.example.com/ip"]);
        let toml = toml(FULL_TOML);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.lookup_url.as_str(), "https://cli.example.com/ip");
    }
}

mod toml_over_defaults {
    use super::*;

    #[test]
    fn toml_values_used_when_cli_silent() {
        let cli = cli(&[]);
        let toml = toml(FULL_TOML);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.refresh_interval, Duration::from_secs(120));
        assert_eq!(config.lookup_timeout, Duration::from_secs(8));
        assert_eq!(config.lookup_url.as_str(), "https://toml.example.com/ip");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cli = cli(&[]);
        let toml = toml(
            r"
            [lookup]
            timeout = 2
        ",
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.lookup_timeout, Duration::from_secs(2));
        assert_eq!(config.lookup_url.as_str(), "http://ifconfig.me/ip");
    }
}
