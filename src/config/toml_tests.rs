//! Tests for TOML configuration parsing.

use super::ConfigError;
use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.refresh.interval.is_none());
        assert!(config.lookup.url.is_none());
        assert!(config.lookup.timeout.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [refresh]
            interval = 120

            [lookup]
            url = "https://api.ipify.org"
            timeout = 3
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.refresh.interval, Some(120));
        assert_eq!(config.lookup.url.as_deref(), Some("https://api.ipify.org"));
        assert_eq!(config.lookup.timeout, Some(3));
    }

    #[test]
    fn parse_partial_section() {
        let toml = r"
            [lookup]
            timeout = 10
        ";

        let config = TomlConfig::parse(toml).unwrap();

        assert!(config.refresh.interval.is_none());
        assert!(config.lookup.url.is_none());
        assert_eq!(config.lookup.timeout, Some(10));
    }
}

mod rejection {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r#"
            [webhook]
            url = "https://example.com"
        "#;

        let result = TomlConfig::parse(toml);
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let toml = r"
            [refresh]
            interval = 60
            jitter = 5
        ";

        let result = TomlConfig::parse(toml);
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r#"
            [refresh]
            interval = "five minutes"
        "#;

        let result = TomlConfig::parse(toml);
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn negative_timeout_is_rejected() {
        let toml = r"
            [lookup]
            timeout = -1
        ";

        let result = TomlConfig::parse(toml);
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let template = default_config_template();
        let config = TomlConfig::parse(&template).unwrap();

        assert_eq!(config.refresh.interval, Some(300));
    }

    #[test]
    fn template_mentions_every_key() {
        let template = default_config_template();

        assert!(template.contains("[refresh]"));
        assert!(template.contains("[lookup]"));
        assert!(template.contains("interval"));
        assert!(template.contains("url"));
        assert!(template.contains("timeout"));
    }
}
