//! Tests for the app module.

use super::*;

mod hints {
    use super::*;

    #[test]
    fn missing_credentials_point_to_init() {
        for f in [field::APP_ID, field::ACCESS_TOKEN] {
            let hint = config_hint(&ConfigError::missing(f, "")).unwrap();
            assert!(hint.contains("hcm-push init"), "{f}: {hint}");
        }
    }

    #[test]
    fn missing_message_explains_targets() {
        let hint = config_hint(&ConfigError::missing(field::MESSAGE, "")).unwrap();

        assert!(hint.contains("--message"));
        assert!(hint.contains("condition"));
    }

    #[test]
    fn unreadable_config_points_to_init() {
        let error = ConfigError::FileRead {
            path: "missing.toml".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert!(config_hint(&error).unwrap().contains("hcm-push init"));
    }

    #[test]
    fn retry_error_names_the_section() {
        let error = ConfigError::InvalidRetry("min_backoff_ms must be greater than 0".into());
        assert!(config_hint(&error).unwrap().contains("[retry]"));
    }

    #[test]
    fn self_explanatory_errors_have_no_hint() {
        assert!(config_hint(&ConfigError::InvalidAppId).is_none());
    }
}
