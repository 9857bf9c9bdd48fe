//! Tests for settings loading and capability negotiation

use std::io::Write;

use serde_json::json;

use super::*;

// ==================== SETTINGS PARSING TESTS ====================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_load_capabilities_from_toml() {
        let toml = r#"
[capabilities]
expose_unexpose = true
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert!(settings.capabilities.expose_unexpose_support);
    }

    /// Empty config uses all defaults
    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let toml = r#"
[workspace]
root = "src/"
"#;

        let settings = Settings::from_toml_str(toml).unwrap();
        assert!(!settings.capabilities.expose_unexpose_support);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = Settings::from_toml_str("[capabilities\nexpose_unexpose = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_wrong_value_type_is_an_error() {
        let result = Settings::from_toml_str("[capabilities]\nexpose_unexpose = \"yes\"\n");
        assert!(result.is_err());
    }
}

// ==================== FILE LOADING TESTS ====================

mod loading_tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from_root(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_workspace_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(SETTINGS_FILE)).unwrap();
        writeln!(file, "[capabilities]\nexpose_unexpose = true").unwrap();

        let settings = Settings::load_from_root(dir.path()).unwrap();
        assert!(settings.capabilities.expose_unexpose_support);
    }

    /// A directory where the file should be is an I/O error, not "missing"
    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(SETTINGS_FILE)).unwrap();

        let result = Settings::load_from_root(dir.path());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

// ==================== CAPABILITY NEGOTIATION TESTS ====================

mod negotiation_tests {
    use super::*;

    #[test]
    fn test_initialization_options_enable_support() {
        let options = json!({ "extendedCapabilities": { "exposeUnexposeSupport": true } });
        let caps = Capabilities::default().with_initialization_options(&options);
        assert!(caps.expose_unexpose_support);
    }

    #[test]
    fn test_initialization_options_disable_file_setting() {
        let from_file = Capabilities {
            expose_unexpose_support: true,
        };
        let options = json!({ "extendedCapabilities": { "exposeUnexposeSupport": false } });
        assert!(!from_file.with_initialization_options(&options).expose_unexpose_support);
    }

    /// Absent or malformed options leave the file setting alone
    #[test]
    fn test_missing_options_keep_current_value() {
        let from_file = Capabilities {
            expose_unexpose_support: true,
        };
        for options in [
            json!(null),
            json!({}),
            json!({ "extendedCapabilities": {} }),
            json!({ "extendedCapabilities": { "exposeUnexposeSupport": "yes" } }),
        ] {
            assert_eq!(from_file.with_initialization_options(&options), from_file);
        }
    }
}
