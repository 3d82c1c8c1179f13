use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = ShieldConfig::default();

    assert_eq!(config.max_file_size_bytes, 5 * 1024 * 1024);
    assert_eq!(bytes_to_mb(config.max_file_size_bytes), 5.0);
    assert_eq!(
        config.disallow_path_globs,
        vec!["node_modules/**", "dist/**", "build/**"]
    );
    assert!(config.disallow_filename_globs.contains(&".env".to_string()));
    assert!(config
        .disallow_content_patterns
        .iter()
        .any(|p| p.contains("PRIVATE KEY")));
    assert!(config
        .disallow_content_patterns
        .iter()
        .any(|p| p.contains("service_account")));
    assert_eq!(config.ignore_globs, vec![".git/**"]);
}

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ShieldConfig::load(temp_dir.path());
    assert_eq!(config, ShieldConfig::default());
}

#[test]
fn test_overrides_replace_whole_arrays() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"{ "disallowGlobs": ["secrets/**"], "maxFileSizeMB": 1 }"#,
    )
    .unwrap();

    let config = ShieldConfig::load(temp_dir.path());
    assert_eq!(config.disallow_path_globs, vec!["secrets/**"]);
    assert_eq!(config.max_file_size_bytes, 1024 * 1024);

    // Untouched keys keep their defaults
    let defaults = ShieldConfig::default();
    assert_eq!(config.disallow_filename_globs, defaults.disallow_filename_globs);
    assert_eq!(config.disallow_content_patterns, defaults.disallow_content_patterns);
    assert_eq!(config.ignore_globs, defaults.ignore_globs);
}

#[test]
fn test_empty_array_override_clears_rules() {
    let overrides = ConfigOverrides::from_json_str(r#"{ "disallowContentPatterns": [] }"#).unwrap();
    let config = ShieldConfig::default().with_overrides(overrides);
    assert!(config.disallow_content_patterns.is_empty());
}

#[test]
fn test_long_form_aliases() {
    let overrides = ConfigOverrides::from_json_str(
        r#"{
            "disallowPathGlobs": ["vendor/**"],
            "disallowFilenameGlobs": ["*.pem"],
            "maxFileSizeBytes": 2048
        }"#,
    )
    .unwrap();
    let config = ShieldConfig::default().with_overrides(overrides);

    assert_eq!(config.disallow_path_globs, vec!["vendor/**"]);
    assert_eq!(config.disallow_filename_globs, vec!["*.pem"]);
    assert_eq!(config.max_file_size_bytes, 2048);
}

#[test]
fn test_bytes_limit_wins_over_megabytes() {
    let overrides =
        ConfigOverrides::from_json_str(r#"{ "maxFileSizeMB": 10, "maxFileSizeBytes": 100 }"#)
            .unwrap();
    let config = ShieldConfig::default().with_overrides(overrides);
    assert_eq!(config.max_file_size_bytes, 100);
}

#[test]
fn test_fractional_megabytes() {
    let overrides = ConfigOverrides::from_json_str(r#"{ "maxFileSizeMB": 0.5 }"#).unwrap();
    let config = ShieldConfig::default().with_overrides(overrides);
    assert_eq!(config.max_file_size_bytes, 524_288);
}

#[test]
fn test_malformed_json_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

    let config = ShieldConfig::load(temp_dir.path());
    assert_eq!(config, ShieldConfig::default());
}

#[test]
fn test_wrong_value_type_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"{ "disallowGlobs": "dist/**" }"#,
    )
    .unwrap();

    let config = ShieldConfig::load(temp_dir.path());
    assert_eq!(config, ShieldConfig::default());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let overrides =
        ConfigOverrides::from_json_str(r#"{ "ignoreGlobs": ["docs/**"], "theme": "dark" }"#)
            .unwrap();
    assert_eq!(overrides.ignore_globs, Some(vec!["docs/**".to_string()]));
}

#[test]
fn test_starter_document_round_trips_defaults() {
    let defaults = ShieldConfig::default();
    let json = ConfigOverrides::from(&defaults).to_json_pretty().unwrap();

    assert!(json.contains("\"maxFileSizeMB\""));
    assert!(json.contains("\"disallowGlobs\""));
    assert!(!json.contains("maxFileSizeBytes"));

    let parsed = ConfigOverrides::from_json_str(&json).unwrap();
    assert_eq!(ShieldConfig::default().with_overrides(parsed), defaults);
}
