// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use obscura::Config;
use obscura::config::AppTheme;

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    // Check sensible defaults
    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(
        config.mirror_preview, true,
        "Mirror preview should be enabled by default"
    );
}

#[test]
fn test_config_save_folder() {
    // Saved photos need a folder name that can appear in a path
    let config = Config::default();
    assert!(!config.save_folder_name.is_empty());
    assert!(!config.save_folder_name.contains('/'));
}

#[test]
fn test_config_roundtrips_through_serde() {
    let config = Config {
        app_theme: AppTheme::Dark,
        save_folder_name: String::from("trips"),
        mirror_preview: false,
    };
    let json = serde_json::to_string(&config).expect("serialize");
    let back: Config = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}
