use std::fs;

use pretty_assertions::assert_eq;

use xkpass::config;
use xkpass::{Settings, WarningLevel};

#[test]
fn custom_presets_survive_a_save() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    let mut config = config::preset("XKCD", None)?;
    config.num_words = 7;
    settings.add_preset("long", config.clone())?;
    settings.set_default_preset("long")?;
    settings.entropy.warnings = WarningLevel::Blind;
    settings.save_to(&path)?;

    let loaded = Settings::load_from(&path)?;
    assert_eq!(loaded.default_config()?, config);
    assert_eq!(loaded.entropy.warnings, WarningLevel::Blind);
    assert_eq!(loaded, settings);
    Ok(())
}

#[test]
fn hand_edited_file_keeps_valid_parts() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "default_preset": "wifi",
            "custom_presets": { "half": { "num_words": 3 } },
            "entropy": { "warnings": "NONE", "min_blind": 64 }
        }"#,
    )?;

    let settings = Settings::load_from(&path)?;
    assert!(settings.custom_presets.is_empty());
    assert_eq!(settings.default_preset, "WIFI");
    assert_eq!(settings.entropy.warnings, WarningLevel::None);
    assert_eq!(settings.entropy.min_blind, 64);
    assert_eq!(settings.entropy.min_seen, 52);
    Ok(())
}
