//! Configuration loading from disk.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use slatebook::config::Config;
use tempfile::NamedTempFile;

#[test]
fn loads_config_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
        [network]
        regions = "us,eu"

        [resolver]
        alias_file = "team-names.toml"
        fuzzy_threshold = 0.9

        [logging]
        level = "debug"
        "#
    )?;

    let config = Config::load(file.path())?;

    assert_eq!(config.network.regions, "us,eu");
    assert_eq!(config.resolver.alias_file, PathBuf::from("team-names.toml"));
    assert_eq!(config.resolver.fuzzy_threshold, 0.9);
    assert_eq!(config.logging.level, "debug");
    // Unspecified fields keep their defaults.
    assert!(config.network.odds_base_url.contains("the-odds-api.com"));
    Ok(())
}

#[test]
fn load_missing_file_is_an_error() {
    assert!(Config::load("/nonexistent/config.toml").is_err());
}

#[test]
fn load_or_default_falls_back_when_file_missing() -> Result<()> {
    let config = Config::load_or_default("/nonexistent/config.toml")?;
    assert_eq!(config.resolver.fuzzy_threshold, 0.85);
    Ok(())
}

#[test]
fn invalid_threshold_is_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
        [resolver]
        fuzzy_threshold = 0.0
        "#
    )?;

    assert!(Config::load(file.path()).is_err());
    Ok(())
}
