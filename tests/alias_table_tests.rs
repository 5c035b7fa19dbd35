//! Alias table loading from disk.

use std::io::Write;

use slatebook::domain::{AliasTable, League};
use tempfile::NamedTempFile;

#[test]
fn loads_table_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [nba."Los Angeles Lakers"]
        aliases = ["LAL", "LA Lakers"]

        [mlb."Boston Red Sox"]
        aliases = ["Red Sox"]
        "#
    )
    .unwrap();

    let table = AliasTable::load(file.path()).unwrap();

    assert_eq!(
        table.canonical_for(League::Nba, "la lakers"),
        Some("Los Angeles Lakers")
    );
    assert_eq!(
        table.canonical_for(League::Mlb, "red sox"),
        Some("Boston Red Sox")
    );
    assert_eq!(table.canonical_for(League::Nba, "red sox"), None);
}

#[test]
fn missing_file_is_an_error() {
    assert!(AliasTable::load("/nonexistent/aliases.toml").is_err());
}

#[test]
fn invalid_toml_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not [valid toml").unwrap();
    assert!(AliasTable::load(file.path()).is_err());
}

#[test]
fn shipped_alias_file_parses() {
    let table = AliasTable::load(concat!(env!("CARGO_MANIFEST_DIR"), "/aliases.toml")).unwrap();
    assert!(!table.is_empty());
    assert_eq!(
        table.canonical_for(League::Mlb, "nyy"),
        Some("New York Yankees")
    );
}
