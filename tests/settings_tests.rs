// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::config::{DEFAULT_ADDED_BY, DEFAULT_CURRENCY_SYMBOL, Settings, Theme, load_theme, save_theme, set_value};
use finboard::db::{self, get_setting, set_setting};
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn theme_defaults_to_light_and_round_trips() {
    let conn = setup();
    assert_eq!(load_theme(&conn).unwrap(), Theme::Light);
    save_theme(&conn, Theme::Dark).unwrap();
    assert_eq!(load_theme(&conn).unwrap(), Theme::Dark);
    assert_eq!(get_setting(&conn, "theme").unwrap().as_deref(), Some("dark"));
    save_theme(&conn, Theme::Dark.toggled()).unwrap();
    assert_eq!(load_theme(&conn).unwrap(), Theme::Light);
}

#[test]
fn unknown_stored_theme_reads_as_light() {
    let conn = setup();
    set_setting(&conn, "theme", "sepia").unwrap();
    assert_eq!(load_theme(&conn).unwrap(), Theme::Light);
}

#[test]
fn settings_load_with_defaults() {
    let conn = setup();
    set_value(&conn, "currency_symbol", "$").unwrap();
    set_value(&conn, "added_by", "  Priya ").unwrap();
    let s = Settings::load(&conn).unwrap();
    assert_eq!(s.currency_symbol, "$");
    assert_eq!(s.added_by, "Priya");

    let fresh = setup();
    let d = Settings::load(&fresh).unwrap();
    assert_eq!(d.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
    assert_eq!(d.added_by, DEFAULT_ADDED_BY);
}

#[test]
fn set_value_rejects_unknown_keys_and_bad_urls() {
    let conn = setup();
    assert!(set_value(&conn, "colour", "red").is_err());
    assert!(set_value(&conn, "api_url", "ftp://nope").is_err());
    set_value(&conn, "api_url", "https://script.example.test/exec").unwrap();
    assert_eq!(
        get_setting(&conn, "api_url").unwrap().as_deref(),
        Some("https://script.example.test/exec")
    );
}

#[test]
fn endpoint_requires_url_and_key() {
    let s = Settings {
        api_url: Some("https://script.example.test/exec".into()),
        ..Settings::default()
    };
    let err = s.endpoint().unwrap_err().to_string();
    assert!(err.contains("API key"));

    let s = Settings {
        api_key: Some("k".into()),
        ..s
    };
    assert_eq!(s.endpoint().unwrap(), ("https://script.example.test/exec", "k"));
}

#[test]
fn settings_file_persists_between_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("finboard.sqlite");
    {
        let conn = db::open_at(&path).unwrap();
        save_theme(&conn, Theme::Dark).unwrap();
    }
    let conn = db::open_at(&path).unwrap();
    assert_eq!(load_theme(&conn).unwrap(), Theme::Dark);
    assert_eq!(get_setting(&conn, "theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(get_setting(&conn, "api_url").unwrap(), None);
}

#[test]
fn theme_parses_case_insensitively_and_toggles() {
    assert_eq!(" Dark ".parse::<Theme>().unwrap(), Theme::Dark);
    assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
    let err = "sepia".parse::<Theme>().unwrap_err().to_string();
    assert!(err.contains("sepia"));
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    assert_eq!(Theme::default().to_string(), "light");
}
