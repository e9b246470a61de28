// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{get_setting, set_setting};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
pub const DEFAULT_ADDED_BY: &str = "Admin";

/// Keys accepted by `config set`.
pub const KEYS: [&str; 4] = ["api_url", "api_key", "currency_symbol", "added_by"];
const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(anyhow!("Unknown theme '{}', expected dark or light", other)),
        }
    }
}

/// Anything other than a stored "dark" reads as light.
pub fn load_theme(conn: &Connection) -> Result<Theme> {
    Ok(match get_setting(conn, THEME_KEY)?.as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    })
}

pub fn save_theme(conn: &Connection, theme: Theme) -> Result<()> {
    set_setting(conn, THEME_KEY, theme.as_str())
}

/// Client configuration: settings table values, overridden by
/// `FINBOARD_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub api_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub currency_symbol: String,
    pub added_by: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            added_by: DEFAULT_ADDED_BY.to_string(),
        }
    }
}

fn env_key(key: &str) -> String {
    format!("FINBOARD_{}", key.to_ascii_uppercase())
}

fn lookup(conn: &Connection, key: &str) -> Result<Option<String>> {
    if let Ok(v) = env::var(env_key(key)) {
        if !v.trim().is_empty() {
            return Ok(Some(v.trim().to_string()));
        }
    }
    Ok(get_setting(conn, key)?.filter(|v| !v.trim().is_empty()))
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let defaults = Settings::default();
        Ok(Self {
            api_url: lookup(conn, "api_url")?,
            api_key: lookup(conn, "api_key")?,
            currency_symbol: lookup(conn, "currency_symbol")?.unwrap_or(defaults.currency_symbol),
            added_by: lookup(conn, "added_by")?.unwrap_or(defaults.added_by),
        })
    }

    /// Endpoint and key, or an error naming what is missing.
    pub fn endpoint(&self) -> Result<(&str, &str)> {
        let url = self
            .api_url
            .as_deref()
            .ok_or_else(|| anyhow!("API URL not configured; run `finboard config set api_url <url>` or set FINBOARD_API_URL"))?;
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("API key not configured; run `finboard config set api_key <key>` or set FINBOARD_API_KEY"))?;
        Ok((url, key))
    }
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        bail!("Unknown config key '{}', expected one of {}", key, KEYS.join(", "));
    }
    let value = value.trim();
    if key == "api_url" && !(value.starts_with("http://") || value.starts_with("https://")) {
        bail!("Invalid api_url '{}', expected an http(s) URL", value);
    }
    set_setting(conn, key, value)
}
