// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::config::{Theme, load_theme, save_theme};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let current = load_theme(conn)?;
    let next = match m.subcommand() {
        Some(("dark", _)) => Theme::Dark,
        Some(("light", _)) => Theme::Light,
        Some(("toggle", _)) => current.toggled(),
        _ => {
            println!("Theme: {}", current);
            return Ok(());
        }
    };
    save_theme(conn, next)?;
    println!("Theme set to {}", next);
    Ok(())
}
