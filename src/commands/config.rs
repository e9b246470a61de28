// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::config::{Settings, set_value};
use crate::db::db_path;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            set_value(conn, key, value)?;
            println!("Set {}", key);
        }
        _ => show(conn)?,
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let s = Settings::load(conn)?;
    let key_state = if s.api_key.is_some() { "(set)" } else { "(not set)" };
    let rows = vec![
        vec!["api_url".to_string(), s.api_url.clone().unwrap_or_else(|| "(not set)".into())],
        vec!["api_key".to_string(), key_state.to_string()],
        vec!["currency_symbol".to_string(), s.currency_symbol.clone()],
        vec!["added_by".to_string(), s.added_by.clone()],
        vec!["settings_db".to_string(), db_path()?.display().to_string()],
    ];
    println!("{}", pretty_table(&["Key", "Value"], rows));
    Ok(())
}
