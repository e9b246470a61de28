// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use finboard::config::Settings;
use finboard::{cli, commands, db};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FINBOARD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = Settings::load(&conn)?;

    match matches.subcommand() {
        Some(("dashboard", sub)) => {
            let gw = commands::connect(&settings)?;
            commands::dashboard::handle(&gw, &conn, &settings, sub)?
        }
        Some(("summary", sub)) => {
            commands::summary::handle(&commands::connect(&settings)?, &settings, sub)?
        }
        Some(("tx", sub)) => {
            let gw = commands::connect(&settings)?;
            commands::transactions::handle(&gw, &conn, &settings, sub)?
        }
        Some(("categories", _)) => commands::categories::handle(&commands::connect(&settings)?)?,
        Some(("theme", sub)) => commands::theme::handle(&conn, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("doctor", _)) => {
            let gw = commands::connect(&settings).ok();
            commands::doctor::handle(&settings, gw.as_ref())?
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
