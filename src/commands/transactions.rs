// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow, bail};
use chrono::Utc;
use rusqlite::Connection;

use super::scope_arg;
use crate::aggregate::{format_currency, sort_by_date_desc};
use crate::chart::ChartRenderer;
use crate::config::{Settings, load_theme};
use crate::dashboard::{Dashboard, SubmitOutcome, TABLE_HEADERS};
use crate::gateway::{ApiResponse, Gateway};
use crate::models::{EntryType, Mode, TransactionDraft, TransactionFilter};
use crate::surface::TerminalSurface;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(gateway: &Gateway, conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(gateway, settings, sub)?,
        Some(("add", sub)) => add(gateway, conn, settings, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let date = |id: &str| sub.get_one::<String>(id).map(|s| parse_date(s)).transpose();
    Ok(TransactionFilter {
        scope: scope_arg(sub, "type")?,
        date: date("date")?,
        from: date("from")?,
        to: date("to")?,
    })
}

fn list(gateway: &Gateway, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from_matches(sub)?;
    let mut txs = match gateway.fetch_transactions(&filter)? {
        ApiResponse::Success(txs) => txs,
        ApiResponse::Failure { message, .. } => bail!("Failed to load transactions: {}", message),
    };
    sort_by_date_desc(&mut txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        let sym = settings.currency_symbol.as_str();
        let rows = txs
            .iter()
            .map(|t| {
                vec![
                    t.date.clone(),
                    t.category.clone().unwrap_or_default(),
                    t.entry_type.to_string(),
                    t.mode.to_string(),
                    format_currency(sym, t.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&TABLE_HEADERS, rows));
    }
    Ok(())
}

/// Form values as typed. An amount that does not parse is treated as
/// missing and rejected by validation.
pub fn draft_from_matches(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let text = |id: &str| sub.get_one::<String>(id).map(|s| s.trim().to_string());
    Ok(TransactionDraft {
        r#type: scope_arg(sub, "type")?,
        entry_type: text("entry-type").map(|s| EntryType::from(s.as_str())),
        category: text("category").unwrap_or_default(),
        mode: text("mode").map(|s| Mode::from(s.as_str())),
        amount: sub
            .get_one::<String>("amount")
            .and_then(|s| parse_decimal(s).ok()),
        description: text("description").unwrap_or_default(),
    })
}

fn add(gateway: &Gateway, conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_matches(sub)?;
    let charts = ChartRenderer::terminal(settings.currency_symbol.as_str());
    let surface = TerminalSurface::new(load_theme(conn)?);
    let dash = Dashboard::new(gateway, &charts, &surface, &settings.currency_symbol);
    match dash.submit(draft, Utc::now().date_naive(), &settings.added_by) {
        SubmitOutcome::Saved(_) => Ok(()),
        SubmitOutcome::Rejected(err) => Err(anyhow!(err)),
        SubmitOutcome::Remote(message) => bail!("Transaction not saved: {}", message),
        SubmitOutcome::Network(err) => bail!("Transaction not saved: {}", err),
    }
}
