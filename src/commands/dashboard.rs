// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use super::scope_arg;
use crate::chart::ChartRenderer;
use crate::config::{Settings, load_theme};
use crate::dashboard::{Dashboard, RefreshReport};
use crate::gateway::Gateway;
use crate::models::Scope;
use crate::surface::{RecordingSurface, Snapshot, Surface, TerminalSurface};
use crate::utils::maybe_print_json;

#[derive(Serialize)]
struct DashboardOutput {
    report: RefreshReport,
    #[serde(flatten)]
    page: Snapshot,
}

pub fn handle(gateway: &Gateway, conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let scope = scope_arg(m, "scope")?;
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let charts = ChartRenderer::terminal(settings.currency_symbol.as_str());

    if json_flag || jsonl_flag {
        let surface = RecordingSurface::new();
        let report = run(gateway, &charts, &surface, settings, scope);
        let out = DashboardOutput {
            report,
            page: surface.snapshot(),
        };
        maybe_print_json(json_flag, jsonl_flag, &out)?;
    } else {
        let surface = TerminalSurface::new(load_theme(conn)?);
        run(gateway, &charts, &surface, settings, scope);
    }
    Ok(())
}

pub fn run(
    gateway: &Gateway,
    charts: &ChartRenderer,
    surface: &dyn Surface,
    settings: &Settings,
    scope: Option<Scope>,
) -> RefreshReport {
    let dash = Dashboard::new(gateway, charts, surface, &settings.currency_symbol);
    match scope {
        Some(s) => dash.refresh_scope(s),
        None => dash.refresh_global(),
    }
}
