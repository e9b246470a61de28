// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::gateway::{ApiResponse, Gateway, INVALID_JSON};
use crate::utils::pretty_table;
use anyhow::Result;

const RAW_PREVIEW: usize = 80;

pub fn handle(settings: &Settings, gateway: Option<&Gateway>) -> Result<()> {
    let rows = diagnose(settings, gateway);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// One `[issue, detail]` row per problem found.
pub fn diagnose(settings: &Settings, gateway: Option<&Gateway>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Configuration
    if settings.api_url.is_none() {
        rows.push(vec!["missing_api_url".into(), "set api_url or FINBOARD_API_URL".into()]);
    }
    if settings.api_key.is_none() {
        rows.push(vec!["missing_api_key".into(), "set api_key or FINBOARD_API_KEY".into()]);
    }
    if settings.currency_symbol.trim().is_empty() {
        rows.push(vec!["empty_currency_symbol".into(), String::new()]);
    }

    // 2) Round trip against the endpoint
    let Some(gw) = gateway else {
        return rows;
    };
    match gw.fetch_summary(None) {
        Ok(ApiResponse::Success(_)) => {}
        Ok(ApiResponse::Failure { message, raw }) if message == INVALID_JSON => {
            let preview: String = raw.unwrap_or_default().chars().take(RAW_PREVIEW).collect();
            rows.push(vec!["invalid_json".into(), preview]);
        }
        Ok(ApiResponse::Failure { message, .. }) => {
            rows.push(vec!["remote_failure".into(), message]);
        }
        Err(err) => {
            rows.push(vec!["unreachable".into(), format!("{}: {}", gw.api_url(), err)]);
        }
    }
    rows
}
