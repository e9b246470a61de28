// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde::Serialize;

use super::scope_arg;
use crate::aggregate::format_currency;
use crate::config::Settings;
use crate::gateway::{ApiResponse, Gateway};
use crate::models::Summary;
use crate::utils::{maybe_print_json, pretty_table};

#[derive(Serialize)]
struct SummaryOutput {
    #[serde(flatten)]
    summary: Summary,
    #[serde(with = "rust_decimal::serde::float")]
    credit_balance: rust_decimal::Decimal,
}

pub fn handle(gateway: &Gateway, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let scope = scope_arg(m, "type")?;
    let summary = match gateway.fetch_summary(scope)? {
        ApiResponse::Success(s) => s,
        ApiResponse::Failure { message, .. } => bail!("Failed to load summary: {}", message),
    };
    let out = SummaryOutput {
        summary,
        credit_balance: summary.credit_balance(),
    };
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &out)? {
        let sym = settings.currency_symbol.as_str();
        let rows = vec![
            vec!["Cash".to_string(), format_currency(sym, summary.cash_balance)],
            vec!["Bank".to_string(), format_currency(sym, summary.bank_balance)],
            vec!["Credit".to_string(), format_currency(sym, out.credit_balance)],
            vec!["Total Expense".to_string(), format_currency(sym, summary.total_expense)],
            vec!["Total Income".to_string(), format_currency(sym, summary.total_income)],
        ];
        let label = scope.map(|s| s.to_string()).unwrap_or_else(|| "All".to_string());
        println!("{}", pretty_table(&[label.as_str(), "Amount"], rows));
    }
    Ok(())
}
