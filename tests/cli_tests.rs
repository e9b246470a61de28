// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod support;

use chrono::NaiveDate;
use finboard::commands::{doctor, transactions};
use finboard::config::Settings;
use finboard::error::ValidationError;
use finboard::models::{EntryType, Mode, Scope};
use rust_decimal::Decimal;
use serde_json::json;
use support::ScriptedTransport;

fn tx_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["finboard", "tx"];
    argv.extend_from_slice(args);
    let matches = finboard::cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some((_, sub)) => sub.clone(),
            None => panic!("no tx subcommand"),
        },
        _ => panic!("no tx command"),
    }
}

#[test]
fn add_uses_form_defaults() {
    let sub = tx_matches(&["add", "--amount", " 125.50 "]);
    let draft = transactions::draft_from_matches(&sub).unwrap();
    assert_eq!(draft.r#type, Some(Scope::Personal));
    assert_eq!(draft.entry_type, Some(EntryType::Expense));
    assert_eq!(draft.category, "Uncategorized");
    assert_eq!(draft.mode, Some(Mode::Cash));
    assert_eq!(draft.amount, Some(Decimal::new(12550, 2)));
    assert!(draft.validate().is_ok());
}

#[test]
fn add_with_garbage_amount_fails_validation() {
    let sub = tx_matches(&["add", "--amount", "lots", "--type", "business", "--mode", "UPI"]);
    let draft = transactions::draft_from_matches(&sub).unwrap();
    assert_eq!(draft.r#type, Some(Scope::Business));
    assert_eq!(draft.mode, Some(Mode::Other("UPI".into())));
    assert_eq!(draft.amount, None);
    assert!(draft.validate().is_err());
}

#[test]
fn list_filters_parse_dates() {
    let sub = tx_matches(&["list", "--type", "Personal", "--from", "2024-01-01", "--to", "2024-03-31"]);
    let f = transactions::filter_from_matches(&sub).unwrap();
    assert_eq!(f.scope, Some(Scope::Personal));
    assert_eq!(f.from, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(f.to, NaiveDate::from_ymd_opt(2024, 3, 31));
    assert_eq!(f.date, None);

    let bad = tx_matches(&["list", "--date", "31/01/2024"]);
    assert!(transactions::filter_from_matches(&bad).is_err());
}

#[test]
fn doctor_reports_missing_config_and_bad_endpoint() {
    let rows = doctor::diagnose(&Settings::default(), None);
    let issues: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(issues, vec!["missing_api_url", "missing_api_key"]);

    let settings = Settings {
        api_url: Some(support::URL.into()),
        api_key: Some(support::KEY.into()),
        ..Settings::default()
    };
    let (gw, _calls) = ScriptedTransport::new()
        .reply_text("getSummary", "<html>login required</html>")
        .into_gateway();
    let rows = doctor::diagnose(&settings, Some(&gw));
    assert_eq!(rows, vec![vec!["invalid_json".to_string(), "<html>login required</html>".to_string()]]);

    let (gw, _calls) = ScriptedTransport::new()
        .reply("getSummary", json!({"success": true, "data": {}}))
        .into_gateway();
    assert!(doctor::diagnose(&settings, Some(&gw)).is_empty());

    let (gw, _calls) = ScriptedTransport::new().into_gateway();
    let rows = doctor::diagnose(&settings, Some(&gw));
    assert_eq!(rows[0][0], "unreachable");
}

#[test]
fn negative_amount_reaches_validation() {
    let sub = tx_matches(&["add", "--amount", "-5"]);
    let draft = transactions::draft_from_matches(&sub).unwrap();
    assert_eq!(draft.amount, Some(Decimal::new(-5, 0)));
    assert_eq!(draft.validate(), Err(ValidationError::NonPositiveAmount));

    let sub = tx_matches(&["add", "--amount", "-0.25", "--category", "Fuel"]);
    let draft = transactions::draft_from_matches(&sub).unwrap();
    assert_eq!(draft.amount, Some(Decimal::new(-25, 2)));
    assert_eq!(draft.validate(), Err(ValidationError::NonPositiveAmount));
}
