// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Settings;
use crate::gateway::{Gateway, HttpTransport};

pub mod categories;
pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod summary;
pub mod theme;
pub mod transactions;

/// Gateway over HTTP for the configured endpoint.
pub fn connect(settings: &Settings) -> Result<Gateway> {
    let (url, key) = settings.endpoint()?;
    Ok(Gateway::new(Box::new(HttpTransport::new()?), url, key))
}

pub(crate) fn scope_arg(m: &clap::ArgMatches, id: &str) -> Result<Option<crate::models::Scope>> {
    m.get_one::<String>(id)
        .map(|s| s.parse().map_err(anyhow::Error::msg))
        .transpose()
}
