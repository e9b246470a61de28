// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::{ApiResponse, Gateway};
use crate::utils::pretty_table;
use anyhow::{Result, bail};

pub fn handle(gateway: &Gateway) -> Result<()> {
    match gateway.fetch_categories()? {
        ApiResponse::Success(names) => {
            let data = names.into_iter().map(|n| vec![n]).collect();
            println!("{}", pretty_table(&["Category"], data));
        }
        ApiResponse::Failure { message, .. } => bail!("Failed to load categories: {}", message),
    }
    Ok(())
}
