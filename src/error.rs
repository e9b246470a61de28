// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Network-level failure while talking to the remote tracker.
///
/// Malformed bodies and remote `success:false` replies are not errors; they
/// come back as [`crate::gateway::ApiResponse::Failure`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("remote endpoint unreachable: {0}")]
    Unreachable(String),
}

/// A transaction draft that cannot be submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,
}
