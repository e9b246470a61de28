// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::aggregate::{UNCATEGORIZED, coerce_amount};
use crate::error::ValidationError;

/// Personal vs Business partition of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Personal,
    Business,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Personal => "Personal",
            Scope::Business => "Business",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Scope::Personal),
            "business" => Ok(Scope::Business),
            other => Err(format!("unknown type '{}', expected Personal or Business", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryType {
    Income,
    Expense,
    #[default]
    Unknown,
    Other(String),
}

impl EntryType {
    pub fn as_str(&self) -> &str {
        match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
            EntryType::Unknown => "",
            EntryType::Other(s) => s,
        }
    }
}

impl From<&str> for EntryType {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Income" => EntryType::Income,
            "Expense" => EntryType::Expense,
            "" => EntryType::Unknown,
            other => EntryType::Other(other.to_string()),
        }
    }
}

/// Payment channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    Cash,
    Bank,
    Credit,
    #[default]
    Unknown,
    Other(String),
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Cash => "Cash",
            Mode::Bank => "Bank",
            Mode::Credit => "Credit",
            Mode::Unknown => "",
            Mode::Other(s) => s,
        }
    }
}

impl From<&str> for Mode {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Cash" => Mode::Cash,
            "Bank" => Mode::Bank,
            "Credit" => Mode::Credit,
            "" => Mode::Unknown,
            other => Mode::Other(other.to_string()),
        }
    }
}

macro_rules! text_enum_serde {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = de_text(deserializer)?;
                Ok(<$ty>::from(text.as_str()))
            }
        }
    };
}

text_enum_serde!(EntryType);
text_enum_serde!(Mode);

/// A row of the remote transactions sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    #[serde(deserialize_with = "de_text")]
    pub date: String,
    #[serde(rename = "type", deserialize_with = "de_text")]
    pub r#type: String,
    #[serde(deserialize_with = "de_opt_text")]
    pub category: Option<String>,
    pub entry_type: EntryType,
    pub mode: Mode,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "de_amount"
    )]
    pub amount: Decimal,
    #[serde(deserialize_with = "de_text")]
    pub description: String,
    #[serde(deserialize_with = "de_text")]
    pub status: String,
    #[serde(deserialize_with = "de_text")]
    pub related_party: String,
    #[serde(deserialize_with = "de_text")]
    pub added_by: String,
}

impl Transaction {
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }
}

/// Server-computed balances for a scope (or for everything).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "de_amount"
    )]
    pub cash_balance: Decimal,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "de_amount"
    )]
    pub bank_balance: Decimal,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "de_amount"
    )]
    pub total_income: Decimal,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "de_amount"
    )]
    pub total_expense: Decimal,
}

impl Summary {
    /// Whatever net flow is not sitting in cash or bank is attributed to
    /// credit. Display-only; there is no ledger to check it against.
    /// Saturates instead of overflowing on extreme balances.
    pub fn credit_balance(&self) -> Decimal {
        let net = self.total_income.saturating_sub(self.total_expense);
        net.saturating_sub(self.cash_balance.saturating_add(self.bank_balance))
    }
}

/// Query filters for `getTransactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub scope: Option<Scope>,
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn scoped(scope: Option<Scope>) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }
}

/// What the user typed into the add-transaction form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub r#type: Option<Scope>,
    pub entry_type: Option<EntryType>,
    pub category: String,
    pub mode: Option<Mode>,
    pub amount: Option<Decimal>,
    pub description: String,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.r#type.is_none() {
            return Err(ValidationError::MissingField("type"));
        }
        match &self.entry_type {
            None | Some(EntryType::Unknown) => {
                return Err(ValidationError::MissingField("entryType"));
            }
            _ => {}
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        match &self.mode {
            None | Some(Mode::Unknown) => return Err(ValidationError::MissingField("mode")),
            _ => {}
        }
        match self.amount {
            None => Err(ValidationError::MissingField("amount")),
            Some(a) if a.is_zero() => Err(ValidationError::MissingField("amount")),
            Some(a) if a.is_sign_negative() => Err(ValidationError::NonPositiveAmount),
            Some(_) => Ok(()),
        }
    }

    /// Validate and stamp the fields the form never asks for.
    pub fn complete(self, today: NaiveDate, added_by: &str) -> Result<NewTransaction, ValidationError> {
        self.validate()?;
        Ok(NewTransaction {
            r#type: self.r#type.unwrap_or(Scope::Personal),
            entry_type: self.entry_type.unwrap_or_default(),
            category: self.category.trim().to_string(),
            mode: self.mode.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            description: self.description,
            date: today,
            status: PAID.to_string(),
            related_party: String::new(),
            added_by: added_by.to_string(),
        })
    }
}

pub const PAID: &str = "Paid";

/// Body of an `addTransaction` request, minus `action` and `key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub r#type: Scope,
    pub entry_type: EntryType,
    pub category: String,
    pub mode: Mode,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub status: String,
    pub related_party: String,
    pub added_by: String,
}

fn de_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let v = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&v))
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(de_opt_text(deserializer)?.unwrap_or_default())
}

fn de_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}

/// Categories come back either as bare names or as `{ "name": ... }` rows.
pub(crate) fn category_names(data: Vec<Value>) -> Vec<String> {
    data.into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Object(map) => ["name", "category", "Category"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str).map(str::to_string)),
            _ => None,
        })
        .filter(|s| !s.trim().is_empty())
        .collect()
}
