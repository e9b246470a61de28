// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure helpers that turn fetched transactions into chart series and
//! display strings.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::models::Transaction;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NO_DATA_LABEL: &str = "No expenses";

/// Category totals in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    entries: Vec<(String, Decimal)>,
    #[serde(skip)]
    index_by_name: HashMap<String, usize>,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Decimal) {
        match self.index_by_name.get(category) {
            Some(&idx) => {
                let current = self.entries[idx].1;
                self.entries[idx].1 = current.checked_add(amount).unwrap_or_else(|| {
                    warn!(category, "category total overflowed, clamping");
                    current.saturating_add(amount)
                });
            }
            None => {
                self.index_by_name
                    .insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    fn placeholder() -> Self {
        let mut totals = Self::default();
        totals.add(NO_DATA_LABEL, Decimal::ONE);
        totals
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.index_by_name
            .get(category)
            .map(|&idx| self.entries[idx].1)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, amt)| (name.as_str(), *amt))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when this is the single "no data" slice.
    pub fn is_placeholder(&self) -> bool {
        self.entries.len() == 1 && self.entries[0].0 == NO_DATA_LABEL && self.entries[0].1 == Decimal::ONE
    }

    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |acc, (_, amt)| acc.saturating_add(*amt))
    }
}

/// Sum amounts per category. An empty input yields a single
/// placeholder slice worth 1 so a chart still has something to draw.
pub fn aggregate_by_category(transactions: &[Transaction]) -> CategoryTotals {
    if transactions.is_empty() {
        return CategoryTotals::placeholder();
    }
    let mut totals = CategoryTotals::default();
    for tx in transactions {
        totals.add(tx.category_or_default(), tx.amount);
    }
    totals
}

/// Loose numeric coercion for values coming out of the spreadsheet.
/// Anything that is not a number or a numeric string counts as zero;
/// numbers beyond the decimal range clamp to `Decimal::MAX`/`MIN`.
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_loose(&n.to_string()),
        Value::String(s) => parse_loose(s),
        Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

fn parse_loose(raw: &str) -> Decimal {
    let s = raw.trim();
    if s.is_empty() {
        return Decimal::ZERO;
    }
    if let Ok(d) = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        return d;
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Decimal::try_from(f).unwrap_or_else(|_| {
            warn!(value = s, "amount out of range, clamping");
            if f.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }),
        _ => Decimal::ZERO,
    }
}

/// `₹1,00,000` style formatting: Indian digit grouping, whole numbers
/// without decimals, up to three fraction digits otherwise.
pub fn format_currency(symbol: &str, value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = String::with_capacity(symbol.len() + text.len() + 8);
    out.push_str(symbol);
    if negative {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Newest first. Stable, so rows sharing a date keep their fetch order.
pub fn sort_by_date_desc(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
