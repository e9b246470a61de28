// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pie charts keyed by canvas id.
//!
//! The renderer owns the registry of live charts. A canvas holds at most one
//! chart: re-rendering destroys the previous instance before the new one is
//! built, under the registry lock.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{CategoryTotals, aggregate_by_category, format_currency};
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPosition {
    Bottom,
}

/// Everything a backend needs to draw one pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub slices: Vec<Slice>,
    pub legend: LegendPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: Decimal,
    /// Tooltip text, e.g. `Food: ₹1,200`.
    pub tooltip: String,
}

impl PieSpec {
    pub fn from_totals(totals: &CategoryTotals, currency_symbol: &str) -> Self {
        let slices = totals
            .iter()
            .map(|(label, value)| Slice {
                label: label.to_string(),
                value,
                tooltip: format!("{}: {}", label, format_currency(currency_symbol, value)),
            })
            .collect();
        Self {
            slices,
            legend: LegendPosition::Bottom,
        }
    }
}

/// A chart bound to a canvas.
pub trait LiveChart: Send {
    /// Current picture of the chart, one line per row.
    fn frame(&self) -> Vec<String>;
    fn destroy(&mut self) -> Result<()>;
}

pub trait ChartBackend: Send + Sync {
    fn create(&self, canvas_id: &str, spec: &PieSpec) -> Result<Box<dyn LiveChart>>;
}

pub struct ChartRenderer {
    backend: Box<dyn ChartBackend>,
    currency_symbol: String,
    charts: Mutex<HashMap<String, Box<dyn LiveChart>>>,
}

impl ChartRenderer {
    pub fn new(backend: Box<dyn ChartBackend>, currency_symbol: impl Into<String>) -> Self {
        Self {
            backend,
            currency_symbol: currency_symbol.into(),
            charts: Mutex::new(HashMap::new()),
        }
    }

    pub fn terminal(currency_symbol: impl Into<String>) -> Self {
        Self::new(Box::new(TextPieBackend::default()), currency_symbol)
    }

    /// Aggregate `transactions` by category and (re)draw the pie on
    /// `canvas_id`. Returns the new chart's frame.
    pub fn render_expense_chart(&self, transactions: &[Transaction], canvas_id: &str) -> Result<Vec<String>> {
        let totals = aggregate_by_category(transactions);
        let spec = PieSpec::from_totals(&totals, &self.currency_symbol);
        self.render(canvas_id, &spec)
    }

    pub fn render(&self, canvas_id: &str, spec: &PieSpec) -> Result<Vec<String>> {
        let mut charts = self
            .charts
            .lock()
            .map_err(|_| anyhow!("chart registry poisoned"))?;
        if let Some(mut old) = charts.remove(canvas_id) {
            if let Err(err) = old.destroy() {
                debug!(canvas_id, error = %err, "ignoring chart disposal error");
            }
        }
        let chart = self.backend.create(canvas_id, spec)?;
        let frame = chart.frame();
        charts.insert(canvas_id.to_string(), chart);
        debug!(canvas_id, slices = spec.slices.len(), "chart rendered");
        Ok(frame)
    }

    pub fn is_live(&self, canvas_id: &str) -> bool {
        self.charts
            .lock()
            .map(|c| c.contains_key(canvas_id))
            .unwrap_or(false)
    }

    pub fn live_count(&self) -> usize {
        self.charts.lock().map(|c| c.len()).unwrap_or(0)
    }
}

const BAR_WIDTH: usize = 30;

/// Draws a pie as proportional horizontal bars with the legend below.
#[derive(Debug, Default)]
pub struct TextPieBackend;

impl ChartBackend for TextPieBackend {
    fn create(&self, _canvas_id: &str, spec: &PieSpec) -> Result<Box<dyn LiveChart>> {
        Ok(Box::new(TextPie {
            lines: draw_text_pie(spec),
            destroyed: false,
        }))
    }
}

struct TextPie {
    lines: Vec<String>,
    destroyed: bool,
}

impl LiveChart for TextPie {
    fn frame(&self) -> Vec<String> {
        if self.destroyed {
            return Vec::new();
        }
        self.lines.clone()
    }

    fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(anyhow!("chart already destroyed"));
        }
        self.destroyed = true;
        self.lines.clear();
        Ok(())
    }
}

fn draw_text_pie(spec: &PieSpec) -> Vec<String> {
    let total = spec
        .slices
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.value.max(Decimal::ZERO)));
    let label_width = spec.slices.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
    let mut bars = Vec::with_capacity(spec.slices.len());
    for slice in &spec.slices {
        let share = if total.is_zero() {
            0.0
        } else {
            slice
                .value
                .max(Decimal::ZERO)
                .checked_div(total)
                .and_then(|d| d.to_f64())
                .unwrap_or(0.0)
        };
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        bars.push(format!(
            "{:<width$} {}{} {:>5.1}%",
            slice.label,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH.saturating_sub(filled)),
            share * 100.0,
            width = label_width
        ));
    }
    let legend = spec
        .slices
        .iter()
        .map(|s| s.tooltip.as_str())
        .collect::<Vec<_>>()
        .join("  ·  ");
    let mut lines = bars;
    match spec.legend {
        LegendPosition::Bottom => lines.push(legend),
    }
    lines
}
