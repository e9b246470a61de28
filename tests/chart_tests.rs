// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Result, bail};
use finboard::aggregate::{NO_DATA_LABEL, aggregate_by_category};
use finboard::chart::{
    ChartBackend, ChartRenderer, LegendPosition, LiveChart, PieSpec, TextPieBackend,
};
use finboard::models::Transaction;
use serde_json::json;

#[derive(Default)]
struct Counters {
    created: AtomicUsize,
    destroyed: AtomicUsize,
    live: AtomicUsize,
    max_live: AtomicUsize,
    specs: Mutex<Vec<PieSpec>>,
}

struct CountingBackend {
    counters: Arc<Counters>,
    fail_destroy: bool,
}

struct CountingChart {
    counters: Arc<Counters>,
    fail_destroy: bool,
}

impl ChartBackend for CountingBackend {
    fn create(&self, _canvas_id: &str, spec: &PieSpec) -> Result<Box<dyn LiveChart>> {
        let c = &self.counters;
        c.created.fetch_add(1, Ordering::SeqCst);
        let live = c.live.fetch_add(1, Ordering::SeqCst) + 1;
        c.max_live.fetch_max(live, Ordering::SeqCst);
        c.specs.lock().unwrap().push(spec.clone());
        Ok(Box::new(CountingChart {
            counters: c.clone(),
            fail_destroy: self.fail_destroy,
        }))
    }
}

impl LiveChart for CountingChart {
    fn frame(&self) -> Vec<String> {
        vec!["pie".into()]
    }

    fn destroy(&mut self) -> Result<()> {
        self.counters.destroyed.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
        if self.fail_destroy {
            bail!("canvas already detached");
        }
        Ok(())
    }
}

fn renderer(fail_destroy: bool) -> (ChartRenderer, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let backend = CountingBackend {
        counters: counters.clone(),
        fail_destroy,
    };
    (ChartRenderer::new(Box::new(backend), "₹"), counters)
}

fn expenses() -> Vec<Transaction> {
    serde_json::from_value(json!([
        {"category": "Food", "entryType": "Expense", "amount": 1200},
        {"category": "Travel", "entryType": "Expense", "amount": 300}
    ]))
    .unwrap()
}

#[test]
fn rerender_disposes_previous_instance_once() {
    let (r, c) = renderer(false);
    r.render_expense_chart(&expenses(), "expenseChart").unwrap();
    assert_eq!(c.destroyed.load(Ordering::SeqCst), 0);

    r.render_expense_chart(&expenses(), "expenseChart").unwrap();
    assert_eq!(c.created.load(Ordering::SeqCst), 2);
    assert_eq!(c.destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(c.live.load(Ordering::SeqCst), 1);
    assert_eq!(r.live_count(), 1);
}

#[test]
fn canvases_are_independent() {
    let (r, c) = renderer(false);
    r.render_expense_chart(&expenses(), "personalChart").unwrap();
    r.render_expense_chart(&expenses(), "businessChart").unwrap();
    assert_eq!(c.destroyed.load(Ordering::SeqCst), 0);
    assert!(r.is_live("personalChart"));
    assert!(r.is_live("businessChart"));
    assert_eq!(r.live_count(), 2);
}

#[test]
fn disposal_errors_are_ignored() {
    let (r, c) = renderer(true);
    r.render_expense_chart(&expenses(), "expenseChart").unwrap();
    assert!(r.render_expense_chart(&expenses(), "expenseChart").is_ok());
    assert_eq!(c.created.load(Ordering::SeqCst), 2);
    assert_eq!(r.live_count(), 1);
}

#[test]
fn spec_is_fixed_pie_with_currency_tooltips() {
    let (r, c) = renderer(false);
    r.render_expense_chart(&expenses(), "expenseChart").unwrap();
    r.render_expense_chart(&[], "expenseChart").unwrap();

    let specs = c.specs.lock().unwrap();
    assert_eq!(specs[0].legend, LegendPosition::Bottom);
    assert_eq!(specs[0].slices[0].tooltip, "Food: ₹1,200");
    assert_eq!(specs[0].slices[1].tooltip, "Travel: ₹300");
    assert_eq!(specs[1].slices.len(), 1);
    assert_eq!(specs[1].slices[0].label, NO_DATA_LABEL);
}

#[test]
fn concurrent_renders_keep_one_live_chart() {
    let (r, c) = renderer(false);
    let r = Arc::new(r);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let r = r.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    r.render_expense_chart(&expenses(), "expenseChart").unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(c.created.load(Ordering::SeqCst), 200);
    assert_eq!(c.destroyed.load(Ordering::SeqCst), 199);
    assert_eq!(c.max_live.load(Ordering::SeqCst), 1);
    assert_eq!(r.live_count(), 1);
}

#[test]
fn terminal_backend_draws_bars_and_legend() {
    let r = ChartRenderer::terminal("₹");
    let frame = r.render_expense_chart(&expenses(), "expenseChart").unwrap();
    assert_eq!(frame.len(), 3);
    assert!(frame[0].contains("80.0%"));
    assert!(frame[1].contains("20.0%"));
    assert_eq!(frame[2], "Food: ₹1,200  ·  Travel: ₹300");
}

#[test]
fn terminal_backend_handles_amounts_near_decimal_limits() {
    let txs: Vec<Transaction> = serde_json::from_value(json!([
        {"category": "Big", "entryType": "Expense", "amount": 7e28},
        {"category": "Big", "entryType": "Expense", "amount": 7e28},
        {"category": "Other", "entryType": "Expense", "amount": 7e28}
    ]))
    .unwrap();
    let r = ChartRenderer::terminal("₹");
    let frame = r.render_expense_chart(&txs, "expenseChart").unwrap();
    assert_eq!(frame.len(), 3);
    assert!(frame[0].starts_with("Big"));
    assert!(frame[0].contains("100.0%"));
    assert!(frame[1].starts_with("Other"));
}

#[test]
fn text_pie_destroy_clears_frame_once() {
    let spec = PieSpec::from_totals(&aggregate_by_category(&expenses()), "₹");
    let mut chart = TextPieBackend::default().create("expenseChart", &spec).unwrap();
    assert_eq!(chart.frame().len(), 3);

    chart.destroy().unwrap();
    assert!(chart.frame().is_empty());
    assert!(chart.destroy().is_err());
}
