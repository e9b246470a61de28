// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where controllers put their output: text fields, tables and chart
//! canvases addressed by id, plus user notifications and controls.

use std::collections::BTreeMap;
use std::sync::Mutex;

use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Cell, Color, Table};
use serde::Serialize;

use crate::config::Theme;

pub trait Surface {
    fn set_text(&self, id: &str, text: &str);
    fn fill_table(&self, id: &str, headers: &[&str], rows: Vec<Vec<String>>);
    fn paint_canvas(&self, id: &str, frame: Vec<String>);
    /// Something the user must see (the browser version used `alert`).
    fn notify(&self, message: &str);
    fn set_control(&self, id: &str, enabled: bool, label: &str);
}

/// Disables a control for its lifetime and restores it on drop, whichever
/// way the surrounding flow exits.
pub struct ControlGuard<'a> {
    surface: &'a dyn Surface,
    id: &'a str,
    idle_label: &'a str,
}

impl<'a> ControlGuard<'a> {
    pub fn engage(surface: &'a dyn Surface, id: &'a str, busy_label: &str, idle_label: &'a str) -> Self {
        surface.set_control(id, false, busy_label);
        Self {
            surface,
            id,
            idle_label,
        }
    }
}

impl Drop for ControlGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_control(self.id, true, self.idle_label);
    }
}

/// Prints straight to stdout.
pub struct TerminalSurface {
    theme: Theme,
}

impl TerminalSurface {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn table(&self, headers: &[&str], rows: Vec<Vec<String>>) -> Table {
        let mut t = Table::new();
        match self.theme {
            Theme::Dark => {
                t.load_preset(UTF8_FULL);
                t.set_header(headers.iter().map(|h| Cell::new(*h).fg(Color::Cyan)));
            }
            Theme::Light => {
                t.load_preset(ASCII_FULL);
                t.set_header(headers.iter().map(|h| Cell::new(*h)));
            }
        }
        for r in rows {
            t.add_row(r.into_iter().map(Cell::new));
        }
        t
    }
}

impl Surface for TerminalSurface {
    fn set_text(&self, _id: &str, text: &str) {
        println!("{}", text);
    }

    fn fill_table(&self, _id: &str, headers: &[&str], rows: Vec<Vec<String>>) {
        println!("{}", self.table(headers, rows));
    }

    fn paint_canvas(&self, _id: &str, frame: Vec<String>) {
        println!();
        for line in frame {
            println!("{}", line);
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn set_control(&self, _id: &str, enabled: bool, label: &str) {
        if !enabled {
            eprintln!("{}", label);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

/// Everything written to a [`RecordingSurface`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub texts: BTreeMap<String, String>,
    pub tables: BTreeMap<String, TableSnapshot>,
    pub canvases: BTreeMap<String, Vec<String>>,
    pub notifications: Vec<String>,
    pub controls: BTreeMap<String, ControlState>,
    /// Every control transition in order, as `(id, enabled)`.
    #[serde(skip)]
    pub control_log: Vec<(String, bool)>,
}

/// Keeps the latest state of every id; backs `--json` output.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    inner: Mutex<Snapshot>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn with(&self, f: impl FnOnce(&mut Snapshot)) {
        if let Ok(mut s) = self.inner.lock() {
            f(&mut s);
        }
    }
}

impl Surface for RecordingSurface {
    fn set_text(&self, id: &str, text: &str) {
        self.with(|s| {
            s.texts.insert(id.to_string(), text.to_string());
        });
    }

    fn fill_table(&self, id: &str, headers: &[&str], rows: Vec<Vec<String>>) {
        self.with(|s| {
            s.tables.insert(
                id.to_string(),
                TableSnapshot {
                    headers: headers.iter().map(|h| h.to_string()).collect(),
                    rows,
                },
            );
        });
    }

    fn paint_canvas(&self, id: &str, frame: Vec<String>) {
        self.with(|s| {
            s.canvases.insert(id.to_string(), frame);
        });
    }

    fn notify(&self, message: &str) {
        self.with(|s| s.notifications.push(message.to_string()));
    }

    fn set_control(&self, id: &str, enabled: bool, label: &str) {
        self.with(|s| {
            s.controls.insert(
                id.to_string(),
                ControlState {
                    enabled,
                    label: label.to_string(),
                },
            );
            s.control_log.push((id.to_string(), enabled));
        });
    }
}
