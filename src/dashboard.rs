// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Page controllers: fetch, aggregate, draw.
//!
//! The summary section and the transactions section are independent; a
//! failure in one is logged and leaves the other to update normally.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info};

use crate::aggregate::{format_currency, sort_by_date_desc};
use crate::chart::ChartRenderer;
use crate::error::ValidationError;
use crate::gateway::{ApiResponse, Gateway};
use crate::models::{Scope, Summary, Transaction, TransactionDraft, TransactionFilter};
use crate::surface::{ControlGuard, Surface};

pub const SUBMIT_CONTROL: &str = "submitTransaction";
pub const SUBMIT_IDLE: &str = "Add Transaction";
pub const SUBMIT_BUSY: &str = "Saving...";

pub const MSG_REQUIRED: &str = "Please fill required fields.";
pub const MSG_SAVED: &str = "Transaction saved.";
pub const MSG_NETWORK: &str = "Network or server error.";
pub const MSG_SUMMARY_FAILED: &str = "Failed to load summary.";

pub const TABLE_HEADERS: [&str; 5] = ["Date", "Category", "Type", "Mode", "Amount"];

/// Element ids a dashboard variant writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub cash: &'static str,
    pub bank: &'static str,
    pub credit: &'static str,
    pub total_expense: &'static str,
    pub total_income: &'static str,
    pub chart: &'static str,
    pub table: Option<&'static str>,
}

impl DashboardLayout {
    pub const GLOBAL: DashboardLayout = DashboardLayout {
        cash: "cashBalance",
        bank: "bankBalance",
        credit: "creditBalance",
        total_expense: "totalExpense",
        total_income: "totalIncome",
        chart: "expenseChart",
        table: None,
    };

    pub const PERSONAL: DashboardLayout = DashboardLayout {
        cash: "personalCash",
        bank: "personalBank",
        credit: "personalCredit",
        total_expense: "personalTotalExpense",
        total_income: "personalTotalIncome",
        chart: "personalChart",
        table: Some("personalTable"),
    };

    pub const BUSINESS: DashboardLayout = DashboardLayout {
        cash: "businessCash",
        bank: "businessBank",
        credit: "businessCredit",
        total_expense: "businessTotalExpense",
        total_income: "businessTotalIncome",
        chart: "businessChart",
        table: Some("businessTable"),
    };

    pub fn for_scope(scope: Option<Scope>) -> &'static DashboardLayout {
        match scope {
            None => &Self::GLOBAL,
            Some(Scope::Personal) => &Self::PERSONAL,
            Some(Scope::Business) => &Self::BUSINESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SectionOutcome {
    Updated,
    Remote(String),
    Network(String),
    Render(String),
}

impl SectionOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, SectionOutcome::Updated)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    pub summary: SectionOutcome,
    pub transactions: SectionOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Saved(RefreshReport),
    Remote(String),
    Network(String),
}

pub struct Dashboard<'a> {
    gateway: &'a Gateway,
    charts: &'a ChartRenderer,
    surface: &'a dyn Surface,
    currency_symbol: &'a str,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        gateway: &'a Gateway,
        charts: &'a ChartRenderer,
        surface: &'a dyn Surface,
        currency_symbol: &'a str,
    ) -> Self {
        Self {
            gateway,
            charts,
            surface,
            currency_symbol,
        }
    }

    fn money(&self, v: rust_decimal::Decimal) -> String {
        format_currency(self.currency_symbol, v)
    }

    /// Main page: everything, no table.
    pub fn refresh_global(&self) -> RefreshReport {
        self.refresh(None)
    }

    /// Personal or Business page.
    pub fn refresh_scope(&self, scope: Scope) -> RefreshReport {
        self.refresh(Some(scope))
    }

    fn refresh(&self, scope: Option<Scope>) -> RefreshReport {
        let layout = DashboardLayout::for_scope(scope);
        let summary = self.load_summary(scope, layout);
        let transactions = self.load_transactions(scope, layout);
        RefreshReport {
            summary,
            transactions,
        }
    }

    fn load_summary(&self, scope: Option<Scope>, layout: &DashboardLayout) -> SectionOutcome {
        match self.gateway.fetch_summary(scope) {
            Ok(ApiResponse::Success(s)) => {
                self.write_summary(layout, &s);
                SectionOutcome::Updated
            }
            Ok(ApiResponse::Failure { message, raw }) => {
                error!(?scope, %message, raw = raw.as_deref().unwrap_or(""), "failed to load summary");
                if scope.is_some() {
                    self.surface.notify(MSG_SUMMARY_FAILED);
                }
                SectionOutcome::Remote(message)
            }
            Err(err) => {
                error!(?scope, error = %err, "summary request failed");
                self.surface.notify(MSG_NETWORK);
                SectionOutcome::Network(err.to_string())
            }
        }
    }

    fn write_summary(&self, layout: &DashboardLayout, s: &Summary) {
        let surface = self.surface;
        surface.set_text(layout.cash, &format!("Cash: {}", self.money(s.cash_balance)));
        surface.set_text(layout.bank, &format!("Bank: {}", self.money(s.bank_balance)));
        surface.set_text(layout.credit, &format!("Credit: {}", self.money(s.credit_balance())));
        surface.set_text(
            layout.total_expense,
            &format!("Total Expense: {}", self.money(s.total_expense)),
        );
        surface.set_text(
            layout.total_income,
            &format!("Total Income: {}", self.money(s.total_income)),
        );
    }

    fn load_transactions(&self, scope: Option<Scope>, layout: &DashboardLayout) -> SectionOutcome {
        let mut txs = match self.gateway.fetch_transactions(&TransactionFilter::scoped(scope)) {
            Ok(ApiResponse::Success(txs)) => txs,
            Ok(ApiResponse::Failure { message, raw }) => {
                error!(?scope, %message, raw = raw.as_deref().unwrap_or(""), "failed to load transactions");
                return SectionOutcome::Remote(message);
            }
            Err(err) => {
                error!(?scope, error = %err, "transactions request failed");
                self.surface.notify(MSG_NETWORK);
                return SectionOutcome::Network(err.to_string());
            }
        };

        let expenses: Vec<Transaction> = txs.iter().filter(|t| t.is_expense()).cloned().collect();
        let outcome = match self.charts.render_expense_chart(&expenses, layout.chart) {
            Ok(frame) => {
                self.surface.paint_canvas(layout.chart, frame);
                SectionOutcome::Updated
            }
            Err(err) => {
                error!(canvas = layout.chart, error = %err, "chart render failed");
                SectionOutcome::Render(err.to_string())
            }
        };

        if let Some(table) = layout.table {
            sort_by_date_desc(&mut txs);
            let rows = txs.iter().map(|t| self.table_row(t)).collect();
            self.surface.fill_table(table, &TABLE_HEADERS, rows);
        }
        outcome
    }

    fn table_row(&self, t: &Transaction) -> Vec<String> {
        vec![
            t.date.clone(),
            t.category.clone().unwrap_or_default(),
            t.entry_type.to_string(),
            t.mode.to_string(),
            self.money(t.amount),
        ]
    }

    /// Validate, post, and on success redraw the main page. The submit
    /// control is disabled while the request is in flight.
    pub fn submit(&self, draft: TransactionDraft, today: NaiveDate, added_by: &str) -> SubmitOutcome {
        let tx = match draft.complete(today, added_by) {
            Ok(tx) => tx,
            Err(err) => {
                info!(error = %err, "transaction draft rejected");
                self.surface.notify(MSG_REQUIRED);
                return SubmitOutcome::Rejected(err);
            }
        };

        let _guard = ControlGuard::engage(self.surface, SUBMIT_CONTROL, SUBMIT_BUSY, SUBMIT_IDLE);
        match self.gateway.append_transaction(&tx) {
            Ok(ApiResponse::Success(_)) => {
                self.surface.notify(MSG_SAVED);
                SubmitOutcome::Saved(self.refresh_global())
            }
            Ok(ApiResponse::Failure { message, raw }) => {
                error!(%message, raw = raw.as_deref().unwrap_or(""), "transaction not saved");
                self.surface.notify(&format!("Error: {}", message));
                SubmitOutcome::Remote(message)
            }
            Err(err) => {
                error!(error = %err, "transaction submit failed");
                self.surface.notify(MSG_NETWORK);
                SubmitOutcome::Network(err.to_string())
            }
        }
    }
}
