#![doc(test(attr(deny(warnings))))]

//! Expense Report turns users, categories and payments into per-user
//! spending summaries: chart geometry for on-screen display and exported
//! documents with one section per user.

pub mod charts;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod reports;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use charts::{ChartGeometry, ChartStyle, LayoutOptions};
pub use crate::core::services::{
    AggregationService, CategoryTotal, ChartPage, ChartService, ReportService, UserTotals,
};
pub use errors::{ExportError, ReportError, Result, SinkError};
pub use reports::{ExportFormat, ReportSink};
pub use storage::{Dataset, ExpenseRepository, JsonRepository};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Report tracing initialized.");
    });
}
