//! # Report Commands
//!
//! `report preview` prints a report; `report export` writes it to a file.
//!
//! ## Export Flow
//! ```text
//! --category Tools --days 7 --type low-stock
//!      │
//!      ▼
//! ReportFilter::from_params ── bad days/type ──► INVALID_PARAMETER
//!      │
//!      ▼
//! build_report(products, filter, now, "Rs ")   → ReportView
//!      │
//!      ▼
//! ReportDocument::paginate(view, rows_per_page)
//!      │
//!      ├── text → title, subtitle, tables split by form feeds
//!      └── json → { title, subtitle, header, pages }
//! ```

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::Output;
use crate::error::AppResult;
use crate::state::AppState;
use stockroom_core::document::ReportDocument;
use stockroom_core::views::{build_report, report_categories, ReportFilter, ReportSummary};

/// Filter arguments shared by preview and export.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub category: String,
    pub days: u32,
    pub report_type: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        ReportParams {
            category: "all".to_string(),
            days: 7,
            report_type: "stock".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreviewResponse {
    pub categories: Vec<String>,
    pub summary: ReportSummary,
    pub total_value_display: String,
    pub document: ReportDocument,
}

impl Output for ReportPreviewResponse {
    fn human(&self) -> String {
        format!(
            "{}\nIn range: {}   Low stock: {}   Value: {}\nCategories: {}\n",
            self.document.render_text(),
            self.summary.total,
            self.summary.low_stock,
            self.total_value_display,
            self.categories.join(", "),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub pages: usize,
    pub rows: usize,
}

impl Output for ExportResponse {
    fn human(&self) -> String {
        format!(
            "Exported {} rows on {} page(s) to {}\n",
            self.rows,
            self.pages,
            self.path.display()
        )
    }
}

fn prepare(state: &AppState, params: &ReportParams, now: DateTime<Utc>) -> AppResult<ReportPreviewResponse> {
    let filter = ReportFilter::from_params(&params.category, params.days, &params.report_type)?;
    let config = &state.config;

    let (view, categories) = state.inventory.with_store(|store| {
        (
            build_report(store.products(), &filter, now, &config.report_currency),
            report_categories(store.products()),
        )
    });

    Ok(ReportPreviewResponse {
        categories,
        summary: view.summary,
        total_value_display: view.summary.total_value.with_symbol(&config.currency_symbol),
        document: ReportDocument::paginate(&view, config.rows_per_page),
    })
}

pub fn preview(state: &AppState, params: &ReportParams) -> AppResult<ReportPreviewResponse> {
    preview_at(state, params, Utc::now())
}

/// [`preview`] as of `now`.
pub fn preview_at(
    state: &AppState,
    params: &ReportParams,
    now: DateTime<Utc>,
) -> AppResult<ReportPreviewResponse> {
    state.require_auth()?;
    prepare(state, params, now)
}

pub fn export(
    state: &AppState,
    params: &ReportParams,
    output: &Path,
    format: ExportFormat,
) -> AppResult<ExportResponse> {
    state.require_auth()?;

    let report = prepare(state, params, Utc::now())?;
    let document = &report.document;

    let contents = match format {
        ExportFormat::Text => document.render_text(),
        ExportFormat::Json => serde_json::to_string_pretty(document)?,
    };
    std::fs::write(output, contents)?;

    info!(path = %output.display(), ?format, rows = document.row_count(), "Report exported");

    Ok(ExportResponse {
        path: output.to_path_buf(),
        format,
        pages: document.page_count(),
        rows: document.row_count(),
    })
}
