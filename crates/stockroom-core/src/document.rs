//! # Report Document
//!
//! Lays a [`ReportView`] out as a paginated table.
//!
//! ## Layout
//! ```text
//! Stock Levels Report                      ← title (first page)
//! Category: all | Date Range: Last 30 days ← subtitle (first page)
//!
//! S.No  Name    Category  Stock  ...       ← header (every page)
//! ----  ------  --------  -----
//! 1     Hammer  Tools     12     ...
//!                                   Page 1 of 3
//! \f
//! S.No  Name    Category  Stock  ...
//! ```
//!
//! Column widths are computed over the whole document so every page
//! lines up. The same structure serializes to JSON for machine use.

use serde::Serialize;

use crate::views::{ReportRow, ReportView};

/// Fixed column header of every report table.
pub const REPORT_HEADER: [&str; 7] = [
    "S.No",
    "Name",
    "Category",
    "Stock",
    "Min Stock",
    "Price",
    "Last Updated",
];

/// Page separator in the text rendering.
pub const PAGE_BREAK: char = '\u{000C}';

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    /// 1-based.
    pub number: usize,
    pub rows: Vec<[String; 7]>,
}

/// A report split into pages of at most `rows_per_page` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub header: Vec<String>,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    /// Paginates `view`. An empty report still has one (header-only) page;
    /// a `rows_per_page` of zero is treated as one.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::document::ReportDocument;
    /// use stockroom_core::views::ReportView;
    ///
    /// let view = ReportView {
    ///     title: "Stock Levels Report".into(),
    ///     subtitle: "Category: all | Date Range: Last 30 days".into(),
    ///     summary: Default::default(),
    ///     rows: vec![],
    /// };
    /// let doc = ReportDocument::paginate(&view, 40);
    /// assert_eq!(doc.page_count(), 1);
    /// assert!(doc.render_text().starts_with("Stock Levels Report\n"));
    /// ```
    pub fn paginate(view: &ReportView, rows_per_page: usize) -> Self {
        let rows: Vec<[String; 7]> = view.rows.iter().map(ReportRow::cells).collect();

        let mut pages: Vec<ReportPage> = rows
            .chunks(rows_per_page.max(1))
            .enumerate()
            .map(|(i, chunk)| ReportPage {
                number: i + 1,
                rows: chunk.to_vec(),
            })
            .collect();

        if pages.is_empty() {
            pages.push(ReportPage {
                number: 1,
                rows: Vec::new(),
            });
        }

        ReportDocument {
            title: view.title.clone(),
            subtitle: view.subtitle.clone(),
            header: REPORT_HEADER.iter().map(|h| h.to_string()).collect(),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    /// Plain-text rendering with form feeds between pages.
    pub fn render_text(&self) -> String {
        let widths = self.column_widths();
        let total = self.page_count();
        let mut out = String::new();

        for (i, page) in self.pages.iter().enumerate() {
            if i == 0 {
                out.push_str(&self.title);
                out.push('\n');
                out.push_str(&self.subtitle);
                out.push_str("\n\n");
            } else {
                out.push(PAGE_BREAK);
                out.push('\n');
            }

            out.push_str(&format_line(&self.header, &widths));
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&format_line(&rule, &widths));

            for row in &page.rows {
                out.push_str(&format_line(row, &widths));
            }

            out.push_str(&format!("\nPage {} of {}\n", page.number, total));
        }

        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in self.pages.iter().flat_map(|p| &p.rows) {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

fn format_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ReportSummary;

    fn view(rows: usize) -> ReportView {
        ReportView {
            title: "Low Stock Report".to_string(),
            subtitle: "Category: Tools | Date Range: Last 7 days".to_string(),
            summary: ReportSummary::default(),
            rows: (1..=rows)
                .map(|i| ReportRow {
                    index: i,
                    name: format!("Item {i}"),
                    category: "Tools".to_string(),
                    stock: 1,
                    min_stock: 2,
                    price: "Rs 3.00".to_string(),
                    last_updated: "01/15/2024".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_paginate_splits_rows() {
        let doc = ReportDocument::paginate(&view(5), 2);
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.row_count(), 5);
        assert_eq!(doc.pages[2].number, 3);
        assert_eq!(doc.pages[2].rows.len(), 1);
        assert_eq!(doc.pages[2].rows[0][0], "5");
        assert_eq!(doc.header, REPORT_HEADER);
    }

    #[test]
    fn test_zero_rows_per_page_is_one() {
        let doc = ReportDocument::paginate(&view(3), 0);
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_empty_report_has_header_page() {
        let doc = ReportDocument::paginate(&view(0), 40);
        assert_eq!(doc.page_count(), 1);
        let text = doc.render_text();
        assert!(text.contains("S.No  Name"));
        assert!(text.ends_with("Page 1 of 1\n"));
    }

    #[test]
    fn test_render_text_repeats_header_per_page() {
        let doc = ReportDocument::paginate(&view(3), 2);
        let text = doc.render_text();

        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].starts_with("Low Stock Report\nCategory: Tools | Date Range: Last 7 days\n"));
        assert!(!pages[1].contains("Low Stock Report"));
        for page in &pages {
            assert!(page.contains("Last Updated"));
        }
        assert!(pages[1].contains("Item 3"));
        assert!(pages[1].contains("Page 2 of 2"));
    }

    #[test]
    fn test_json_shape() {
        let doc = ReportDocument::paginate(&view(1), 40);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["title"], "Low Stock Report");
        assert_eq!(json["header"][4], "Min Stock");
        assert_eq!(json["pages"][0]["rows"][0][5], "Rs 3.00");
    }
}
