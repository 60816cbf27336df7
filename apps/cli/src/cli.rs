//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::product::ListParams;
use crate::commands::report::{ExportFormat, ReportParams};
use stockroom_core::views::SortKey;
use stockroom_core::{NewProduct, ProductPatch};

#[derive(Debug, Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom inventory manager")]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "STOCKROOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a session
    Login {
        username: String,

        #[arg(short, long, env = "STOCKROOM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Inventory totals, recent activity and low stock alerts
    Dashboard,
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Stock reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductAction {
    /// List products, optionally filtered and sorted
    List {
        /// Case-insensitive match on name or category
        #[arg(short, long, default_value = "")]
        search: String,

        /// name, category, price or stock
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show one product
    Show { id: String },
    /// Add a product
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        category: String,

        /// Major units, e.g. 19.99
        #[arg(short, long)]
        price: String,

        #[arg(short, long)]
        stock: String,

        #[arg(short, long)]
        min_stock: String,
    },
    /// Change some fields of a product
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        price: Option<String>,

        #[arg(short, long)]
        stock: Option<String>,

        #[arg(short, long)]
        min_stock: Option<String>,
    },
    /// Delete products by id, or everything matching a search
    Delete {
        #[arg(required_unless_present = "matching")]
        ids: Vec<String>,

        #[arg(long, conflicts_with = "ids")]
        matching: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Category name or "all"
    #[arg(long, default_value = "all")]
    pub category: String,

    /// 7, 30, 90 or 365
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// stock or low-stock
    #[arg(long = "type", default_value = "stock")]
    pub report_type: String,
}

impl From<ReportArgs> for ReportParams {
    fn from(args: ReportArgs) -> Self {
        ReportParams {
            category: args.category,
            days: args.days,
            report_type: args.report_type,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ReportAction {
    /// Print the report
    Preview(ReportArgs),
    /// Write the report to a file
    Export {
        #[command(flatten)]
        args: ReportArgs,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },
}

impl ProductAction {
    pub(crate) fn list_params(search: String, sort: SortKey, desc: bool) -> ListParams {
        ListParams {
            search,
            sort,
            descending: desc,
        }
    }

    pub(crate) fn new_product(
        name: String,
        category: String,
        price: String,
        stock: String,
        min_stock: String,
    ) -> NewProduct {
        NewProduct::new(name, category, price, stock, min_stock)
    }

    pub(crate) fn patch(
        name: Option<String>,
        category: Option<String>,
        price: Option<String>,
        stock: Option<String>,
        min_stock: Option<String>,
    ) -> ProductPatch {
        let mut patch = ProductPatch::new();
        if let Some(name) = name {
            patch = patch.name(name);
        }
        if let Some(category) = category {
            patch = patch.category(category);
        }
        if let Some(price) = price {
            patch = patch.price(price);
        }
        if let Some(stock) = stock {
            patch = patch.stock(stock);
        }
        if let Some(min_stock) = min_stock {
            patch = patch.min_stock(min_stock);
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_list() {
        let cli = Cli::try_parse_from(["stockroom", "product", "list", "--sort", "stock", "--desc"]).unwrap();
        match cli.command {
            Commands::Product {
                action: ProductAction::List { search, sort, desc },
            } => {
                assert_eq!(search, "");
                assert_eq!(sort, SortKey::Stock);
                assert!(desc);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_sort_key() {
        assert!(Cli::try_parse_from(["stockroom", "product", "list", "--sort", "color"]).is_err());
    }

    #[test]
    fn test_parse_delete_needs_ids_or_matching() {
        assert!(Cli::try_parse_from(["stockroom", "product", "delete"]).is_err());
        assert!(Cli::try_parse_from(["stockroom", "product", "delete", "a", "--matching", "pen"]).is_err());
        assert!(Cli::try_parse_from(["stockroom", "product", "delete", "--matching", "pen"]).is_ok());
        assert!(Cli::try_parse_from(["stockroom", "product", "delete", "a", "b"]).is_ok());
    }

    #[test]
    fn test_parse_report_export_defaults() {
        let cli = Cli::try_parse_from(["stockroom", "--json", "report", "export", "-o", "out.txt"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Report {
                action: ReportAction::Export { args, output, format },
            } => {
                assert_eq!(args.category, "all");
                assert_eq!(args.days, 7);
                assert_eq!(args.report_type, "stock");
                assert_eq!(output, PathBuf::from("out.txt"));
                assert_eq!(format, ExportFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_patch_only_sets_given_fields() {
        let patch = ProductAction::patch(None, None, Some("0".to_string()), None, None);
        assert!(!patch.is_empty());
        assert!(ProductAction::patch(None, None, None, None, None).is_empty());
    }
}
