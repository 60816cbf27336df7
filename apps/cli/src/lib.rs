//! # Stockroom CLI Library
//!
//! Everything behind the `stockroom` binary. `main.rs` only parses
//! arguments and prints what [`run`] returns.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (tracing, paths, dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState: config + stores + database
//! │   ├── config.rs   ◄─── stockroom.toml + STOCKROOM_* overrides
//! │   ├── session.rs  ◄─── Auth store + session persistence
//! │   └── inventory.rs◄─── Product store + product persistence
//! ├── commands/
//! │   ├── auth.rs     ◄─── login / logout / whoami
//! │   ├── dashboard.rs◄─── dashboard
//! │   ├── product.rs  ◄─── product list/show/add/update/delete
//! │   └── report.rs   ◄─── report preview/export
//! └── error.rs        ◄─── AppError { code, message }
//! ```
//!
//! ## Invocation Sequence
//! ```text
//! 1. Load config (file → env overrides → validate)
//! 2. Open SQLite database and run migrations
//! 3. Restore auth and product stores from their namespaces
//! 4. Run the command (inventory commands check the session first)
//! 5. Render result as text or JSON
//! 6. Close the pool
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ProductAction, ReportAction};
use commands::render;
use error::{AppError, AppResult};
use state::{AppState, StockroomConfig};

const CONFIG_FILE: &str = "stockroom.toml";
const DATABASE_FILE: &str = "stockroom.db";

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// clean for `--json`.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom_cli=trace,stockroom_db=debug` - Per-crate levels
/// - Default: warnings, plus INFO for this crate
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockroom_cli=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "stockroom", "stockroom")
}

/// Default config file location.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockroom.stockroom/stockroom.toml`
/// - **Windows**: `%APPDATA%\stockroom\stockroom\config\stockroom.toml`
/// - **Linux**: `~/.config/stockroom/stockroom.toml`
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Default database location, used unless `database_path` or
/// `STOCKROOM_DB_PATH` says otherwise.
pub fn default_database_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(DATABASE_FILE))
}

/// Runs one invocation end to end and returns the rendered output.
pub async fn run(cli: Cli) -> AppResult<String> {
    let config = StockroomConfig::load(cli.config.as_deref())?;
    let state = AppState::open(config).await?;

    let result = execute(&state, cli.command, cli.json).await;
    state.close().await;
    result
}

/// Dispatches a parsed command against open state.
pub async fn execute(state: &AppState, command: Commands, json: bool) -> AppResult<String> {
    match command {
        Commands::Login { username, password } => {
            let password = password.ok_or_else(|| {
                AppError::validation("Password required: pass --password or set STOCKROOM_PASSWORD")
            })?;
            render(&commands::auth::login(state, &username, &password).await?, json)
        }
        Commands::Logout => render(&commands::auth::logout(state).await?, json),
        Commands::Whoami => render(&commands::auth::whoami(state), json),
        Commands::Dashboard => render(&commands::dashboard::dashboard(state)?, json),
        Commands::Product { action } => match action {
            ProductAction::List { search, sort, desc } => {
                let params = ProductAction::list_params(search, sort, desc);
                render(&commands::product::list(state, &params)?, json)
            }
            ProductAction::Show { id } => render(&commands::product::show(state, &id)?, json),
            ProductAction::Add {
                name,
                category,
                price,
                stock,
                min_stock,
            } => {
                let input = ProductAction::new_product(name, category, price, stock, min_stock);
                render(&commands::product::add(state, input).await?, json)
            }
            ProductAction::Update {
                id,
                name,
                category,
                price,
                stock,
                min_stock,
            } => {
                let patch = ProductAction::patch(name, category, price, stock, min_stock);
                render(&commands::product::update(state, &id, patch).await?, json)
            }
            ProductAction::Delete { ids, matching } => {
                let response = match matching {
                    Some(term) => commands::product::delete_matching(state, &term).await?,
                    None => commands::product::delete(state, &ids).await?,
                };
                render(&response, json)
            }
        },
        Commands::Report { action } => match action {
            ReportAction::Preview(args) => {
                render(&commands::report::preview(state, &args.into())?, json)
            }
            ReportAction::Export {
                args,
                output,
                format,
            } => render(
                &commands::report::export(state, &args.into(), &output, format)?,
                json,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use error::ErrorCode;
    use stockroom_db::{Database, DbConfig};

    async fn test_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut config = StockroomConfig::default();
        config.admin.password = Some("secret".to_string());
        AppState::with_database(config, db).await.unwrap()
    }

    async fn exec(state: &AppState, args: &[&str]) -> AppResult<String> {
        let mut argv = vec!["stockroom"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        execute(state, cli.command, cli.json).await
    }

    #[tokio::test]
    async fn test_inventory_commands_require_login() {
        let state = test_state().await;

        for args in [
            vec!["dashboard"],
            vec!["product", "list"],
            vec!["product", "show", "x"],
            vec!["report", "preview"],
        ] {
            let err = exec(&state, &args).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::Unauthenticated, "{args:?}");
        }
    }

    #[tokio::test]
    async fn test_login_without_password_is_rejected() {
        let state = test_state().await;
        let err = execute(
            &state,
            Commands::Login {
                username: "admin".to_string(),
                password: None,
            },
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let state = test_state().await;
        let err = exec(&state, &["login", "admin", "--password", "nope"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert!(!state.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_add_list_and_report() {
        let state = test_state().await;
        exec(&state, &["login", "admin", "--password", "secret"]).await.unwrap();

        exec(
            &state,
            &["product", "add", "-n", "Hammer", "-c", "Tools", "-p", "12.50", "-s", "2", "-m", "5"],
        )
        .await
        .unwrap();
        exec(
            &state,
            &["product", "add", "-n", "Paper", "-c", "Office", "-p", "3", "-s", "40", "-m", "10"],
        )
        .await
        .unwrap();

        let listed = exec(&state, &["--json", "product", "list", "--sort", "stock", "--desc"])
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&listed).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["products"][0]["name"], "Paper");
        assert_eq!(value["products"][1]["status"], "low");

        let report = exec(&state, &["report", "preview", "--type", "low-stock"])
            .await
            .unwrap();
        assert!(report.contains("Low Stock Report"));
        assert!(report.contains("Date Range: Last 7 days"));
        assert!(report.contains("Hammer"));
        assert!(!report.contains("Paper"));
    }

    #[tokio::test]
    async fn test_bad_report_days_is_invalid_parameter() {
        let state = test_state().await;
        exec(&state, &["login", "admin", "--password", "secret"]).await.unwrap();

        let err = exec(&state, &["report", "preview", "--days", "14"])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_an_error() {
        let state = test_state().await;
        exec(&state, &["login", "admin", "--password", "secret"]).await.unwrap();

        let out = exec(&state, &["product", "update", "nope", "--stock", "3"])
            .await
            .unwrap();
        assert!(out.contains("nothing changed"));
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let state = test_state().await;
        exec(&state, &["login", "admin", "--password", "secret"]).await.unwrap();

        let path = std::env::temp_dir().join(format!("stockroom-export-{}.json", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        exec(&state, &["report", "export", "-o", &path_str, "--format", "json"])
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["title"], "Stock Levels Report");
        assert_eq!(written["pages"].as_array().unwrap().len(), 1);
        std::fs::remove_file(&path).ok();
    }
}
