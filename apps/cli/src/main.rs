//! Stockroom - command-line inventory manager.
//!
//! # Usage
//!
//! ```bash
//! # Start a session (password from the environment keeps it out of history)
//! STOCKROOM_PASSWORD=secret stockroom login admin
//!
//! # Add and list products
//! stockroom product add -n "Stapler" -c Office -p 4.50 -s 12 -m 5
//! stockroom product list --search office --sort price --desc
//!
//! # Low stock report for the last week, as a paginated text file
//! stockroom report export --type low-stock --days 7 -o low-stock.txt
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;

use stockroom_cli::cli::Cli;
use stockroom_cli::{init_tracing, run};

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            tracing::debug!(code = e.code.as_str(), "Command failed");
            if json {
                match serde_json::to_string_pretty(&e) {
                    Ok(body) => eprintln!("{body}"),
                    Err(_) => eprintln!("{e}"),
                }
            } else {
                eprintln!("{e}");
            }
            std::process::exit(1);
        }
    }
}
