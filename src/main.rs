//! Google Books search from the terminal.
//!
//! Crate layout (reading entry points):
//! - `base_system` — config / logging / json helper infrastructure
//! - `search`      — the search pipeline: query → gate → fetch → extract → state
//! - `ui`          — console presentation glue consuming pipeline emissions

use anyhow::{Result, anyhow};
use clap::Parser;

mod base_system;
mod search;
mod ui;

use base_system::config::{load_or_create, load_or_create_with_base};
use base_system::context::Config;
use base_system::logging::{LogOptions, LogSystem};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "booksearch")]
#[command(about = "Search Google Books from the terminal")]
struct Cli {
    /// Search once for this query and exit instead of entering the prompt
    query: Option<String>,

    /// Enable debug log output
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Show version information and exit
    #[arg(long, default_value_t = false)]
    version: bool,

    /// Data directory for config.yml and logs (handy for containers)
    #[arg(long)]
    data_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("booksearch v{VERSION}");
        return Ok(());
    }

    let data_dir = cli.data_dir.as_deref().map(std::path::Path::new);
    let _log = init_logging(cli.debug, data_dir)?;

    let config = if let Some(dir) = data_dir {
        load_or_create_with_base::<Config>(None, Some(dir)).map_err(|e| anyhow!(e.to_string()))?
    } else {
        load_or_create::<Config>(None).map_err(|e| anyhow!(e.to_string()))?
    };

    ui::console::run(&config, cli.query.as_deref())
}

fn init_logging(debug: bool, base_dir: Option<&std::path::Path>) -> Result<LogSystem> {
    let opts = LogOptions {
        debug,
        use_color: true,
        archive_on_exit: true,
        console: false,
    };
    match base_dir {
        Some(dir) => LogSystem::init_with_base(opts, Some(dir)),
        None => LogSystem::init(opts),
    }
    .map_err(|e| anyhow!(e))
}
