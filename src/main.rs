mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cmd::changelog::{self, ChangelogCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::change::RevisionRange;
use crate::domain::prompt::ChangelogStyle;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::llm::OpenAiClient;

#[derive(Debug, Parser)]
#[command(
    name = "relnotes",
    author,
    version,
    about = "Generate AI-powered release notes from git tags"
)]
struct Cli {
    /// Starting tag or commit.
    #[arg(short, long, value_name = "TAG")]
    from: String,

    /// Ending tag or commit.
    #[arg(short, long, value_name = "TAG")]
    to: String,

    /// Write the changelog to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// OpenAI API key (can also be set via the OPENAI_API_KEY environment variable).
    #[arg(short = 'k', long, value_name = "KEY")]
    api_key: Option<String>,

    /// Generate a detailed changelog with technical information.
    #[arg(short, long)]
    detailed: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(parse_exit_code(&err));
        }
    };

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

/// Usage errors exit 1 like every other fatal error; `--help` and
/// `--version` exit 0.
fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

async fn run(cli: Cli) -> AppResult<()> {
    dotenv::dotenv().ok();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd, cli.api_key.as_deref())?;

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let language_model = Arc::new(OpenAiClient::new(&config));
    let context = AppContext::new(config, git, language_model);

    changelog::run(
        &context,
        ChangelogCommandArgs {
            range: RevisionRange::new(cli.from, cli.to),
            style: ChangelogStyle::from_detailed_flag(cli.detailed),
            output: cli.output,
        },
    )
    .await
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(rust_log.as_deref(), verbose))
        .try_init();
}

/// `RUST_LOG` when set and valid, WARN otherwise; `--verbose` adds DEBUG.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    if verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    }
}
