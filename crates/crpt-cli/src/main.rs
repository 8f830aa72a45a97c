use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crpt_core::model::ProductGroup;
use crpt_throttle::TimeUnit;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "crpt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the document API (overrides config and CRPT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Authorization token (overrides config and CRPT_AUTH_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Submit an "introduce goods into circulation" document
    ///
    /// Reads the document as JSON, validates it locally and submits it as an
    /// LP_INTRODUCE_GOODS document for the given product group. The request
    /// goes through the process-wide throttle configured by `request_limit`
    /// and `time_unit`.
    ///
    /// The document JSON and the signature are sent base64-encoded. Exits
    /// with an error if the API answers with a non-2xx status.
    Introduce {
        /// Path to the document JSON file
        document: PathBuf,

        /// Product group (clothes, shoes, tobacco, perfumery, tires,
        /// electronics, pharma, milk, bicycle, wheelchairs)
        #[arg(long)]
        group: ProductGroup,

        /// Path to the detached signature, or `-` to read it from stdin
        #[arg(long)]
        signature: PathBuf,
    },
    /// Validate a document file without sending it
    Validate {
        /// Path to the document JSON file
        document: PathBuf,
    },
    /// Inspect or initialize the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Drive a throttle from several threads and report admission times
    Throttle {
        /// Requests admitted per time unit
        #[arg(long, default_value_t = 2)]
        requests: usize,

        /// Time unit (ms, second, minute, ...)
        #[arg(long, default_value = "second")]
        per: TimeUnit,

        /// Number of concurrent callers
        #[arg(long, default_value_t = 5)]
        callers: usize,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Create the config file with defaults
    Init,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let overrides = commands::Overrides {
        base_url: cli.base_url,
        token: cli.token,
    };

    match cli.command {
        Commands::Introduce {
            document,
            group,
            signature,
        } => {
            commands::run_introduce(&overrides, document, group, signature).await?;
        }
        Commands::Validate { document } => {
            commands::run_validate(document)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&overrides)?,
            ConfigAction::Init => commands::config::init_config()?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
        },
        Commands::Throttle {
            requests,
            per,
            callers,
        } => {
            commands::run_throttle(requests, per, callers)?;
        }
    }

    Ok(())
}
