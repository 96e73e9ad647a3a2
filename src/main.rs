#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

// Exit codes
const EXIT_SUCCESS: i32 = 0;

use cssprobe::errors::CssprobeError;
use cssprobe::types::OutputFormat;

#[derive(Parser)]
#[command(name = "cssprobe")]
#[command(about = "Synthesizes unique CSS selectors for page elements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    format: OutputFormat,
}

/// How pages given as URLs are loaded
#[derive(Args)]
struct FetchArgs {
    /// Browser to render URLs with
    #[arg(short, long, default_value = "firefox")]
    browser: String,

    /// WebDriver endpoint (defaults to the browser's standard port)
    #[arg(long, env = "CSSPROBE_WEBDRIVER_URL")]
    webdriver_url: Option<String>,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless")]
    no_headless: bool,

    /// Fetch URLs with a plain HTTP GET instead of a browser
    #[arg(long = "no-browser")]
    no_browser: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build unique selectors for the elements a locator matches
    Synthesize {
        /// Page to analyze: file path, URL, or - for stdin
        source: String,

        /// CSS selector locating the target elements
        locator: String,

        /// Build selectors for all matching elements instead of just the first
        #[arg(long)]
        all: bool,

        /// Use the element at a specific index (0-based)
        #[arg(long)]
        index: Option<usize>,

        /// Expect exactly one element (error if multiple found)
        #[arg(long)]
        expect_one: bool,

        /// Check that every selector resolves back to its element
        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Check how selectors resolve against a page
    Verify {
        /// Page to check: file path, URL, or - for stdin
        source: String,

        /// Selectors to resolve
        #[arg(required = true)]
        selectors: Vec<String>,

        /// Fail unless every selector matches exactly one element
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Handle exit codes based on error type
    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            // Convert to our error type to get proper exit code
            let cssprobe_err: CssprobeError = err.into();

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": cssprobe_err.to_string(),
                "exit_code": cssprobe_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", cssprobe_err);
            std::process::exit(cssprobe_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cssprobe=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synthesize {
            source,
            locator,
            all,
            index,
            expect_one,
            verify,
            fetch,
        } => {
            commands::synthesize::handle_synthesize(
                source,
                locator,
                all,
                index,
                expect_one,
                verify,
                fetch.browser,
                fetch.webdriver_url,
                fetch.no_headless,
                fetch.no_browser,
                cli.format,
            )
            .await?
        }

        Commands::Verify {
            source,
            selectors,
            strict,
            fetch,
        } => {
            commands::verify::handle_verify(
                source,
                selectors,
                strict,
                fetch.browser,
                fetch.webdriver_url,
                fetch.no_headless,
                fetch.no_browser,
                cli.format,
            )
            .await?
        }

        Commands::Version => commands::version::handle_version(cli.format).await?,
    }

    Ok(())
}
