use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use peregrine_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "peregrine")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for analyzing web page load performance",
    long_about = "Peregrine loads pages in headless Chrome, extracts navigation, paint, and \
                  resource telemetry, grades the Core Web Vitals, and suggests concrete fixes \
                  for whatever slows the page down."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze page load performance for one or more URLs
    Analyze {
        /// URLs to analyze (absolute http:// or https://)
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,

        /// Write the JSON report to a file (an array when given several URLs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to the Chrome binary
        #[arg(long)]
        chrome_path: Option<PathBuf>,

        /// How many URLs to analyze at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// Overall per-URL deadline in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,

        /// Extra settle time after the load event, in milliseconds
        #[arg(long, default_value_t = 2000)]
        settle_ms: u64,

        /// Run Chrome with a visible window
        #[arg(long)]
        headed: bool,

        /// Include the per-resource waterfall in pretty output
        #[arg(long)]
        resources: bool,
    },

    /// Display a previously saved analysis report
    Show {
        /// Path to the report JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include the per-resource waterfall in pretty output
        #[arg(long)]
        resources: bool,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for peregrine.

SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    Bash:
        peregrine completion --shell bash >> ~/.bashrc

    Zsh:
        peregrine completion --shell zsh > ~/.zfunc/_peregrine
        (ensure ~/.zfunc is in your fpath, then restart zsh or source ~/.zshrc)

    Fish:
        peregrine completion --shell fish > ~/.config/fish/completions/peregrine.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Analyze {
            urls,
            output,
            chrome_path,
            concurrency,
            timeout,
            settle_ms,
            headed,
            resources,
        } => commands::analyze::execute(
            urls,
            output,
            chrome_path,
            concurrency,
            timeout,
            settle_ms,
            headed,
            resources,
            cli.format,
        ),
        Commands::Show { file, resources } => {
            commands::show::execute(&file, resources, cli.format)
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    // The bin target is `peregrine`; the command implementations live in
    // the `peregrine_cli` library, which the filter must name separately.
    let filter = if verbose {
        EnvFilter::new(
            "peregrine=debug,peregrine_cli=debug,peregrine_core=debug,peregrine_engine=debug,peregrine_browser=debug,peregrine_advisor=debug",
        )
    } else {
        EnvFilter::new("peregrine=info,peregrine_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
