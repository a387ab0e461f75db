//! `repro` -- reproduction driver for the trained-network paper.
//!
//! Translates task keywords into the fixed sequence of `do.py` and figure
//! script invocations that retrains each model, regenerates its trial data,
//! and renders the figures. Training times are recorded under `paper/times/`.
//! With `--simulate` the command lines are printed instead of executed.
//!
//! # Environment variables
//!
//! | Variable       | Required | Default  | Description                              |
//! |----------------|----------|----------|------------------------------------------|
//! | `REPRO_ROOT`   | no       | `.`      | Repository root; `--root` takes priority |
//! | `REPRO_PYTHON` | no       | `python` | Interpreter for every child process      |

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repro_core::catalog;
use repro_core::layout::Layout;
use repro_core::runner::Runner;

#[derive(Parser, Debug)]
#[command(name = "repro", version, about = "Retrain, analyze, and plot the paper's models")]
struct Cli {
    /// Print each command, indented, instead of running it.
    #[arg(long)]
    simulate: bool,

    /// Repository root containing `examples/` and `paper/`.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Task keywords to run; unknown keywords are skipped.
    tasks: Vec<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repro_driver=info,repro_core=info".into()),
        )
        // Logs go to stderr; stdout carries banners, child output noise,
        // and simulated command lines only.
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let root = cli
        .root
        .or_else(|| std::env::var_os("REPRO_ROOT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut layout = Layout::new(&root);
    if let Ok(python) = std::env::var("REPRO_PYTHON") {
        layout = layout.with_python(python);
    }

    if let Err(err) = layout.ensure_dirs() {
        tracing::error!(root = %root.display(), %err, "Failed to create the times directory");
        std::process::exit(1);
    }

    let keywords = if cli.tasks.is_empty() {
        catalog::default_keywords()
    } else {
        cli.tasks
    };

    tracing::info!(
        root = %root.display(),
        simulate = cli.simulate,
        tasks = ?keywords,
        "Starting repro",
    );

    let runner = Runner::new(layout, cli.simulate);
    if let Err(err) = runner.run_keywords(&keywords).await {
        // Children share our stdout; flush before the diagnostic so the two
        // cannot interleave.
        let _ = std::io::stdout().flush();
        match err.return_code() {
            Some(code) => println!("Something went wrong (return code {code})."),
            None => println!("Something went wrong ({err})."),
        }
        std::process::exit(1);
    }
}
