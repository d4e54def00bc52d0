use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use compare_surfaces::commands::{
    baseline_command, compare_command, inspect_command, validate_command, CompareOptions,
};
use compare_surfaces::{init_logging, EXIT_FINDINGS, EXIT_INVALID_INPUT, EXIT_OK};
use surface_core::config::FailOn;
use surface_core::report::ReportFormat;

/// API surface compatibility checker CLI.
///
/// This CLI is a thin wrapper around `surface-core` (exposed in code as
/// `surface_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
///
/// Running without a subcommand behaves like `compare`.
#[derive(Parser, Debug)]
#[command(
    name = "compare-surfaces",
    version,
    about = "Compare versioned API surface snapshots and flag breaking changes",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    compare: CompareArgs,
}

#[derive(Args, Debug, Clone, Default)]
struct CompareArgs {
    /// Snapshot of the previous API surface (.json, .yaml, or .yml).
    #[arg(long)]
    old: Option<String>,

    /// Snapshot of the candidate API surface.
    #[arg(long)]
    new: Option<String>,

    /// Lowest severity that makes the run fail: breaking, warning, or never.
    #[arg(long)]
    fail_on: Option<FailOn>,

    /// Report format: text or json.
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Optional checker config file (JSON or YAML).
    #[arg(long)]
    config: Option<String>,

    /// Baseline of accepted findings to ignore.
    #[arg(long)]
    baseline: Option<String>,

    /// Spread the comparison over all CPU cores.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

impl CompareArgs {
    fn is_empty(&self) -> bool {
        self.old.is_none()
            && self.new.is_none()
            && self.fail_on.is_none()
            && self.format.is_none()
            && self.config.is_none()
            && self.baseline.is_none()
            && !self.parallel
    }

    fn into_options(self) -> Result<CompareOptions> {
        let (Some(old), Some(new)) = (self.old, self.new) else {
            return Err(anyhow!("Both --old and --new snapshot paths are required"));
        };
        Ok(CompareOptions {
            old,
            new,
            fail_on: self.fail_on,
            format: self.format,
            config: self.config,
            baseline: self.baseline,
            parallel: self.parallel,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two snapshots and report added, removed, and changed symbols.
    ///
    /// Exit status is 0 when nothing reaches the fail-on threshold, 1 when
    /// something does, and 2 when either snapshot is unreadable or malformed.
    Compare(CompareArgs),

    /// Load a snapshot and check its structural invariants.
    Validate {
        /// Snapshot to validate.
        #[arg(long)]
        surface: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show one class of a snapshot, including its resolved supertype chain.
    Inspect {
        /// Snapshot containing the class.
        #[arg(long)]
        surface: String,

        /// Qualified class name (e.g., `android.content.ClipData`).
        #[arg(long)]
        class: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Record the current warning and breaking findings as accepted.
    Baseline {
        #[arg(long)]
        old: String,

        #[arg(long)]
        new: String,

        /// Where to write the baseline JSON.
        #[arg(long)]
        output: String,

        /// Optional checker config file (JSON or YAML).
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_INVALID_INPUT)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let command = match cli.command {
        Some(_) if !cli.compare.is_empty() => {
            return Err(anyhow!(
                "Comparison options must follow the subcommand (e.g. `compare --old ...`)"
            ));
        }
        Some(command) => command,
        None => Command::Compare(cli.compare),
    };

    match command {
        Command::Compare(args) => {
            let tripped = compare_command(&args.into_options()?)?;
            Ok(if tripped { EXIT_FINDINGS } else { EXIT_OK })
        }
        Command::Validate { surface, json } => {
            validate_command(&surface, json)?;
            Ok(EXIT_OK)
        }
        Command::Inspect { surface, class, json } => {
            inspect_command(&surface, &class, json)?;
            Ok(EXIT_OK)
        }
        Command::Baseline { old, new, output, config } => {
            baseline_command(&old, &new, &output, config.as_deref())?;
            Ok(EXIT_OK)
        }
    }
}
