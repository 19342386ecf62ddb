mod commands;
mod output;
mod telemetry;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "markscan",
    version,
    about = "Mark-scheme guideline analysis for exam-paper JSON documents"
)]
struct Cli {
    /// Log level or filter directive (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the marking conventions a paper document uses
    Analyze {
        /// Path to the paper JSON document
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Analyze a paper and update extraction rules to match it
    Reconcile {
        /// Path to the paper JSON document
        input_file: PathBuf,

        /// Starting rules from a JSON file
        #[arg(short, long = "rules", value_name = "FILE", conflicts_with = "preset")]
        rules: Option<PathBuf>,

        /// Starting rules from a predefined preset: default, cambridge, edexcel
        #[arg(short, long = "preset", value_name = "NAME")]
        preset: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the updated rules to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Check every question in a paper for missing or inconsistent data
    Validate {
        /// Path to the paper JSON document
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Break down a single answer string (alternatives, operators, format hints)
    Answer {
        /// The answer text, e.g. "red / blue"
        text: String,

        /// Question text used for format and requirement hints
        #[arg(short, long, value_name = "TEXT")]
        question: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect extraction rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined rule presets
    List,
    /// Print a preset as JSON
    Show {
        /// Preset name (e.g., "cambridge")
        preset: String,
    },
    /// Describe the rules file format
    Schema,
    /// Validate a custom rules file
    Validate {
        /// Path to JSON rules file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Analyze { input_file, output } => {
            commands::analyze::run(input_file, &output).map(|()| ExitCode::SUCCESS)
        }
        Commands::Reconcile {
            input_file,
            rules,
            preset,
            output,
            out,
        } => commands::reconcile::run(input_file, rules, preset, &output, out)
            .map(|()| ExitCode::SUCCESS),
        Commands::Validate { input_file, output } => {
            commands::validate::run(input_file, &output).map(|all_valid| {
                if all_valid {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            })
        }
        Commands::Answer {
            text,
            question,
            output,
        } => commands::answer::run(&text, question.as_deref(), &output).map(|()| ExitCode::SUCCESS),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Show { preset } => commands::rules::show(&preset),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        }
        .map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
