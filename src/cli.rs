use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gradle-runner")]
#[command(version)]
#[command(about = "Runs Gradle test projects and collects JUnit results", long_about = None)]
pub struct Cli {
    /// Execution request JSON; "-" reads from stdin
    #[arg(default_value = "-")]
    pub execution: String,

    /// Override the runner data directory (RUNNER_DATADIR)
    #[arg(short, long)]
    pub datadir: Option<PathBuf>,

    /// Runner config file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How to print the execution result
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Machine-readable result on stdout
    Json,
    /// Human-readable summary
    Pretty,
}
