use std::fs;
use std::io::Read;

use clap::Parser;
use colored::Colorize;

use gradle_runner::cli::{Cli, OutputFormat};
use gradle_runner::{Execution, ExecutionResult, ExecutionStatus, GradleRunner, Result, RunnerConfig};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(passed) => std::process::exit(if passed { 0 } else { 1 }),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut config = RunnerConfig::load(cli.config.as_deref())?;
    if let Some(datadir) = cli.datadir {
        config.datadir = Some(datadir);
    }

    let execution = read_execution(&cli.execution)?;
    let runner = GradleRunner::new(config);
    let result = runner.run(&execution)?;

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Pretty => print_summary(&result),
    }

    Ok(result.passed())
}

fn read_execution(source: &str) -> Result<Execution> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn print_summary(result: &ExecutionResult) {
    let status = match result.status {
        ExecutionStatus::Passed => "passed".green().bold(),
        ExecutionStatus::Failed => "failed".red().bold(),
    };
    println!("execution {}", status);

    if !result.error_message.is_empty() {
        println!("  {}", result.error_message.red());
    }
    for step in &result.steps {
        let mark = match step.status {
            ExecutionStatus::Passed => "✔".green(),
            ExecutionStatus::Failed => "✖".red(),
        };
        println!("  {} {} ({})", mark, step.name, step.duration);
    }
}
