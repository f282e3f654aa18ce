use clap::Parser;
use env_logger::Env;
use log::error;
use pagewright::config::Project;
use pagewright::engine::HandlebarsEngine;
use pagewright::pretty::HtmlFormatter;
use pagewright::{output, pipeline};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pagewright")]
#[command(about = "Build a static site from the project in the current directory")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Collected only to be rejected: the build takes no arguments
    #[arg(hide = true, allow_hyphen_values = true)]
    unexpected: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // clap swallows a bare `--`, so the raw argument list decides
    let raw: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let unexpected = match Cli::try_parse() {
        Ok(cli) if raw.is_empty() => cli.unexpected,
        _ => raw,
    };
    if !unexpected.is_empty() {
        error!(
            "Currently, no command line arguments are supported. Arguments found: {:?}",
            unexpected
        );
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?;
    let project = Project::load(&root)?;
    let engine = HandlebarsEngine::new(&project.source_dir())?;
    let report = pipeline::build(&project, &engine, &HtmlFormatter)?;
    output::print_build_report(&report, &project);
    Ok(())
}
