//! `jaxrs-analyzr` — analyze a compiled JAX-RS project and generate REST
//! resource documentation into the build output tree.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Resolve settings: CLI > settings file > defaults ([`config`]).
//! 3. Load the project model from `pom.xml` ([`project`]).
//! 4. Construct the capabilities: logger ([`logger`]), artifact resolver
//!    ([`resolver`]), analysis engine ([`engine`]).
//! 5. Run the pipeline once ([`orchestrator`]): validate → assemble
//!    classpath ([`classpath`]) → configure backend ([`backend`]) →
//!    prepare output ([`output`]) → analyze → write.
//! 6. Exit `0` (report written, or skipped pre-compilation) or `1` on
//!    any failure.

mod backend;
mod classpath;
mod cli;
mod config;
mod engine;
mod error;
mod logger;
mod models;
mod orchestrator;
mod output;
mod project;
mod resolver;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use engine::JvmEngine;
use logger::{Logger, SilentLogger, TerminalLogger};
use orchestrator::{Orchestrator, RunOutcome};
use resolver::HttpResolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let path = cli.path.canonicalize().unwrap_or_else(|_| cli.path.clone());

    let settings = config::resolve_settings(&path, &cli)?;

    let logger: Box<dyn Logger> = if cli.quiet {
        Box::new(SilentLogger)
    } else {
        Box::new(TerminalLogger {
            verbose: cli.verbose,
        })
    };

    let maven_project = project::load_project(&path, &resolver::default_local_repository())?;
    if !cli.quiet {
        eprintln!(
            "  {} {} {} ({} dependencies declared)",
            "→".cyan(),
            maven_project.name,
            maven_project.version,
            maven_project.dependency_artifacts.len()
        );
    }

    let resolver = HttpResolver::new()?;
    let engine = match JvmEngine::locate() {
        Ok(engine) => engine,
        Err(e) => {
            logger.error(&format!("{:#}", anyhow::Error::from(e)));
            std::process::exit(1);
        }
    };

    let orchestrator =
        Orchestrator::new(&settings, &maven_project, &resolver, &engine, logger.as_ref());

    match orchestrator.run().await {
        Ok(RunOutcome::Completed { output }) => {
            if !cli.quiet {
                eprintln!("  {} generated {}", "✓".green(), output.display());
            }
            Ok(())
        }
        Ok(RunOutcome::Skipped) => Ok(()),
        Err(e) => {
            logger.error(&format!("{:#}", anyhow::Error::from(e)));
            std::process::exit(1);
        }
    }
}
