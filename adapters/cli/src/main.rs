#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that compiles pathfinders into Java source.

mod config;
mod report;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pathtable_java::render;
use pathtable_system_compiler::compile;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::{
    config::{Config, Overrides, Settings},
    report::Report,
};

#[derive(Debug, Parser)]
#[command(name = "pathtable", version)]
#[command(about = "Compile bounded Bellman-Ford pathfinders into straight-line Java")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the generated Java class to a file or stdout.
    Generate(GenerateArgs),
    /// Print the size of the compiled pathfinder.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Vision radius in squared tiles.
    #[arg(long)]
    radius: Option<u32>,
    /// TOML configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output file, stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Package declared by the generated class.
    #[arg(long)]
    package: Option<String>,
    /// Name of the generated class.
    #[arg(long)]
    class_name: Option<String>,
    /// Leave explanatory comments out of the generated source.
    #[arg(long)]
    no_comments: bool,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the pathtable command-line interface.
fn main() -> Result<()> {
    init_tracing();

    match Cli::parse().command {
        Command::Generate(args) => generate(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = Config::load_optional(args.source.config.as_deref())?;
    let settings = Settings::resolve(
        config,
        Overrides {
            radius: args.source.radius,
            output: args.out,
            package: args.package,
            class_name: args.class_name,
            no_comments: args.no_comments,
        },
    );

    let compiled = compile(settings.radius).with_context(|| {
        format!("failed to compile pathfinder for radius {}", settings.radius)
    })?;
    let source = render(&compiled, &settings.target)
        .with_context(|| format!("failed to render java for radius {}", settings.radius))?;

    match &settings.output {
        Some(path) => {
            fs::write(path, &source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = source.len(), "wrote generated source");
        }
        None => io::stdout()
            .lock()
            .write_all(source.as_bytes())
            .context("failed to write generated source to stdout")?,
    }

    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let config = Config::load_optional(args.source.config.as_deref())?;
    let settings = Settings::resolve(
        config,
        Overrides {
            radius: args.source.radius,
            ..Overrides::default()
        },
    );

    let compiled = compile(settings.radius).with_context(|| {
        format!("failed to compile pathfinder for radius {}", settings.radius)
    })?;
    let report = Report::from_compiled(&compiled);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        println!("{report}");
    }

    Ok(())
}
