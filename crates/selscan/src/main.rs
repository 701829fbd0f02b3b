use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use selscan_core::config::{Config, OutputFormat};
use selscan_core::diagnostics::Diagnostics;
use selscan_core::pipeline::{ExtractionPipeline, Options};

use selscan_css::{CssSelectorParser, CssStylesheetParser};
use selscan_report::{json, text};

mod sources;

#[derive(Parser)]
#[command(name = "selscan")]
#[command(about = "List, classify, and filter the selectors used in CSS sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and report the selectors found in the given sources
    List {
        /// Files, directories, or glob patterns to read CSS from
        #[arg(required = true)]
        sources: Vec<String>,
        /// Narrow the report to named views (selectors, simpleSelectors,
        /// simple, classes, ids, attributes, types); repeatable
        #[arg(short, long)]
        include: Vec<String>,
        /// Output format: text or json
        #[arg(long)]
        format: Option<String>,
        /// Emit single-line JSON (implies --format json)
        #[arg(long)]
        compact: bool,
        /// Config file path (defaults to .selscan.toml found upward from cwd)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Create a default .selscan.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            sources,
            include,
            format,
            compact,
            config,
        } => cmd_list(&sources, include, format.as_deref(), compact, config.as_deref()),
        Commands::Init { force } => cmd_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

fn cmd_list(
    source_args: &[String],
    include: Vec<String>,
    format: Option<&str>,
    compact: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;

    // CLI flags win over config; config fills in whatever was not given.
    let include = if include.is_empty() {
        config.report.include.normalize()
    } else {
        include
    };
    let format = match format {
        Some(name) => name.parse::<OutputFormat>()?,
        None if compact => OutputFormat::Json,
        None => config.report.format,
    };

    let css = sources::gather(source_args, &config.sources)?;

    let pipeline = ExtractionPipeline::new(
        Box::new(CssStylesheetParser),
        Box::new(CssSelectorParser),
        Options { include },
    );
    let mut diag = Diagnostics::new();
    let report = pipeline.run(&css, &mut diag)?;

    if !diag.is_empty() {
        eprint!("{}", text::format_warnings(diag.warnings()));
    }

    match format {
        OutputFormat::Text => print!("{}", text::format_report(&report)),
        OutputFormat::Json => println!("{}", json::format_report(&report, compact)),
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let target = PathBuf::from(".selscan.toml");
    if target.exists() && !force {
        anyhow::bail!(".selscan.toml already exists. Use --force to overwrite.");
    }
    std::fs::write(&target, Config::default_toml())?;
    println!("Created .selscan.toml with default configuration.");
    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(Path::new("."))),
    }
}
