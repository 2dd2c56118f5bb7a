//! luastub: generate annotated Lua stub files for editor tooling.
//!
//! Two pipelines:
//!
//! - **stubs**: YAML API documentation → one stub per class, enum and library
//!   (`luastub stubs --docs docs -o stubs`)
//! - **code**: user Lua sources → constructor stubs for their classes
//!   (`luastub code --root mod -o .stubs`, or `luastub code --stdin < file.lua`)

mod config;
mod error;
mod generate;
mod loader;
mod lua;
mod model;
mod render;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::Config;
use generate::{CodeJob, Report, StubJob};
use lua::render::CodeContext;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "luastub",
    about = "Generate annotated Lua stub files from API documentation and Lua sources"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file. Defaults to ./luastub.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit classes that are not bound to a global variable
    #[arg(long, global = true)]
    force_global: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate stubs from a YAML documentation tree
    Stubs {
        /// Root of the documentation tree (<docs>/<component>/<kind>/*.yaml)
        #[arg(long)]
        docs: PathBuf,

        /// Output directory
        #[arg(short = 'o', long)]
        output: PathBuf,
    },
    /// Generate intermediate stubs for classes declared in Lua sources
    Code {
        /// Lua files, directories or glob patterns. Defaults to the whole root.
        files: Vec<String>,

        /// Source root; output paths mirror paths relative to it
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output directory (required unless --stdin)
        #[arg(short = 'o', long, required_unless_present = "stdin")]
        output: Option<PathBuf>,

        /// Read one Lua source from stdin and print its stub
        #[arg(long, conflicts_with_all = ["files", "output"])]
        stdin: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("luastub={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let force_global = cli.force_global || config.generation.force_global;

    let report = match cli.command {
        Command::Stubs { docs, output } => stubs_mode(&docs, &output, &config)?,
        Command::Code { stdin: true, .. } => return stdin_mode(&config, force_global),
        Command::Code {
            files,
            root,
            output,
            ..
        } => {
            let output = output.context("--output is required unless --stdin is given")?;
            match code_mode(&root, &output, &files, &config, force_global)? {
                Some(report) => report,
                None => return Ok(()),
            }
        }
    };

    finish(report)
}

fn code_context(config: &Config, force_global: bool) -> CodeContext {
    CodeContext {
        title: config.stubs.title.clone(),
        force_global,
        generated_on: Utc::now(),
    }
}

fn stubs_mode(docs: &Path, output: &Path, config: &Config) -> Result<Report> {
    if !docs.is_dir() {
        anyhow::bail!("documentation directory not found: {}", docs.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;

    Ok(generate::generate_stubs(&StubJob {
        docs,
        output,
        config: &config.stubs,
        generated_on: Utc::now(),
    }))
}

/// `None` when source extraction is switched off in the config.
fn code_mode(
    root: &Path,
    output: &Path,
    files: &[String],
    config: &Config,
    force_global: bool,
) -> Result<Option<Report>> {
    if config.generation.disable {
        info!("Code generation not enabled, no intermediate stubs generated");
        return Ok(None);
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;

    let inputs = generate::lua_files(root, files, output)?;
    let job = CodeJob {
        root,
        output,
        ctx: code_context(config, force_global),
    };
    Ok(Some(generate::generate_code(&job, &inputs)))
}

/// stdin mode: read one Lua source, write its stub to stdout.
fn stdin_mode(config: &Config, force_global: bool) -> Result<()> {
    if config.generation.disable {
        info!("Code generation not enabled, no intermediate stubs generated");
        return Ok(());
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let ctx = code_context(config, force_global);
    print!("{}", lua::generate(Path::new("stdin"), &input, &ctx)?);
    Ok(())
}

fn finish(report: Report) -> Result<()> {
    info!("{} file(s) written", report.written.len());
    if report.is_success() {
        return Ok(());
    }
    let failed: Vec<String> = report
        .failures
        .iter()
        .map(|f| f.path.display().to_string())
        .collect();
    anyhow::bail!("{} item(s) failed: {}", failed.len(), failed.join(", "))
}
