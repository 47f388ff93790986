use super::config::{Config, OutputConfig};
use super::loader::load_api;
use crate::codegen::{generate, GeneratedBindings, GenerationContext, GenerationReport};
use crate::core::ApiDescription;
use crate::errors::{GenError, Result, Unsupported};
use crate::infrastructure::{init_logging, LogFormat};
use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Go/cgo binding generator for C API descriptions
#[derive(Parser, Debug)]
#[command(name = "cimgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate Go bindings from a parsed C API description")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration file; discovered from the working directory when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the binding artifacts
    Generate {
        /// API description (JSON)
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target package name
        #[arg(long)]
        package: Option<String>,

        /// Write a JSON generation report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Report types the marshalling table does not cover, without writing
    Check {
        /// API description (JSON)
        input: PathBuf,
    },

    /// Write a configuration file holding every default
    InitConfig {
        #[arg(default_value = "cimgen.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Paths of the artifacts written, in emission order.
pub fn write_artifacts(
    directory: &Path,
    output: &OutputConfig,
    bindings: &GeneratedBindings,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory).map_err(|source| GenError::Write {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut artifacts = vec![
        (&output.enums_file, &bindings.enums),
        (&output.structs_file, &bindings.structs),
        (&output.funcs_file, &bindings.funcs),
    ];
    if let Some(support) = &bindings.support {
        artifacts.push((&output.support_file, support));
    }

    let mut written = Vec::with_capacity(artifacts.len());
    for (name, content) in artifacts {
        let path = directory.join(name);
        fs::write(&path, content).map_err(|source| GenError::Write { path: path.clone(), source })?;
        debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// Diagnostics in input order, then the summary line.
pub fn print_report(report: &GenerationReport, out: &mut impl Write) -> io::Result<()> {
    for diagnostic in &report.diagnostics {
        writeln!(out, "{}", diagnostic)?;
    }
    writeln!(out, "{}", report.summary_line())
}

fn stdout_error(source: io::Error) -> GenError {
    GenError::Write { path: PathBuf::from("<stdout>"), source }
}

pub fn run_generate(
    config: &Config,
    api: &ApiDescription,
    report_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<GenerationReport> {
    let ctx = GenerationContext::new(api, config.conventions.clone(), config.output.artifact_options());
    let (bindings, report) = generate(&ctx, api);

    let written = write_artifacts(&config.output.directory, &config.output, &bindings)?;
    info!(files = written.len(), directory = %config.output.directory.display(), "artifacts written");

    if let Some(path) = report_path {
        fs::write(path, report.to_json()?).map_err(|source| GenError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    print_report(&report, out).map_err(stdout_error)?;
    Ok(report)
}

/// Coverage gaps with suggestions, then a dry-run summary. `true` when the
/// table covers every type the input uses.
pub fn run_check(config: &Config, api: &ApiDescription, out: &mut impl Write) -> Result<bool> {
    let ctx = GenerationContext::new(api, config.conventions.clone(), config.output.artifact_options());
    let gaps = ctx.coverage_gaps(api);

    let problems = gaps
        .arg_types
        .iter()
        .map(|ty| Unsupported::Arg { name: String::new(), ty: ty.clone() })
        .chain(gaps.return_types.iter().map(|ty| Unsupported::Return { ty: ty.clone() }));

    for problem in problems {
        let suggestions = ctx.suggestions(&problem);
        if suggestions.is_empty() {
            writeln!(out, "{}", problem).map_err(stdout_error)?;
        } else {
            writeln!(out, "{} (did you mean: {}?)", problem, suggestions.join(", "))
                .map_err(stdout_error)?;
        }
    }

    let (_, report) = generate(&ctx, api);
    writeln!(out, "{}", report.summary_line()).map_err(stdout_error)?;

    Ok(gaps.is_empty())
}

pub fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(GenError::Write {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "file exists, pass --force to overwrite"),
        });
    }
    Config::default().save(path)
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => Config::discover(),
    }
}

/// Entry point for the CLI binary
pub fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;

    let mut log_config = config.log.to_log_config().verbosity(cli.verbose);
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format);
    }
    let _guard = init_logging(log_config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Generate { input, output, package, report } => {
            if let Some(dir) = output {
                config.output.directory = dir;
            }
            if let Some(package) = package {
                config.output.package = package;
            }

            let api = load_api(&input)?;
            run_generate(&config, &api, report.as_deref(), &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { input } => {
            let api = load_api(&input)?;
            let clean = run_check(&config, &api, &mut out)?;
            Ok(if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::InitConfig { path, force } => {
            run_init_config(&path, force)?;
            writeln!(out, "wrote {}", path.display())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
