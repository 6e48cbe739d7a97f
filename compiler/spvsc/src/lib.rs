//! Driver for the shader generator.
//!
//! `spvsc generate` runs one session per seed on the rayon pool and writes
//! `<seed>.spvasm` with `<seed>.buffers.json` (the storage buffer layout an
//! execution harness needs) into the output directory.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use rayon::prelude::*;
use spvs_gen::{generate_shader, ConfigError, GenError, GeneratorConfig};
use spvs_ir::{EmitError, ShaderStats};
use tracing::{debug, info, warn};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Without `verbose`, logging is only set up when `RUST_LOG` is set. With
/// it, events are printed as an indented tree and the filter defaults to
/// `debug`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if verbose {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing value for `{0}`")]
    MissingValue(String),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("seed {seed}: {source}")]
    Generate { seed: u64, source: GenError },
    #[error("seed {seed}: {source}")]
    Emit { seed: u64, source: EmitError },
}

/// Options of `spvsc generate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// First seed; sessions use `seed`, `seed + 1`, ...
    pub seed: u64,
    pub count: u64,
    pub config: Option<PathBuf>,
    pub out: PathBuf,
    pub verbose: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            count: 1,
            config: None,
            out: PathBuf::from("."),
            verbose: false,
        }
    }
}

/// Parse the arguments following `generate`.
pub fn parse_generate_options(args: &[String]) -> Result<GenerateOptions, CliError> {
    let mut options = GenerateOptions::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| CliError::MissingValue(arg.clone()))
        };
        match arg.as_str() {
            "--seed" => options.seed = parse_number(arg, value()?)?,
            "--count" => options.count = parse_number(arg, value()?)?,
            "--config" => options.config = Some(PathBuf::from(value()?)),
            "--out" | "-o" => options.out = PathBuf::from(value()?),
            "--verbose" | "-v" => options.verbose = true,
            _ => return Err(CliError::UnknownOption(arg.clone())),
        }
    }
    Ok(options)
}

fn parse_number(flag: &str, value: &str) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::InvalidNumber {
        flag: flag.to_owned(),
        value: value.to_owned(),
    })
}

/// Read a JSON configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, CliError> {
    let config = match path {
        None => GeneratorConfig::default(),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_owned(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Json {
                path: path.to_owned(),
                source,
            })?
        }
    };
    config.validate()?;
    Ok(config)
}

/// What happened to one seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Paths of the shader and its buffer layout.
    Written { shader: PathBuf, buffers: PathBuf },
    /// The session ran over its instruction budget.
    OverBudget,
}

/// Run one session and write its artifacts into `out`.
pub fn generate_one(
    config: &GeneratorConfig,
    seed: u64,
    out: &Path,
) -> Result<SessionOutcome, CliError> {
    let config = GeneratorConfig {
        seed,
        ..config.clone()
    };
    let shader = match generate_shader(&config) {
        Ok(shader) => shader,
        Err(GenError::BudgetExceeded { limit }) => {
            warn!(seed, limit, "instruction budget exceeded, skipping");
            return Ok(SessionOutcome::OverBudget);
        }
        Err(source) => return Err(CliError::Generate { seed, source }),
    };
    let text = shader
        .to_text()
        .map_err(|source| CliError::Emit { seed, source })?;

    let stats = ShaderStats::collect(&shader);
    debug!(
        seed,
        max_selection_depth = stats.max_selection_depth,
        global_variables = stats.global_variables,
        "stats"
    );

    let buffers = shader.external_buffers();
    let layout = serde_json::to_string_pretty(&buffers).map_err(|source| CliError::Json {
        path: out.to_owned(),
        source,
    })?;

    let shader_path = out.join(format!("{seed}.spvasm"));
    let buffers_path = out.join(format!("{seed}.buffers.json"));
    write(&shader_path, &text)?;
    write(&buffers_path, &layout)?;
    Ok(SessionOutcome::Written {
        shader: shader_path,
        buffers: buffers_path,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Totals of a `generate` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub written: usize,
    pub over_budget: usize,
    pub failed: usize,
}

/// Generate `options.count` shaders in parallel.
///
/// Per-seed failures are reported on stderr and counted; only errors that
/// stop every session (bad configuration, unwritable output directory)
/// are returned.
pub fn run_generate(options: &GenerateOptions) -> Result<GenerateSummary, CliError> {
    let config = load_config(options.config.as_deref())?;
    std::fs::create_dir_all(&options.out).map_err(|source| CliError::Io {
        path: options.out.clone(),
        source,
    })?;

    let written = AtomicUsize::new(0);
    let over_budget = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let seeds: Vec<u64> = (0..options.count)
        .map(|i| options.seed.wrapping_add(i))
        .collect();
    seeds
        .par_iter()
        .for_each(|&seed| match generate_one(&config, seed, &options.out) {
            Ok(SessionOutcome::Written { shader, .. }) => {
                if options.verbose {
                    println!("Wrote: {}", shader.display());
                }
                written.fetch_add(1, Ordering::Relaxed);
            }
            Ok(SessionOutcome::OverBudget) => {
                over_budget.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                eprintln!("error: {err}");
                failed.fetch_add(1, Ordering::Relaxed);
            }
        });

    let summary = GenerateSummary {
        written: written.load(Ordering::Relaxed),
        over_budget: over_budget.load(Ordering::Relaxed),
        failed: failed.load(Ordering::Relaxed),
    };
    info!(
        written = summary.written,
        over_budget = summary.over_budget,
        failed = summary.failed,
        "generate finished"
    );
    Ok(summary)
}
