mod manifest;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sigmatch::{Bindings, Signature, find_match};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use crate::manifest::load_manifest;

#[derive(Parser)]
#[command(name = "sigmatch")]
#[command(version, about = "Match command lines against declared signatures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter signatures.json
    Init(InitArgs),

    /// Print every declared signature
    List(ManifestArgs),

    /// Validate the manifest without matching anything
    Check(ManifestArgs),

    /// Match a command line and print the bound parameters as JSON
    Match(MatchArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Replace an existing manifest
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ManifestArgs {
    /// Path to the signatures manifest
    #[arg(
        short,
        long,
        env = "SIGMATCH_MANIFEST",
        value_name = "FILE",
        default_value = manifest::DEFAULT_MANIFEST_NAME
    )]
    manifest: PathBuf,
}

#[derive(Parser)]
struct MatchArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Print every matching signature instead of the first
    #[arg(long)]
    all: bool,

    /// Tokens to match (use `--` before tokens that start with `-`)
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MatchReport {
    signature: String,
    bindings: Bindings,
}

impl MatchReport {
    fn new(signature: &Signature, bindings: Bindings) -> Self {
        Self {
            signature: signature.to_string(),
            bindings,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::List(args) => list(args),
        Commands::Check(args) => check(args),
        Commands::Match(args) => match_command(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let path = manifest::write_default_manifest(&dir, args.force)?;
    eprintln!("Created: {}", path.display());
    Ok(())
}

fn load_signatures(args: &ManifestArgs) -> Result<Vec<Signature>> {
    load_manifest(&args.manifest)?.signatures()
}

fn list(args: ManifestArgs) -> Result<()> {
    tracing::debug!("executing list command");
    let signatures = load_signatures(&args)?;

    let mut stdout = std::io::stdout().lock();
    for signature in &signatures {
        writeln!(stdout, "{signature}").context("failed to write to stdout")?;
    }
    Ok(())
}

fn check(args: ManifestArgs) -> Result<()> {
    tracing::debug!("executing check command");
    let signatures = load_signatures(&args)?;
    eprintln!(
        "{}: {} signature(s) ok",
        args.manifest.display(),
        signatures.len()
    );
    Ok(())
}

fn match_command(args: MatchArgs) -> Result<()> {
    tracing::debug!(tokens = ?args.tokens, "executing match command");
    let signatures = load_signatures(&args.manifest)?;

    let json = if args.all {
        let reports: Vec<MatchReport> = signatures
            .iter()
            .filter_map(|s| s.match_argv(&args.tokens).map(|b| MatchReport::new(s, b)))
            .collect();
        if reports.is_empty() {
            bail!("no signature matches: {}", args.tokens.join(" "));
        }
        serde_json::to_string_pretty(&reports)?
    } else {
        let Some((signature, bindings)) = find_match(&signatures, &args.tokens) else {
            bail!("no signature matches: {}", args.tokens.join(" "));
        };
        tracing::info!(signature = %signature, "matched");
        serde_json::to_string_pretty(&MatchReport::new(signature, bindings))?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write to stdout")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
