use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use resonance_engine::{Engine, EngineConfig, Submission, ViewState};
use resonance_indexer::{tokenize_phrase_list, tokenize_word_list, MANUAL_ORIGIN};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod report;

#[derive(Parser)]
#[command(name = "resonance")]
#[command(about = "Multi-layer resonance index and graph explorer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Engine config file (JSON or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word-list file to ingest; the file name becomes the origin
    #[arg(long = "input", global = true)]
    inputs: Vec<PathBuf>,

    /// Words or phrases typed by hand (comma, semicolon or newline separated)
    #[arg(long, global = true)]
    words: Vec<String>,

    /// Print JSON instead of markdown
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List shared resonances
    Groups(GroupsArgs),

    /// Full report for one item
    Report(ReportArgs),

    /// Items resonating with a number
    Number(NumberArgs),

    /// Resonance groups with a prime value
    Primes(PrimesArgs),

    /// Items grouped by color family
    Colors,

    /// Filtered, render-ready view of the graph
    View(ViewArgs),

    /// Sorted item list, one per line
    Export(ExportArgs),
}

#[derive(Args)]
struct GroupsArgs {
    /// Restrict to these layers
    #[arg(long = "layer")]
    layers: Vec<String>,
}

#[derive(Args)]
struct ReportArgs {
    text: String,
}

#[derive(Args)]
struct NumberArgs {
    number: f64,
}

#[derive(Args)]
struct PrimesArgs {
    /// Restrict to these layers
    #[arg(long = "layer")]
    layers: Vec<String>,

    /// Ignore primes below 10
    #[arg(long)]
    skip_single_digit: bool,
}

#[derive(Args)]
struct ViewArgs {
    /// View state file (JSON)
    #[arg(long, conflicts_with = "state_json")]
    state: Option<PathBuf>,

    /// Inline view state (JSON)
    #[arg(long)]
    state_json: Option<String>,
}

#[derive(Args)]
struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(config).context("Failed to start engine")?;
    ingest(&mut engine, &cli)?;

    match &cli.command {
        Commands::Groups(args) => {
            let groups: Vec<_> = engine
                .groups()
                .iter()
                .filter(|g| args.layers.is_empty() || args.layers.contains(&g.layer))
                .cloned()
                .collect();
            emit(cli.json, &groups, || report::render_groups(&groups))?;
        }
        Commands::Report(args) => {
            let item = engine.item_report(&args.text)?;
            emit(cli.json, &item, || report::render_item_report(&item))?;
        }
        Commands::Number(args) => {
            let found = engine.number_report(args.number);
            emit(cli.json, &found, || report::render_number_report(&found))?;
        }
        Commands::Primes(args) => {
            let groups = engine.prime_connections(&args.layers, args.skip_single_digit)?;
            emit(cli.json, &groups, || report::render_primes(&groups))?;
        }
        Commands::Colors => {
            let families = engine.color_families();
            emit(cli.json, &families, || report::render_color_families(&families))?;
        }
        Commands::View(args) => {
            let state = read_view_state(args)?;
            let view = engine.query(&state);
            emit(cli.json, &view, || report::render_view(&view))?;
        }
        Commands::Export(args) => {
            let exported = engine.export();
            match &args.out {
                Some(path) => {
                    fs::write(path, &exported)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Exported {} items to {}", engine.registry().len(), path.display());
                }
                None => print_stdout(&exported)?,
            }
        }
    }

    Ok(())
}

fn ingest(engine: &mut Engine, cli: &Cli) -> Result<()> {
    let mut submissions: Vec<Submission> = Vec::new();

    for path in &cli.inputs {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?;
        let origin = origin_for(path);
        submissions.extend(engine.submit_many(tokenize_word_list(&text), &origin)?);
    }

    for entry in &cli.words {
        submissions.extend(engine.submit_many(tokenize_phrase_list(entry), MANUAL_ORIGIN)?);
    }

    if !submissions.is_empty() {
        let created = submissions.iter().filter(|s| s.created).count();
        let rejected = submissions.iter().filter(|s| !s.accepted).count();
        log::info!(
            "Ingested {} candidates: {created} new, {rejected} rejected, {} items total",
            submissions.len(),
            engine.registry().len()
        );
    }
    Ok(())
}

fn origin_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_view_state(args: &ViewArgs) -> Result<ViewState> {
    let raw = match (&args.state, &args.state_json) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read view state {}", path.display()))?,
        (None, Some(json)) => json.clone(),
        (None, None) => return Ok(ViewState::default()),
    };
    serde_json::from_str(&raw).context("Invalid view state")
}

fn emit<T: Serialize>(json: bool, value: &T, markdown: impl FnOnce() -> String) -> Result<()> {
    if json {
        let mut text = serde_json::to_string_pretty(value)?;
        text.push('\n');
        print_stdout(&text)
    } else {
        print_stdout(&markdown())
    }
}

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
