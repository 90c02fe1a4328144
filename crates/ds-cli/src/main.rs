use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ds_core::{MassFunction, Selector, accumulate_all, accumulate_tree, export_json, import_json};
use ds_emotion::{AnalysisConfig, OutputFormat, analyze_file, write_report};

#[derive(Parser)]
#[command(name = "ds", about = "Dempster-Shafer evidence engine and voice-emotion analysis")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate emotions per window from acoustic CSV recordings
    Analyze {
        /// Recording(s) with speed, pitch and intensity columns
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// TOML file overriding window size, bin borders and delimiter
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for result files
        #[arg(long, default_value = "results")]
        out_dir: PathBuf,

        /// Result file format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },

    /// Combine mass functions stored as JSON with Dempster's rule
    Combine {
        /// Mass function files, all over the same domain
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the combined mass function here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Reduce pairwise as a balanced tree in parallel
        #[arg(long)]
        tree: bool,
    },

    /// Show mass, belief, plausibility and doubt of a stored mass function
    Measures {
        /// Mass function file
        file: PathBuf,

        /// Target subset: a symbol, a comma-separated list, or Omega.
        /// Defaults to every single symbol.
        #[arg(long = "target")]
        targets: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Analyze {
            files,
            config,
            out_dir,
            format,
        } => cmd_analyze(files, config.as_deref(), out_dir, (*format).into()),
        Commands::Combine {
            files,
            output,
            tree,
        } => cmd_combine(files, output.as_deref(), *tree),
        Commands::Measures { file, targets } => cmd_measures(file, targets),
    }
}

/// `--config`, then `DS_CONFIG`, then built-in defaults.
fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let from_env = std::env::var("DS_CONFIG").ok().map(PathBuf::from);
    let path = path.or(from_env.as_deref());
    AnalysisConfig::load_or_default(path).context("failed to load analysis config")
}

fn cmd_analyze(files: &[PathBuf], config: Option<&Path>, out_dir: &Path, format: OutputFormat) -> Result<()> {
    let config = load_config(config)?;

    for path in files {
        let report = analyze_file(path, &config)
            .with_context(|| format!("failed to analyze {}", path.display()))?;
        let written = write_report(&report, out_dir, format)
            .with_context(|| format!("failed to write results for {}", path.display()))?;
        println!(
            "analyzed {} → {} windows, {} skipped, {} rows → {}",
            path.display(),
            report.windows,
            report.skipped.len(),
            report.rows.len(),
            written.display()
        );
    }
    Ok(())
}

fn load_mass(path: &Path) -> Result<MassFunction> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json).with_context(|| format!("invalid mass function in {}", path.display()))
}

fn cmd_combine(files: &[PathBuf], output: Option<&Path>, tree: bool) -> Result<()> {
    let sources = files
        .iter()
        .map(|p| load_mass(p))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("combining {} sources (tree = {tree})", sources.len());

    let combined = if tree {
        accumulate_tree(&sources)
    } else {
        accumulate_all(&sources)
    }
    .context("failed to combine mass functions")?;

    let json = export_json(&combined).context("failed to serialize combined mass function")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("combined {} sources → {}", sources.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_measures(file: &Path, targets: &[String]) -> Result<()> {
    let mass = load_mass(file)?;

    let selectors: Vec<Selector> = if targets.is_empty() {
        mass.domain()
            .symbols()
            .iter()
            .map(|s| Selector::Atom(s.clone()))
            .collect()
    } else {
        targets.iter().map(|t| Selector::parse(t)).collect()
    };

    println!(
        "{:<24} {:>10} {:>10} {:>13} {:>10}",
        "target", "mass", "belief", "plausibility", "doubt"
    );
    for selector in &selectors {
        let label = selector.to_string();
        let mass_value = mass
            .get_measure(selector)
            .with_context(|| format!("invalid target '{label}'"))?;
        let belief = mass.get_belief(selector)?;
        let plausibility = mass.get_plausibility(selector)?;
        let doubt = mass.get_doubt(selector)?;
        println!("{label:<24} {mass_value:>10.6} {belief:>10.6} {plausibility:>13.6} {doubt:>10.6}");
    }
    Ok(())
}
