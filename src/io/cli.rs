//! Command-line interface for generating, packing and validating levels

use crate::algorithm::deadlock::{Deadlock, analyze};
use crate::algorithm::executor::{GeneratorConfig, LevelGenerator};
use crate::algorithm::pack::PackBuilder;
use crate::algorithm::verifier;
use crate::analysis::difficulty::Difficulty;
use crate::analysis::statistics::LayoutStatistics;
use crate::io::configuration::{
    DEFAULT_COLS, DEFAULT_MAX_ATTEMPTS, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_TILE_COUNT,
};
use crate::io::error::{Result, WithPath, invalid_layout};
use crate::io::progress::ProgressManager;
use crate::io::record::{LevelPack, LevelRecord, read_level, write_level, write_pack};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slidelock")]
#[command(
    author,
    version,
    about = "Generate and verify sliding-tile puzzle levels"
)]
/// Command-line arguments for the level tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Log generation decisions at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Log level requested on the command line; `RUST_LOG` still overrides it
    pub const fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate one solvable level as JSON
    Generate(GenerateArgs),
    /// Generate a level pack across difficulty tiers
    Pack(PackArgs),
    /// Check a level file for structure, deadlocks and solvability
    Validate(ValidateArgs),
}

/// Arguments for `generate`
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Board rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Board columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Tiles to place
    #[arg(short, long, default_value_t = DEFAULT_TILE_COUNT)]
    pub tiles: usize,

    /// Use a difficulty preset instead of explicit dimensions
    #[arg(short, long, value_enum, conflicts_with_all = ["rows", "cols", "tiles"])]
    pub difficulty: Option<Difficulty>,

    /// Whole-layout attempts before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Write the level here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    /// Generator configuration described by these arguments
    pub fn config(&self) -> GeneratorConfig {
        let base = self.difficulty.map_or_else(
            || GeneratorConfig::new(self.rows, self.cols, self.tiles),
            Difficulty::config,
        );
        base.with_max_attempts(self.attempts).with_seed(self.seed)
    }
}

/// Arguments for `pack`
#[derive(Args, Clone, Debug)]
pub struct PackArgs {
    /// Output file for the pack
    #[arg(value_name = "FILE")]
    pub output: PathBuf,

    /// Easy levels
    #[arg(long, default_value_t = 0)]
    pub easy: usize,

    /// Medium levels
    #[arg(long, default_value_t = 0)]
    pub medium: usize,

    /// Hard levels
    #[arg(long, default_value_t = 0)]
    pub hard: usize,

    /// Expert levels
    #[arg(long, default_value_t = 0)]
    pub expert: usize,

    /// Pack identifier
    #[arg(long, default_value = "pack")]
    pub id: String,

    /// Pack display name
    #[arg(long, default_value = "Level Pack")]
    pub name: String,

    /// Pack description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl PackArgs {
    /// Requested tiers and counts, easiest first
    pub const fn plan(&self) -> [(Difficulty, usize); 4] {
        [
            (Difficulty::Easy, self.easy),
            (Difficulty::Medium, self.medium),
            (Difficulty::Hard, self.hard),
            (Difficulty::Expert, self.expert),
        ]
    }
}

/// Arguments for `validate`
#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Level file to check
    #[arg(value_name = "FILE")]
    pub level: PathBuf,
}

/// Findings for one level file
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    /// Why the level is structurally broken, if it is
    pub structure_error: Option<String>,
    /// Deadlock findings from every detector
    pub deadlocks: Vec<Deadlock>,
    /// Whether some removal order clears the board
    pub solvable: bool,
    /// Layout measurements, present when the structure is sound
    pub statistics: Option<LayoutStatistics>,
}

impl ValidationReport {
    /// Whether the level passes every check
    pub const fn is_valid(&self) -> bool {
        self.structure_error.is_none() && self.deadlocks.is_empty() && self.solvable
    }

    /// The first failed check, worded for an error message
    pub fn failure(&self) -> Option<String> {
        if let Some(reason) = &self.structure_error {
            return Some(reason.clone());
        }
        if let Some(deadlock) = self.deadlocks.first() {
            return Some(deadlock.kind.to_string());
        }
        (!self.solvable).then(|| "no clearing order exists".to_string())
    }
}

/// Runs the selected subcommand
pub struct CommandProcessor {
    cli: Cli,
}

impl CommandProcessor {
    /// Create a processor for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if generation is exhausted, a file cannot be read or
    /// written, or a validated level is broken, deadlocked or unsolvable
    pub fn process(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => {
                let record = generate_level(args)?;
                if args.output.is_none() {
                    print_json(&record)?;
                }
                Ok(())
            }
            Command::Pack(args) => {
                let pack = generate_pack(args);
                write_pack(&args.output, &pack)?;
                Ok(())
            }
            Command::Validate(args) => {
                let report = validate_level(args)?;
                print_report(args, &report);
                match report.failure() {
                    None => Ok(()),
                    Some(reason) => Err(invalid_layout(format!(
                        "{} failed validation: {reason}",
                        args.level.display()
                    ))),
                }
            }
        }
    }
}

/// Generate one level and write it if an output file was given
///
/// # Errors
///
/// Returns `InvalidParameter`, `GenerationExhausted` or a write failure
pub fn generate_level(args: &GenerateArgs) -> Result<LevelRecord> {
    let mut generator = LevelGenerator::new(args.config())?;
    let generated = generator.generate()?;
    let record = LevelRecord::from_layout(&generated.layout);

    if let Some(path) = &args.output {
        write_level(path, &record)?;
    }
    Ok(record)
}

/// Generate a pack, showing progress unless quiet
pub fn generate_pack(args: &PackArgs) -> LevelPack {
    let mut builder = PackBuilder::new(args.seed);
    for (difficulty, count) in args.plan() {
        builder = builder.with_levels(difficulty, count);
    }

    let mut progress_manager = (!args.quiet).then(ProgressManager::new);
    if let Some(ref mut pm) = progress_manager {
        pm.initialize(builder.plan());
    }

    let pack = builder.build(&args.id, &args.name, &args.description, |difficulty, level| {
        if let Some(ref mut pm) = progress_manager {
            pm.complete_level(difficulty, level.is_some());
        }
    });

    if let Some(ref pm) = progress_manager {
        pm.finish();
    }
    pack
}

/// Read a level file and run every check on it
///
/// A structurally broken level is reported, not returned as an error.
///
/// # Errors
///
/// Returns `FileSystem` or `Serialization` if the file cannot be loaded
pub fn validate_level(args: &ValidateArgs) -> Result<ValidationReport> {
    let record = read_level(&args.level)?;

    let report = match record.into_layout() {
        Ok(layout) => ValidationReport {
            structure_error: None,
            deadlocks: analyze(&layout).findings,
            solvable: verifier::verify(&layout),
            statistics: Some(LayoutStatistics::from_layout(&layout)),
        },
        Err(error) => ValidationReport {
            structure_error: Some(error.to_string()),
            deadlocks: Vec::new(),
            solvable: false,
            statistics: None,
        },
    };
    Ok(report)
}

// Standard output is the command's result channel
#[allow(clippy::print_stdout)]
fn print_json(record: &LevelRecord) -> Result<()> {
    let text = serde_json::to_string_pretty(record).with_path(Path::new("<stdout>"), "encode")?;
    println!("{text}");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_report(args: &ValidateArgs, report: &ValidationReport) {
    println!("{}", args.level.display());

    if let Some(reason) = &report.structure_error {
        println!("  structure: {reason}");
        return;
    }
    println!("  structure: ok");

    if report.deadlocks.is_empty() {
        println!("  deadlocks: none");
    }
    for deadlock in &report.deadlocks {
        let ids: Vec<String> = deadlock.tiles.iter().map(ToString::to_string).collect();
        println!("  deadlock: {} ({})", deadlock.kind, ids.join(", "));
    }
    println!("  solvable: {}", if report.solvable { "yes" } else { "no" });

    if let Some(statistics) = &report.statistics {
        println!(
            "  tiles: {} ({:.0}% of cells), movable at start: {}",
            statistics.tile_count,
            statistics.density * 100.0,
            statistics.initially_movable
        );
        match statistics.clearing_waves {
            Some(waves) => println!("  clearing waves: {waves}"),
            None => println!("  clearing waves: jammed"),
        }
    }
}
