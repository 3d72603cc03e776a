//! Command-line interface for certifying, generating and inspecting levels

use crate::algorithm::compression::{CompressionPolicy, advance_by, max_offset};
use crate::algorithm::generator::{Difficulty, GeneratorConfig, LevelGenerator};
use crate::algorithm::solver::{Move, Solution, SolverConfig, solve};
use crate::game::level::Level;
use crate::game::modes::Mode;
use crate::io::configuration::{
    DEFAULT_DECOY_COUNT, DEFAULT_GRID_SIZE, DEFAULT_MAX_STATES, DEFAULT_NODE_COUNT, DEFAULT_SEED,
    DEFAULT_TIME_LIMIT_MS, GIF_FRAME_DELAY_MS,
};
use crate::io::error::{PuzzleError, Result};
use crate::io::image::{export_grid_as_png, export_solution_gif};
use crate::io::levels::{collect_level_files, level_file_name, load_level, save_level};
use crate::io::progress::ProgressManager;
use crate::io::visualization::{format_solution, grid_summary, render_grid};
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "tiletwist")]
#[command(
    author,
    version,
    about = "Certify, generate and inspect pipe-rotation puzzle levels"
)]
/// Command-line arguments for the level tooling
pub struct Cli {
    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// Actions offered by the command line
#[derive(Subcommand)]
pub enum Command {
    /// Certify level files, optionally repairing them
    Solve(SolveArgs),
    /// Generate certified levels
    Generate(GenerateArgs),
    /// Render a level, optionally previewing compression or exporting images
    Show(ShowArgs),
}

/// Arguments of `solve`
#[derive(Args)]
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct SolveArgs {
    /// Level file or directory of level files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Only certify levels of this mode; others are skipped
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Print every solution move and the grid after it
    #[arg(short, long)]
    pub verbose: bool,

    /// Repair already solved and under-budgeted levels
    #[arg(short, long)]
    pub fix: bool,

    /// Save repaired levels back to their files
    #[arg(short, long, requires = "fix")]
    pub write: bool,

    /// Suppress progress output; only failures are reported
    #[arg(short, long)]
    pub quiet: bool,

    /// Wall-clock limit per level, in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_TIME_LIMIT_MS)]
    pub time_limit_ms: u64,

    /// Maximum number of states explored per level
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    pub max_states: usize,
}

impl SolveArgs {
    /// Search limits built from the arguments
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            time_limit: Duration::from_millis(self.time_limit_ms),
            max_states: self.max_states,
            ..SolverConfig::default()
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments of `generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Number of columns
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub cols: usize,

    /// Number of rows
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub rows: usize,

    /// Number of goal nodes
    #[arg(short, long, default_value_t = DEFAULT_NODE_COUNT)]
    pub nodes: usize,

    /// Difficulty preset
    #[arg(short, long, value_enum, default_value_t = Difficulty::default())]
    pub difficulty: Difficulty,

    /// Rotatable tiles placed off the solution path
    #[arg(long, default_value_t = DEFAULT_DECOY_COUNT)]
    pub decoys: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of levels to generate
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Edges that close in during play
    #[arg(long, value_enum, default_value_t = CompressionPolicy::None)]
    pub compression: CompressionPolicy,

    /// Directory the level files are written to
    #[arg(short, long, default_value = "levels")]
    pub output: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl GenerateArgs {
    /// Generator parameters built from the arguments
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.cols, self.rows, self.nodes, self.difficulty)
            .with_decoys(self.decoys)
            .with_compression(self.compression)
    }
}

/// Arguments of `show`
#[derive(Args)]
pub struct ShowArgs {
    /// Level file to render
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Preview the grid after this many compression steps
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Compression policy to preview instead of the level's own
    #[arg(long, value_enum)]
    pub compression: Option<CompressionPolicy>,

    /// Also list a cheapest solution
    #[arg(long)]
    pub solution: bool,

    /// Export the rendered grid as a PNG image
    #[arg(long, value_name = "PATH")]
    pub png: Option<PathBuf>,

    /// Export an animated replay of the solution as a GIF
    #[arg(long, value_name = "PATH")]
    pub gif: Option<PathBuf>,
}

/// What certification made of one level
#[derive(Debug)]
pub enum LevelReport {
    /// The level is winnable as written
    Solved {
        /// The certified solution
        solution: Solution,
    },
    /// The level had a fixable defect and was repaired
    Repaired {
        /// The repaired level
        level: Box<Level>,
        /// The solution of the repaired level
        solution: Solution,
        /// The defect that was repaired
        defect: PuzzleError,
    },
    /// The level could not be certified
    Failed {
        /// Why certification failed
        error: PuzzleError,
    },
    /// The level belongs to a mode outside the run's filter
    Skipped {
        /// The level's own mode
        mode: Mode,
    },
}

impl LevelReport {
    /// Whether the level ends up winnable
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    const fn verdict(&self) -> &'static str {
        match self {
            Self::Solved { .. } => "solved",
            Self::Repaired { .. } => "repaired",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
        }
    }
}

/// Certify a level, repairing fixable defects when asked
///
/// With a mode filter, levels of any other mode are skipped untouched. A
/// Classic `NoSolution` is fixable too: certification only searches twice the
/// level's budget, while repair searches with the config's own budget.
pub fn check_level(
    level: &Level,
    mode: Option<Mode>,
    fix: bool,
    config: &SolverConfig,
) -> LevelReport {
    if mode.is_some_and(|wanted| wanted != level.mode) {
        return LevelReport::Skipped { mode: level.mode };
    }

    match level.certify(config) {
        Ok(solution) => LevelReport::Solved { solution },
        Err(defect) if fix && is_repairable(level, &defect) => match level.repair(config) {
            Ok((repaired, solution)) => LevelReport::Repaired {
                level: Box::new(repaired),
                solution,
                defect,
            },
            Err(error) => LevelReport::Failed { error },
        },
        Err(error) => LevelReport::Failed { error },
    }
}

fn is_repairable(level: &Level, defect: &PuzzleError) -> bool {
    defect.is_fixable()
        || (level.mode == Mode::Classic && matches!(defect, PuzzleError::NoSolution { .. }))
}

/// Outcome counts of a `solve` run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Levels certified as written
    pub solved: usize,
    /// Levels certified after repair
    pub repaired: usize,
    /// Levels that could not be certified
    pub failed: usize,
    /// Levels left out by the mode filter
    pub skipped: usize,
}

impl BatchSummary {
    /// Whether every level ended up winnable
    pub const fn all_solved(&self) -> bool {
        self.failed == 0
    }

    const fn record(&mut self, report: &LevelReport) {
        match report {
            LevelReport::Solved { .. } => self.solved += 1,
            LevelReport::Repaired { .. } => self.repaired += 1,
            LevelReport::Failed { .. } => self.failed += 1,
            LevelReport::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Orchestrates batch certification of level files with progress tracking
pub struct LevelProcessor {
    args: SolveArgs,
    progress_manager: Option<ProgressManager>,
}

impl LevelProcessor {
    /// Create a new level processor with the given arguments
    pub fn new(args: SolveArgs) -> Self {
        let progress_manager = args.should_show_progress().then(ProgressManager::new);

        Self {
            args,
            progress_manager,
        }
    }

    /// Certify every level named by the target
    ///
    /// Per-level failures are counted, not returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be listed.
    pub fn process(&mut self) -> Result<BatchSummary> {
        let files = collect_level_files(&self.args.target)?;
        let mut summary = BatchSummary::default();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            let report = self.process_file(file, index);
            summary.record(&report);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        self.print(&format!(
            "{} solved, {} repaired, {} failed, {} skipped",
            summary.solved, summary.repaired, summary.failed, summary.skipped
        ));
        Ok(summary)
    }

    fn process_file(&mut self, path: &Path, index: usize) -> LevelReport {
        let start_time = Instant::now();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_level(index, &name, "certifying");
        }

        let report = match load_level(path) {
            Ok(level) => {
                let mut report =
                    check_level(&level, self.args.mode, self.args.fix, &self.args.solver_config());
                let save_error = match &report {
                    LevelReport::Repaired { level: repaired, .. } if self.args.write => {
                        save_level(repaired, path).err()
                    }
                    _ => None,
                };
                if let Some(error) = save_error {
                    report = LevelReport::Failed { error };
                }
                self.describe(&name, &level, &report);
                report
            }
            Err(error) => {
                self.print_failure(&format!("✗ {name}: {error}"));
                LevelReport::Failed { error }
            }
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_level(index, report.verdict(), start_time.elapsed());
        }
        report
    }

    fn describe(&self, name: &str, level: &Level, report: &LevelReport) {
        match report {
            LevelReport::Solved { solution } => {
                self.print(&format!(
                    "✓ {name}: solvable in {}/{} quarter-turns ({} states)",
                    solution.total_turns, level.max_moves, solution.explored
                ));
                self.print_replay(level, &solution.moves);
            }
            LevelReport::Repaired {
                level: repaired,
                solution,
                defect,
            } => {
                self.print(&format!(
                    "~ {name}: repaired ({defect}); solvable in {}/{} quarter-turns",
                    solution.total_turns, repaired.max_moves
                ));
                self.print_replay(repaired, &solution.moves);
            }
            LevelReport::Failed { error } => self.print_failure(&format!("✗ {name}: {error}")),
            LevelReport::Skipped { mode } => {
                self.print(&format!("- {name}: skipped ({mode} mode)"));
            }
        }
    }

    fn print_replay(&self, level: &Level, moves: &[Move]) {
        if !self.args.verbose {
            return;
        }
        let Ok(mut grid) = level.grid() else {
            return;
        };

        let mut text = render_grid(&grid, &level.goals);
        for step in moves {
            let Ok(next) = grid.rotated(step.position, step.turns) else {
                break;
            };
            grid = next;
            let _ = write!(
                text,
                "rotate {} by {}\n{}",
                step.position,
                step.turns,
                render_grid(&grid, &level.goals)
            );
        }
        self.print(text.trim_end());
    }

    // Allow print for the per-level report
    #[allow(clippy::print_stdout)]
    fn print(&self, text: &str) {
        if self.args.quiet {
            return;
        }
        match self.progress_manager {
            Some(ref pm) => pm.suspend(|| println!("{text}")),
            None => println!("{text}"),
        }
    }

    // Allow print for user feedback on failed levels
    #[allow(clippy::print_stderr)]
    fn print_failure(&self, text: &str) {
        match self.progress_manager {
            Some(ref pm) => pm.suspend(|| eprintln!("{text}")),
            None => eprintln!("{text}"),
        }
    }
}

/// Orchestrates generation of a batch of levels with progress tracking
pub struct GenerateProcessor {
    args: GenerateArgs,
    progress_manager: Option<ProgressManager>,
}

impl GenerateProcessor {
    /// Create a new generate processor with the given arguments
    pub fn new(args: GenerateArgs) -> Self {
        let progress_manager = (!args.quiet).then(ProgressManager::new);

        Self {
            args,
            progress_manager,
        }
    }

    /// Generate and save the requested number of levels
    ///
    /// Returns the paths written, in generation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, a level cannot be
    /// generated, or a file cannot be written.
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let mut generator = LevelGenerator::new(self.args.generator_config(), self.args.seed)?;
        let mut written = Vec::with_capacity(self.args.count);

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.args.count);
        }

        for index in 0..self.args.count {
            let start_time = Instant::now();
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_level(index, &format!("level {}", index + 1), "generating");
            }

            let level = generator.generate()?;
            let path = self.args.output.join(level_file_name(&level));
            save_level(&level, &path)?;

            if let Some(ref mut pm) = self.progress_manager {
                pm.complete_level(
                    index,
                    &format!("{} quarter-turns", level.max_moves),
                    start_time.elapsed(),
                );
            }
            written.push(path);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        Ok(written)
    }
}

/// Render a level file as text, exporting images when asked
///
/// # Errors
///
/// Returns an error if the level cannot be loaded or is malformed, if a
/// solution is needed but cannot be found, or if an export fails.
pub fn show_level(args: &ShowArgs) -> Result<String> {
    let level = load_level(&args.file)?;
    let grid = level.validate()?;
    let policy = args.compression.unwrap_or(level.compression_direction);
    let step = advance_by(&grid, 0, args.offset, policy);

    let mut text = format!(
        "{} ({} mode, budget {} quarter-turns)\n{}\n",
        level.id,
        level.mode,
        level.max_moves,
        grid_summary(&step.grid)
    );
    if args.offset > 0 {
        let _ = writeln!(
            text,
            "walls at offset {}/{}, {} tiles crushed{}",
            step.offset,
            max_offset(grid.cols(), grid.rows()),
            step.newly_crushed.len(),
            if step.crushed_goal { ", a goal is crushed" } else { "" }
        );
    }
    text.push_str(&render_grid(&step.grid, &level.goals));

    let needs_solution = args.solution || args.gif.is_some();
    let moves = if needs_solution {
        match level.solution.clone() {
            Some(moves) => moves,
            None => {
                solve(&grid, &level.goals, &SolverConfig::default())
                    .into_result()?
                    .moves
            }
        }
    } else {
        Vec::new()
    };

    if args.solution {
        text.push_str(&format_solution(&moves));
    }
    if let Some(ref png) = args.png {
        export_grid_as_png(&step.grid, &level.goals, png)?;
    }
    if let Some(ref gif) = args.gif {
        export_solution_gif(&grid, &level.goals, &moves, gif, GIF_FRAME_DELAY_MS)?;
    }
    Ok(text)
}

/// Run a parsed command line
///
/// Returns whether every processed level ended up winnable.
///
/// # Errors
///
/// Returns an error if the command cannot run at all.
// Allow print for the rendered level
#[allow(clippy::print_stdout)]
pub fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Solve(args) => Ok(LevelProcessor::new(args).process()?.all_solved()),
        Command::Generate(args) => {
            let quiet = args.quiet;
            let written = GenerateProcessor::new(args).process()?;
            if !quiet {
                for path in written {
                    println!("{}", path.display());
                }
            }
            Ok(true)
        }
        Command::Show(args) => {
            print!("{}", show_level(&args)?);
            Ok(true)
        }
    }
}
