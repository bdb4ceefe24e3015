//! Command-line interface implementation

use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, CycleConfig};
use crate::gif::{GifSink, PlaybackOptions};
use crate::group::ColorGroup;
use crate::orchestrator::CycleOrchestrator;
use crate::output::resolve_output_path;
use crate::prompt::collect_groups;
use crate::source::{is_png_file, load_source};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Colorcycle - create a color cycling GIF animation from a PNG image
#[derive(Parser, Debug)]
#[command(name = "colorcycle")]
#[command(about = "Colorcycle - create a color cycling GIF animation from a PNG image")]
#[command(version)]
pub struct Cli {
    /// Input PNG file
    pub input: PathBuf,

    /// Output GIF file or directory.
    /// If omitted: {input}_animated.gif
    /// If directory (ends with /): dir/{input}_animated.gif
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frame duration in milliseconds (default: 100)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: Option<u32>,

    /// Number of loops, 0 for infinite (default: 0)
    #[arg(short = 'l', long = "loop")]
    pub loop_count: Option<u16>,

    /// Comma-separated hex colors forming one cycle group; repeat for more
    /// groups. If no groups are given here or in the config, they are read
    /// from stdin.
    #[arg(short, long = "group", value_name = "COLORS")]
    pub groups: Vec<String>,

    /// Path to a colorcycle.toml file (default: search upward from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of parallel jobs (default: number of CPUs)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Encode frames as they are rendered instead of buffering the whole cycle
    #[arg(long)]
    pub stream: bool,

    /// Strict mode: treat duplicate-color warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Config overrides carried by the command line.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            groups: self
                .groups
                .iter()
                .map(|g| g.split(',').map(|c| c.trim().to_string()).filter(|c| !c.is_empty()).collect())
                .collect(),
            duration: self.duration,
            loop_count: self.loop_count,
            jobs: self.jobs.map(|j| j as usize),
            stream: self.stream.then_some(true),
            strict: self.strict.then_some(true),
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run_cycle(&cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Execute a full run: gather groups, generate frames, write the GIF.
fn run_cycle(cli: &Cli) -> ExitCode {
    let input = cli.input.as_path();

    if !input.exists() {
        eprintln!("Error: Input file not found: {}", input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if !is_png_file(input) {
        eprintln!("Error: Input file must be a PNG file: {}", input.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    merge_cli_overrides(&mut config, &cli.overrides());

    println!("Processing image: {}", input.display());

    let groups = match gather_groups(&config) {
        Ok(groups) => groups,
        Err(code) => return code,
    };

    print_groups(&groups);

    let mut orchestrator = match CycleOrchestrator::new(groups) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Some(jobs) = config.render.jobs {
        orchestrator = orchestrator.with_jobs(jobs);
    }

    for warning in orchestrator.warnings() {
        eprintln!("Warning: {}", warning);
    }
    if config.render.strict && !orchestrator.warnings().is_empty() {
        eprintln!("Error: duplicate colors are not allowed in strict mode");
        return ExitCode::from(EXIT_ERROR);
    }

    let source = match load_source(input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if source.was_converted() {
        println!("Converting image from {:?} to RGB.", source.original_color);
    }
    if source.had_alpha {
        eprintln!("Warning: {} has an alpha channel; transparency will be lost", input.display());
    }

    let output = resolve_output_path(input, cli.output.as_deref());
    let playback = config.animation.playback();

    println!("Generating {} frames...", orchestrator.frame_count());

    let result = if config.render.stream {
        write_streaming(&orchestrator, &source.image, &playback, &output)
    } else {
        write_buffered(&orchestrator, &source.image, &playback, &output)
    };

    match result {
        Ok(frames) => {
            println!("Saved {} frames to {}", frames, output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(failure) => {
            // Only remove a file this run opened; anything already there is kept
            if failure.output_opened {
                let _ = std::fs::remove_file(&output);
            }
            eprintln!("Error: {}", failure.message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Resolve groups from the merged config, falling back to stdin.
fn gather_groups(config: &CycleConfig) -> Result<Vec<ColorGroup>, ExitCode> {
    if !config.groups.is_empty() {
        return config.color_groups().map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        });
    }

    let stdin = io::stdin();
    let result = if atty::is(atty::Stream::Stdin) {
        collect_groups(stdin.lock(), io::stdout(), io::stderr())
    } else {
        log::info!("reading color groups from stdin");
        collect_groups(stdin.lock(), io::sink(), io::stderr())
    };

    result.map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

fn print_groups(groups: &[ColorGroup]) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "--- Target Color Groups ---");
    for (i, group) in groups.iter().enumerate() {
        let _ = writeln!(out, "Group {}: {}", i + 1, group.to_hex_list());
    }
    let _ = writeln!(out, "---------------------------");
}

/// A failed write and whether the output file had already been opened.
#[derive(Debug)]
struct WriteFailure {
    message: String,
    output_opened: bool,
}

impl WriteFailure {
    fn before_open(message: impl ToString) -> Self {
        Self { message: message.to_string(), output_opened: false }
    }

    fn after_open(message: impl ToString) -> Self {
        Self { message: message.to_string(), output_opened: true }
    }
}

fn write_buffered(
    orchestrator: &CycleOrchestrator,
    source: &image::RgbImage,
    playback: &PlaybackOptions,
    output: &Path,
) -> Result<usize, WriteFailure> {
    let frames = orchestrator.generate(source).map_err(WriteFailure::before_open)?;

    let mut sink = GifSink::create(output, playback)
        .map_err(|e| WriteFailure::before_open(format!("saving GIF: {}", e)))?;
    for frame in &frames {
        sink.push(frame).map_err(|e| WriteFailure::after_open(format!("saving GIF: {}", e)))?;
    }
    Ok(sink.frames_written())
}

fn write_streaming(
    orchestrator: &CycleOrchestrator,
    source: &image::RgbImage,
    playback: &PlaybackOptions,
    output: &Path,
) -> Result<usize, WriteFailure> {
    let mut sink = GifSink::create(output, playback)
        .map_err(|e| WriteFailure::before_open(format!("saving GIF: {}", e)))?;
    orchestrator
        .stream(source, |_, frame| sink.push(&frame))
        .map_err(WriteFailure::after_open)
}
