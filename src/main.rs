use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use landing_platform::config::FileConfig;
use landing_platform::geometry::GridPoint;
use landing_platform::platform::LandingZone;
use landing_platform::simulation::{
    LandingOutcome, Mode, Rocket, Summary, load_requests, simulate,
};

/// Ask a landing platform whether rockets may land where they intend to
///
/// Examples:
///   # Check two rockets against the default 5,5 -> 10,10 platform
///   landing-platform -p 5,5 -p 5,6
///
///   # Replay a request file concurrently on 8 threads
///   landing-platform -r rockets.txt --concurrent --threads 8
///
///   # Custom platform, JSON output
///   landing-platform --top-left 0,0 --bottom-right 100,100 -p 50,50 --json
#[derive(Parser, Debug)]
#[command(name = "landing-platform")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches landing-platform.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Top-left platform corner as x,y
    #[arg(long, allow_hyphen_values = true)]
    top_left: Option<GridPoint>,

    /// Bottom-right platform corner as x,y
    #[arg(long, allow_hyphen_values = true)]
    bottom_right: Option<GridPoint>,

    /// Landing position as x,y (repeatable, evaluated after the request file)
    #[arg(short = 'p', long = "position", allow_hyphen_values = true)]
    positions: Vec<GridPoint>,

    /// Request file, one rocket per line
    #[arg(short = 'r', long)]
    requests: Option<PathBuf>,

    /// Evaluate every rocket concurrently
    #[arg(long)]
    concurrent: bool,

    /// Worker threads for --concurrent
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    threads: Option<u16>,

    /// Print outcomes as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    outcomes: &'a [LandingOutcome],
    summary: Summary,
}

/// Effective run settings: CLI flag, then config file, then built-in default
#[derive(Debug)]
struct Settings {
    top_left: GridPoint,
    bottom_right: GridPoint,
    requests: Option<PathBuf>,
    mode: Mode,
    threads: Option<usize>,
    verbose: bool,
}

impl Settings {
    fn resolve(args: &Args, file_config: &FileConfig) -> Self {
        let top_left = args
            .top_left
            .clone()
            .unwrap_or_else(|| file_config.platform.top_left_point());
        let bottom_right = args
            .bottom_right
            .clone()
            .unwrap_or_else(|| file_config.platform.bottom_right_point());
        let requests = args.requests.clone().or(file_config.requests.clone());
        let mode = if args.concurrent || file_config.concurrent {
            Mode::Concurrent
        } else {
            Mode::Sequential
        };
        let threads = args.threads.map(usize::from).or(file_config.threads);
        let verbose = args.verbose || file_config.verbose;

        Self {
            top_left,
            bottom_right,
            requests,
            mode,
            threads,
            verbose,
        }
    }

    /// A thread count only sizes the pool for concurrent runs
    fn threads_ignored(&self) -> bool {
        self.threads.is_some() && self.mode == Mode::Sequential
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config_path, file_config, skipped) = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let config = FileConfig::from_path(config_path)?;
            (Some(config_path.clone()), config, Vec::new())
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        let search = FileConfig::load();
        match search.found {
            Some((path, config)) => (Some(path), config, search.skipped),
            None => (None, FileConfig::default(), search.skipped),
        }
    };

    let settings = Settings::resolve(&args, &file_config);
    init_logging(settings.verbose);

    for (path, err) in &skipped {
        log::warn!("Failed to parse config file {:?}: {}", path, err);
    }
    if let Some(path) = &config_path {
        log::info!("Loaded configuration from {:?}", path);
    }
    if settings.threads_ignored() {
        log::warn!(
            "Ignoring {} worker threads: requests run sequentially without --concurrent",
            settings.threads.unwrap_or_default()
        );
    }

    let Settings {
        top_left,
        bottom_right,
        requests,
        mode,
        threads,
        verbose,
    } = settings;

    let zone = LandingZone::new(top_left, bottom_right).context("Failed to set up platform")?;

    let mut rockets = match requests {
        Some(ref path) => load_requests(path)
            .with_context(|| format!("Failed to load landing requests from {:?}", path))?,
        None => Vec::new(),
    };
    let offset = rockets.len();
    rockets.extend(
        args.positions
            .iter()
            .enumerate()
            .map(|(i, p)| Rocket::new(format!("rocket-{}", offset + i + 1), Some(p.clone()))),
    );

    if rockets.is_empty() {
        bail!("No landing requests: pass --position/-p or --requests/-r");
    }

    if !args.json {
        println!("landing-platform - Landing Slot Checker");
        println!("=======================================");
        println!();
        println!(
            "Platform: {} -> {}",
            zone.top_left(),
            zone.bottom_right()
        );
        if verbose {
            println!("  Rockets: {}", rockets.len());
            println!("  Mode: {:?}", mode);
            if let Some(n) = threads {
                println!("  Threads: {}", n);
            }
        }
        println!();
    }

    let spinner = (!args.json).then(|| create_spinner("Evaluating landing requests..."));
    let start = Instant::now();

    let outcomes = match (mode, threads) {
        (Mode::Concurrent, Some(n)) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to build worker pool")?;
            pool.install(|| simulate(&zone, &rockets, mode))
        }
        _ => simulate(&zone, &rockets, mode),
    };
    let summary = Summary::from_outcomes(&outcomes);

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "Evaluated {} rockets [{:.3}s]",
            outcomes.len(),
            start.elapsed().as_secs_f32()
        ));
    }

    if args.json {
        let report = Report {
            outcomes: &outcomes,
            summary,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", json);
        return Ok(());
    }

    println!();
    for outcome in &outcomes {
        let position = outcome
            .position
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<12} {:>10}  {}", outcome.rocket, position, outcome.message());
    }
    println!();
    println!("{}", summary);

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
