use clap::{Parser, Subcommand};
use image_resizer::config::{self, BoundsConfig, ConfigFile, Preset};
use image_resizer::imaging::RustBackend;
use image_resizer::resizer::ResizeOutcome;
use image_resizer::{
    OptionKey, ResizeError, ResizeStrategy, Resizer, ScaleFilter, Transformation, logger, output,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-resizer")]
#[command(about = "Resize GIF, JPEG and PNG images within configured bounds")]
#[command(long_about = "\
Resize GIF, JPEG and PNG images within configured bounds

Every input (width, height, ratio, quality, filter, paths) is validated
against the active bounds before any pixels are read. Bounds come from a
preset, optionally refined by a config file:

  preset = \"safe\"
  [bounds]
  maxWidth = 4000

Strategies:
  proportional   scale both edges by --ratio
  fixed          exact --width x --height, aspect ratio ignored
  fixed_width    --width, height follows the aspect ratio
  fixed_height   --height, width follows the aspect ratio

Without --output the result is written next to the source as
resized-<name>. Run 'image-resizer gen-config' for a documented config file.")]
#[command(version)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base preset; replaces the config file's preset
    #[arg(long, global = true)]
    preset: Option<Preset>,

    /// Parallel jobs for multiple sources (capped at the core count)
    #[arg(long, global = true)]
    jobs: Option<usize>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Source images
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Target file (single source only)
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, default_value = "proportional")]
    strategy: ResizeStrategy,

    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    ratio: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Request interlaced output
    #[arg(long)]
    interlace: bool,

    /// nearest, bilinear, bicubic or bicubic-fixed
    #[arg(long)]
    filter: Option<ScaleFilter>,

    /// Print outcomes as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resize one or more images
    Resize(ResizeArgs),
    /// Print every preset's normalized bounds
    Presets,
    /// Print a stock config file with all keys documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Command::Resize(ref args) => {
            let config = resolve_config(&cli)?;
            let resizer = build_resizer(config, args)?;
            let results = run_resize(&resizer, args, cli.jobs)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&results_json(&results))?);
            } else {
                output::print_resize_results(&results);
            }
            if results.iter().any(|(_, r)| r.is_err()) {
                std::process::exit(1);
            }
        }
        Command::Presets => output::print_presets(),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Config file (if any) with the `--preset` override applied.
fn resolve_config(cli: &Cli) -> Result<BoundsConfig, config::ConfigError> {
    let mut file = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => ConfigFile::default(),
    };
    if cli.preset.is_some() {
        file.preset = cli.preset;
    }
    let config = file.into_config();
    tracing::debug!(?config, "effective bounds");
    Ok(config)
}

fn build_resizer(config: BoundsConfig, args: &ResizeArgs) -> Result<Resizer, ResizeError> {
    let mut resizer = Resizer::new(config, RustBackend::new());
    resizer.set_strategy(args.strategy);
    if let Some(width) = args.width {
        resizer.set_transformation(Transformation::SetWidth, width)?;
    }
    if let Some(height) = args.height {
        resizer.set_transformation(Transformation::SetHeight, height)?;
    }
    if let Some(ratio) = args.ratio {
        resizer.set_transformation(Transformation::SetRatio, ratio)?;
    }
    if let Some(quality) = args.quality {
        resizer.set_option(OptionKey::Quality, quality)?;
    }
    if args.interlace {
        resizer.set_option(OptionKey::Interlace, true)?;
    }
    if let Some(filter) = args.filter {
        resizer.set_option(OptionKey::ScaleMode, filter.code())?;
    }
    Ok(resizer)
}

type Results = Vec<(PathBuf, Result<ResizeOutcome, ResizeError>)>;

fn run_resize(
    resizer: &Resizer,
    args: &ResizeArgs,
    jobs: Option<usize>,
) -> Result<Results, Box<dyn std::error::Error>> {
    if let Some(target) = &args.output {
        if args.sources.len() != 1 {
            return Err("--output needs exactly one source".into());
        }
        let source = args.sources[0].clone();
        let result = resizer.resize(&source, Some(target));
        return Ok(vec![(source, result)]);
    }

    init_thread_pool(jobs);
    Ok(resizer.resize_all(&args.sources))
}

fn results_json(results: &Results) -> Vec<serde_json::Value> {
    results
        .iter()
        .map(|(source, result)| match result {
            Ok(outcome) => serde_json::json!({ "ok": outcome }),
            Err(e) => serde_json::json!({
                "source": source,
                "error": e.to_string(),
            }),
        })
        .collect()
}

/// Initialize the rayon thread pool.
///
/// Thread count comes from [`config::effective_threads`].
fn init_thread_pool(jobs: Option<usize>) {
    let threads = config::effective_threads(jobs);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
