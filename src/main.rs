use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn, Level};

use retro_darkroom::{
    config::Config,
    filters::{FilterParameters, FilterRegistry},
    session::codec,
};

#[derive(Parser)]
#[command(
    name = "retro-darkroom",
    version,
    about = "Apply photo filters, including a tunable vintage film look",
    long_about = "Retro-Darkroom applies classic photo filters to an image. The vintage_film filter combines warm color temperature, film grain, vignetting and soft contrast, each adjustable."
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available filters
    List,

    /// Apply a filter to an image
    Apply {
        /// Input image (JPEG or PNG)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path; the extension picks the format
        #[arg(short, long)]
        output: PathBuf,

        /// Filter to apply (see `list`)
        #[arg(short, long, default_value = "vintage_film")]
        filter: String,

        /// Vintage color temperature (0.6-1.4)
        #[arg(long)]
        warmth: Option<f64>,

        /// Vintage grain intensity (0.0-3.0)
        #[arg(long)]
        grain: Option<f64>,

        /// Vintage vignette strength (0.0-3.0)
        #[arg(long)]
        vignette: Option<f64>,

        /// Vintage contrast (0.6-1.4)
        #[arg(long)]
        contrast: Option<f64>,

        /// Seed the grain for a reproducible result
        #[arg(long)]
        seed: Option<u64>,

        /// Configuration file (optional)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let registry = FilterRegistry::new();

    match cli.command {
        Command::List => {
            for spec in registry.list_filters() {
                println!("{:<14} {}", spec.key(), spec.label);
                for param in spec.parameters {
                    println!("    --{:<10} {}-{}  {}", param.name, param.min, param.max, param.description);
                }
            }
        }
        Command::Apply { input, output, filter, warmth, grain, vignette, contrast, seed, config } => {
            info!("Starting Retro-Darkroom v{}", env!("CARGO_PKG_VERSION"));

            let config = match config {
                Some(path) => {
                    info!("Loading configuration from {:?}", path);
                    Config::from_file(&path)?
                }
                None => Config::default(),
            };
            config.validate()?;

            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(config.processing.threads)
                .build_global()
            {
                warn!("Could not size the worker pool: {}", e);
            }

            let bytes = std::fs::read(&input).with_context(|| format!("reading {:?}", input))?;
            let original = codec::decode_upload(&bytes, config.upload.max_dimension)?;
            info!("Loaded {:?} ({}x{})", input, original.width(), original.height());

            if !registry.has_filter(&filter) {
                warn!("Unknown filter '{}', the image will be written unchanged", filter);
            }

            let defaults = config.vintage;
            let params = FilterParameters::new(
                warmth.unwrap_or(defaults.warmth),
                grain.unwrap_or(defaults.grain),
                vignette.unwrap_or(defaults.vignette),
                contrast.unwrap_or(defaults.contrast),
            );

            let result = match seed {
                Some(seed) => registry.apply_params(&filter, &original, &params, &mut StdRng::seed_from_u64(seed)),
                None => registry.apply_params(&filter, &original, &params, &mut rand::thread_rng()),
            };

            let is_jpeg = output
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
                .unwrap_or(false);

            if is_jpeg {
                let jpeg = codec::encode_jpeg(&result.image, config.upload.jpeg_quality)?;
                std::fs::write(&output, jpeg).with_context(|| format!("writing {:?}", output))?;
            } else {
                result
                    .image
                    .save(&output)
                    .with_context(|| format!("writing {:?}", output))?;
            }
            info!("🎞️  Applied '{}'. Output saved to: {:?}", result.filter_id, output);
        }
    }

    Ok(())
}
