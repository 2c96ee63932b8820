//! `tryon` -- run one virtual try-on from the command line.
//!
//! Reads a person photo and a garment photo, submits them to Kling AI,
//! waits for the result and writes it to `--output`.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default                   |
//! |--------------------|----------|---------------------------|
//! | `KLING_ACCESS_KEY` | yes      | --                        |
//! | `KLING_SECRET_KEY` | yes      | --                        |
//! | `KLING_BASE_URL`   | no       | `https://api.klingai.com` |
//! | `RUST_LOG`         | no       | `tryon_cli=info,tryon_kling=info` |

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tryon_core::types::{RgbImage, Seed, MAX_SEED};
use tryon_kling::{process_try_on, KlingClient, KlingConfig};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Photo of the person.
    #[arg(short, long)]
    person: PathBuf,

    /// Photo of the garment.
    #[arg(short, long)]
    garment: PathBuf,

    /// Where to write the result (format from extension).
    #[arg(short, long, default_value = "result.png")]
    output: PathBuf,

    /// Seed for the generator.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=MAX_SEED as i64))]
    seed: Seed,

    /// Draw a random seed instead of `--seed`.
    #[arg(long)]
    random_seed: bool,
}

fn load_rgb(path: &Path) -> anyhow::Result<RgbImage> {
    let img = image::open(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(img.to_rgb8())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tryon_cli=info,tryon_kling=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = KlingConfig::from_env().context("Kling configuration")?;
    tracing::info!(base_url = %config.base_url, "Starting try-on");
    let client = KlingClient::new(config).context("Kling configuration")?;

    let person = load_rgb(&args.person)?;
    let garment = load_rgb(&args.garment)?;

    let outcome = process_try_on(
        &client,
        Some(&person),
        Some(&garment),
        args.seed,
        args.random_seed,
    )
    .await;

    println!("Seed used: {}", outcome.seed);
    println!("Response: {}", outcome.message);

    match outcome.image {
        Some(image) => {
            image
                .save(&args.output)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            tracing::info!(output = %args.output.display(), "Saved try-on result");
            Ok(())
        }
        None => anyhow::bail!("{}", outcome.message),
    }
}
