use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "trailfx", version, about = "Apply a directional trail effect to an image")]
struct Cli {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(long)]
    out: PathBuf,

    /// Trail length in pixels (1-500).
    #[arg(long, default_value_t = 25)]
    distance: u32,

    /// Pixels between trail samples (1-100).
    #[arg(long, default_value_t = 1)]
    spacing: u32,

    /// Direction of travel in degrees (0-360, counter-clockwise, 0 points right).
    #[arg(long, default_value_t = 0.0)]
    direction: f64,

    /// Disable fading samples toward the end of the trail.
    #[arg(long)]
    no_fade: bool,

    /// Use nearest-pixel sampling instead of bilinear.
    #[arg(long)]
    no_bilinear: bool,

    /// Render row bands in parallel.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Rows per band.
    #[arg(long, default_value_t = 64)]
    band_rows: u32,

    /// Print the resolved trail geometry as JSON.
    #[arg(long)]
    print_geometry: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = trailfx::TrailConfig::new(
        cli.distance,
        cli.spacing,
        cli.direction,
        !cli.no_fade,
        !cli.no_bilinear,
    )?;

    if cli.print_geometry {
        let geometry = trailfx::resolve(&cfg);
        let json = serde_json::json!({ "config": cfg, "geometry": geometry });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("serialize geometry")?
        );
    }

    let src = trailfx::io::load_surface(&cli.in_path)
        .with_context(|| format!("load input '{}'", cli.in_path.display()))?;

    let threading = trailfx::RenderThreading {
        parallel: cli.parallel,
        band_rows: cli.band_rows,
        threads: cli.threads,
    };
    let (dst, report) = trailfx::apply_trail(&cfg, &src, &threading, &trailfx::NeverCancel)?;
    tracing::info!(stats = ?report.stats, "rendered");

    trailfx::io::save_surface(&dst, &cli.out)
        .with_context(|| format!("write output '{}'", cli.out.display()))?;
    Ok(())
}
