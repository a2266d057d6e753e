// Transit Light-Curve Generator CLI
//
// Synthesizes a mock light curve (or reloads a previously exported one) and
// writes the JSON document plus an SVG chart to the output directory.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use transit_light_curve::{
    generate, render_svg, ChartConfig, NoiseParams, Sample, SeriesStats, TransitParams,
};

/// CLI arguments for the light-curve generator
#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Generate synthetic transit light curves and render them as SVG", long_about = None)]
struct Args {
    /// Preset name (e.g., "hot-jupiter", "super-earth", "shallow")
    #[arg(short, long, default_value = "hot-jupiter")]
    preset: String,

    /// Override: total observation span in days
    #[arg(long)]
    total_days: Option<f64>,

    /// Override: number of sampling intervals (emits this many + 1 points)
    #[arg(long)]
    samples: Option<usize>,

    /// Override: transit recurrence interval in days
    #[arg(long)]
    period: Option<f64>,

    /// Override: ephemeris phase offset in days
    #[arg(long)]
    t0: Option<f64>,

    /// Override: fractional flux drop at full transit
    #[arg(long)]
    depth: Option<f64>,

    /// Override: total transit width in days
    #[arg(long)]
    duration: Option<f64>,

    /// Override: ingress/egress ramp width in days
    #[arg(long)]
    ingress_width: Option<f64>,

    /// Random seed for the noise realization
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Disable all noise sources (clean transit curve)
    #[arg(long, default_value_t = false)]
    quiet_noise: bool,

    /// Chart a previously exported light_curve.json instead of generating
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for generated artifacts
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Draw a marker at every sample on top of the line
    #[arg(long, default_value_t = false)]
    show_points: bool,

    /// Chart title
    #[arg(long)]
    title: Option<String>,
}

/// Exported light-curve document: generation metadata plus the samples.
/// The charting path reads the same schema back, so externally produced
/// series can be rendered by pointing --input at a compatible file.
#[derive(Debug, Serialize, Deserialize)]
struct LightCurveDoc {
    preset: String,
    seed: u64,
    total_days: f64,
    samples: usize,
    period: f64,
    t0: f64,
    depth: f64,
    duration: f64,
    ingress_width: f64,
    points: Vec<Sample>,
}

/// Parse the transit parameters from the preset name
///
/// Depths span the interesting range: a hot Jupiter is obvious by eye, a
/// super-Earth sits near the noise floor, "shallow" is only recoverable by
/// folding many periods.
fn parse_preset(preset: &str) -> Result<TransitParams, String> {
    let params = match preset {
        "hot-jupiter" => TransitParams::new(7.0, 700, 2.0, 1.1, 0.0065, 0.14, 0.06),
        "super-earth" => TransitParams::new(12.0, 1200, 3.5, 0.8, 0.0012, 0.22, 0.08),
        "shallow" => TransitParams::new(14.0, 1400, 2.6, 0.4, 0.0008, 0.18, 0.07),
        _ => {
            return Err(format!(
                "Invalid preset: '{}'. Must be one of: hot-jupiter, super-earth, shallow",
                preset
            ))
        }
    };
    params.map_err(|e| e.to_string())
}

/// Apply per-field CLI overrides on top of the preset, re-validating the
/// combined parameter set
fn apply_overrides(base: TransitParams, args: &Args) -> Result<TransitParams, String> {
    TransitParams::new(
        args.total_days.unwrap_or(base.total_days),
        args.samples.unwrap_or(base.samples),
        args.period.unwrap_or(base.period),
        args.t0.unwrap_or(base.t0),
        args.depth.unwrap_or(base.depth),
        args.duration.unwrap_or(base.duration),
        args.ingress_width.unwrap_or(base.ingress_width),
    )
    .map_err(|e| e.to_string())
}

/// Window half-width for the minima scan: 1.5x the transit duration in
/// samples, clamped to something sensible for very coarse series
fn minima_window(params: &TransitParams) -> usize {
    ((1.5 * params.duration / params.dt()).round() as usize).max(3)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("\n🔭 Transit Light-Curve Generator");
    println!("================================");

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓▒░ "),
    );

    let (doc, window) = match &args.input {
        Some(path) => {
            pb.set_message(format!("Loading series from {}...", path.display()));
            let doc: LightCurveDoc = serde_json::from_str(&fs::read_to_string(path)?)?;
            println!("  Source: {}", path.display());
            println!("  Preset: {} (seed {})", doc.preset, doc.seed);
            println!("  Points: {}", doc.points.len());
            println!("================================\n");
            pb.inc(1);

            // Window heuristic still needs the recorded geometry
            let params = TransitParams::new(
                doc.total_days,
                doc.samples,
                doc.period,
                doc.t0,
                doc.depth,
                doc.duration,
                doc.ingress_width,
            )?;
            let window = minima_window(&params);
            (doc, window)
        }
        None => {
            let params = apply_overrides(parse_preset(&args.preset)?, &args)?;
            let noise = if args.quiet_noise {
                NoiseParams::quiet()
            } else {
                NoiseParams::default()
            };

            println!("  Preset: {} (seed {})", args.preset, args.seed);
            println!(
                "  Window: {} d, {} samples (dt = {:.5} d)",
                params.total_days,
                params.samples + 1,
                params.dt()
            );
            println!(
                "  Transit: P = {} d, depth = {}, duration = {} d",
                params.period, params.depth, params.duration
            );
            println!("================================\n");

            pb.set_message("Generating synthetic series...");
            let points = generate(&params, &noise, args.seed);
            pb.inc(1);

            let doc = LightCurveDoc {
                preset: args.preset.clone(),
                seed: args.seed,
                total_days: params.total_days,
                samples: params.samples,
                period: params.period,
                t0: params.t0,
                depth: params.depth,
                duration: params.duration,
                ingress_width: params.ingress_width,
                points,
            };
            (doc, minima_window(&params))
        }
    };

    pb.set_message(format!("Computing statistics ({} points)...", doc.points.len()));
    let stats = SeriesStats::from_samples(&doc.points, window);
    pb.inc(1);

    pb.set_message("Rendering SVG chart...");
    let config = ChartConfig {
        show_points: args.show_points,
        title: args
            .title
            .clone()
            .unwrap_or_else(|| format!("Transit Light Curve ({})", doc.preset)),
        ..ChartConfig::default()
    };
    let svg = render_svg(&doc.points, &config);
    pb.inc(1);

    pb.set_message("Writing artifacts...");
    fs::create_dir_all(&args.output)?;
    let json_path = args.output.join("light_curve.json");
    let svg_path = args.output.join("light_curve.svg");
    fs::write(&json_path, serde_json::to_string_pretty(&doc)?)?;
    fs::write(&svg_path, &svg)?;
    pb.inc(1);

    pb.finish_with_message("✓ Generation complete");

    println!("\n📊 Summary:");
    println!("  {}", stats.report());
    if !stats.minima.is_empty() {
        let times: Vec<String> = stats
            .minima
            .iter()
            .map(|(t, f)| format!("t={:.2} (flux {:.4})", t, f))
            .collect();
        println!("  Detected dips: {}", times.join(", "));
    }

    println!("\n✨ Artifacts written!");
    println!("📄 {}", json_path.display());
    println!("📈 {}\n", svg_path.display());

    Ok(())
}
