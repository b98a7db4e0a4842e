use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use shapesnap::mirror::Axis;
use shapesnap::{analyze, compose_drawing, input, render, Analysis, ClassifierConfig};

#[derive(Parser)]
#[command(name = "shapesnap", about = "Classify hand-drawn polylines into geometric shapes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify every closed subpath of one or more coordinate tables
    Classify {
        /// Input CSV files (path_id, subpath_id, x, y)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// JSON preset with classifier thresholds
        #[arg(long)]
        config: Option<PathBuf>,

        /// Endpoint distance below which a subpath counts as closed
        #[arg(long)]
        closure_tolerance: Option<f64>,

        /// RDP tolerance used for corner counting
        #[arg(long)]
        simplify_tolerance: Option<f64>,

        /// Circularity above which a shape is a circle
        #[arg(long)]
        circularity: Option<f64>,

        /// Print results as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Directory for a stroked PNG of each input's classified shapes
        #[arg(long)]
        render_dir: Option<PathBuf>,
    },

    /// Render the non-overlapping hull overlay of a coordinate table
    Overlay {
        /// Input CSV file
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Canvas size in pixels
        #[arg(long, default_value = "800")]
        size: u32,
    },

    /// Complete an image by mirroring one half onto the other
    Mirror {
        /// Input image path (PNG, JPEG, BMP)
        input: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,

        /// "vertical" keeps the left half, "horizontal" the top half
        #[arg(long, default_value = "vertical")]
        axis: Axis,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Classify {
            inputs,
            config,
            closure_tolerance,
            simplify_tolerance,
            circularity,
            json,
            render_dir,
        } => {
            let mut config = match &config {
                Some(path) => ClassifierConfig::from_json_file(path)?,
                None => ClassifierConfig::default(),
            };
            if let Some(t) = closure_tolerance {
                config.closure_tolerance = t;
            }
            if let Some(t) = simplify_tolerance {
                config.simplify_tolerance = t;
            }
            if let Some(t) = circularity {
                config.circularity_threshold = t;
            }
            classify_files(&inputs, &config, json, render_dir.as_deref())?;
        }
        Command::Overlay {
            input,
            output,
            size,
        } => {
            let drawing = input::read_drawing(&input)?;
            let overlay = compose_drawing(&drawing);
            render::render_overlay(&drawing, &overlay, &output, size)?;
            eprintln!(
                "  Overlay     {} of {} subpaths kept",
                overlay.shapes.len(),
                drawing.subpath_count()
            );
            eprintln!("  \u{2713} {}", output.display());
        }
        Command::Mirror {
            input,
            output,
            axis,
        } => {
            shapesnap::mirror::complete_file(&input, &output, axis)?;
            eprintln!("  \u{2713} {}", output.display());
        }
    }

    Ok(())
}

/// Classify inputs in parallel; each file is independent.
fn classify_files(
    inputs: &[PathBuf],
    config: &ClassifierConfig,
    json: bool,
    render_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let results: Vec<Result<Analysis, shapesnap::ShapeError>> = inputs
        .par_iter()
        .map(|path| {
            let drawing = input::read_drawing(path)?;
            let analysis = analyze(&drawing, config);
            if let Some(dir) = render_dir {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                let out = dir.join(format!("{}_shapes.png", stem));
                render::render_classified(&drawing, &analysis, &out, 800)?;
            }
            Ok(analysis)
        })
        .collect();

    let mut reports = serde_json::Map::new();
    for (path, result) in inputs.iter().zip(results) {
        let analysis = result.map_err(|e| format!("{}: {}", path.display(), e))?;
        if json {
            reports.insert(path.display().to_string(), serde_json::to_value(&analysis)?);
            continue;
        }
        eprintln!();
        eprintln!("  {}", path.display());
        for shape in &analysis.shapes {
            let c = &shape.classification;
            eprintln!(
                "    {}.{}  {:<22} circularity={} corners={}",
                shape.path_index,
                shape.subpath_index,
                c.label,
                c.circularity.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v)),
                c.corners,
            );
        }
        eprintln!("  {}", analysis.counts);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
