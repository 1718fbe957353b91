//! CLI binary for vlm-annotate.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `RenderConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vlm_annotate::{annotate_to_file, decode_boxes, decode_points, Mode, RecordSet, RenderConfig};

const AFTER_HELP: &str = r#"EXAMPLES:
  # Draw bounding boxes from a saved model reply
  vlm-annotate photo.png --mode boxes --text-file reply.txt -o photo.boxes.png

  # Pipe the reply in on stdin
  curl -s $MODEL_ENDPOINT | jq -r .text | vlm-annotate photo.png --mode points

  # Inline text, with labels rendered in a font of your choice
  vlm-annotate photo.png --mode points --font /usr/share/fonts/TTF/DejaVuSans.ttf \
      --text '[{"point_2d": [0.31, 0.42], "label": "left eye"}]'

  # Just show what would be drawn, as JSON (no image written)
  vlm-annotate photo.png --mode boxes --text-file reply.txt --json

RECORD FORMAT:
  Points   {"point_2d": [x, y], "label": "..."}
  Boxes    {"bbox_2d": [x_min, y_min, x_max, y_max], "label": "..."}

  Coordinates are fractions of the image size. The payload may be one
  object or an array, wrapped in ```json fences, single-quoted, or
  carrying trailing commas — the repairs are applied automatically.
  Records that stay malformed after repair are skipped silently.

ENVIRONMENT VARIABLES:
  VLM_ANNOTATE_FONT    Label font path (same as --font)
  RUST_LOG             Log filter, e.g. RUST_LOG=vlm_annotate=debug
"#;

/// Draw point and bounding-box annotations from VLM output onto an image.
#[derive(Parser, Debug)]
#[command(
    name = "vlm-annotate",
    version,
    about = "Draw point and bounding-box annotations from VLM output onto an image",
    long_about = "Extract point (point_2d) or bounding-box (bbox_2d) records from the loosely \
formatted JSON that Vision Language Models produce, and draw them as colored overlays on an \
image. Tolerates code fences, single quotes, trailing commas, and surrounding prose.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Image to annotate.
    image: PathBuf,

    /// Record kind to extract and draw.
    #[arg(short, long, value_enum)]
    mode: ModeArg,

    /// Annotation text inline. Mutually exclusive with --text-file.
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read annotation text from this file ("-" for stdin). Defaults to stdin.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Write the overlay to this file instead of <image>.annotated.png.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TrueType/OpenType font for label text. Labels are skipped without one.
    #[arg(long, env = "VLM_ANNOTATE_FONT")]
    font: Option<PathBuf>,

    /// Point marker radius in pixels.
    #[arg(long, default_value_t = 2)]
    point_radius: i32,

    /// Box outline thickness in pixels.
    #[arg(long, default_value_t = 2)]
    stroke_width: u32,

    /// Label text height in pixels.
    #[arg(long, default_value_t = 16.0)]
    font_size: f32,

    /// Print the extracted records as JSON to stdout; do not write an image.
    #[arg(long)]
    json: bool,

    /// Parse only and print a summary; do not write an image.
    #[arg(long, conflicts_with = "json")]
    dry_run: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Points,
    Boxes,
}

impl From<ModeArg> for Mode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Points => Mode::Points,
            ModeArg::Boxes => Mode::Boxes,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let text = read_text(&cli)?;
    let mode: Mode = cli.mode.into();

    // ── Parse-only modes ─────────────────────────────────────────────────
    if cli.json || cli.dry_run {
        let records = match mode {
            Mode::Points => {
                let (coords, labels) = decode_points(&text);
                RecordSet::Points { coords, labels }
            }
            Mode::Boxes => {
                let (coords, labels) = decode_boxes(&text);
                RecordSet::Boxes { coords, labels }
            }
        };

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&records).context("Failed to serialise records")?
            );
        } else if !cli.quiet {
            if records.is_empty() {
                eprintln!("No records found");
            } else {
                eprintln!("{} records:", records.len());
                for label in records.labels() {
                    eprintln!("  {label}");
                }
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = RenderConfig::builder()
        .point_radius(cli.point_radius)
        .stroke_width(cli.stroke_width)
        .font_size(cli.font_size);
    if let Some(ref font) = cli.font {
        builder = builder.font_path(font);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Annotate ─────────────────────────────────────────────────────────
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.image));

    let result = annotate_to_file(&cli.image, &text, mode, &output, &config)
        .context("Annotation failed")?;

    if !cli.quiet {
        if result.records.is_empty() {
            eprintln!(
                "No records found in the input text — wrote unchanged image to {}",
                output.display()
            );
        } else {
            eprintln!("{} records  →  {}", result.records.len(), output.display());
        }
    }

    Ok(())
}

/// Resolve the annotation text: --text, then --text-file, then stdin.
fn read_text(cli: &Cli) -> Result<String> {
    if let Some(ref text) = cli.text {
        return Ok(text.clone());
    }

    match cli.text_file {
        Some(ref path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read annotation text from {:?}", path)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read annotation text from stdin")?;
            Ok(buf)
        }
    }
}

/// `photo.png` → `photo.annotated.png`.
fn default_output(input: &PathBuf) -> PathBuf {
    input.with_extension("annotated.png")
}
