use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use flipsheet::{
    ByteSource, OutputFormat, PlaybackDescriptor, PostProcessFlags, TranscodeRequest,
};

#[derive(Parser, Debug)]
#[command(name = "flipsheet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an animated GIF into a spritesheet image.
    Convert(ConvertArgs),
    /// Sniff a source and print an animation summary as JSON.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input GIF: file path or http(s) URL.
    #[arg(long = "in")]
    input: String,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Lay frames out in a single horizontal strip instead of a near-square grid.
    #[arg(long)]
    strip: bool,

    /// Point-filtering hint, passed through to the attachment step.
    #[arg(long)]
    point_filtering: bool,

    /// Uncompressed-texture hint, passed through to the attachment step.
    #[arg(long)]
    uncompressed: bool,

    /// Write a playback-metadata JSON sidecar to this path.
    #[arg(long)]
    metadata: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input GIF: file path or http(s) URL.
    #[arg(long = "in")]
    input: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Jpeg => OutputFormat::Jpeg,
        }
    }
}

#[derive(serde::Serialize)]
struct ProbeReport {
    gif: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    /// Frames per 100 time-units after delay reduction.
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let source = ByteSource::parse(&args.input);
    let request = TranscodeRequest {
        square_layout: !args.strip,
        format: args.format.into(),
        post: PostProcessFlags {
            point_filtering: args.point_filtering,
            uncompressed: args.uncompressed,
        },
    };

    let result = flipsheet::transcode_source(&source, &request).map_err(|e| {
        if e.signals_fallback() {
            anyhow::anyhow!("'{}' is not an animated GIF ({e}); use a generic image tool", source)
        } else {
            e.into()
        }
    })?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &result.bytes)
        .with_context(|| format!("write spritesheet '{}'", args.out.display()))?;

    if let Some(metadata_path) = &args.metadata {
        let descriptor = PlaybackDescriptor::new(&result, request.post);
        let f = std::fs::File::create(metadata_path)
            .with_context(|| format!("create metadata '{}'", metadata_path.display()))?;
        serde_json::to_writer_pretty(f, &descriptor).with_context(|| "write metadata JSON")?;
        eprintln!("wrote {}", metadata_path.display());
    }

    eprintln!(
        "wrote {} ({} frames, {}x{} grid, rate {:.3})",
        args.out.display(),
        result.frame_count,
        result.layout.columns,
        result.layout.rows,
        result.rate
    );
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let source = ByteSource::parse(&args.input);
    let bytes = flipsheet::source::fetch(&source)?;

    let report = match probe_animation(&bytes) {
        Ok(report) => report,
        Err(e) if e.signals_fallback() => ProbeReport {
            gif: false,
            frames: None,
            width: None,
            height: None,
            rate: None,
        },
        Err(e) => return Err(e.into()),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Sniff, decode, and reduce without compositing or encoding.
fn probe_animation(bytes: &[u8]) -> flipsheet::FlipsheetResult<ProbeReport> {
    flipsheet::sniff::require_gif(bytes)?;
    let anim = flipsheet::decode_gif(bytes)?;
    let rate = flipsheet::reduce_rate(&anim.delays_cs())?;

    Ok(ProbeReport {
        gif: true,
        frames: Some(anim.frame_count()),
        width: Some(anim.frame_width),
        height: Some(anim.frame_height),
        rate: Some(rate),
    })
}
