use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use wavyte_surface::{
    DecodeOpts, DirFileSource, RendererRegistry, SnapshotBackend, Surface, apply_ops,
    decode_surface, parse_ops,
};

#[derive(Parser, Debug)]
#[command(name = "wavyte-surface", version)]
struct Cli {
    /// Log decode and surface activity to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a PNG or JPEG and write it back out as PNG.
    Decode(DecodeArgs),
    /// Decode an image, apply a JSON list of surface operations, write the result as PNG.
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Input PNG or JPEG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Reject images with more pixels than this.
    #[arg(long)]
    max_pixels: Option<u64>,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input PNG or JPEG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON array of operations.
    #[arg(long)]
    ops: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Decode(args) => cmd_decode(args),
        Command::Apply(args) => cmd_apply(args),
    }
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let mut opts = DecodeOpts::default();
    if let Some(max) = args.max_pixels {
        opts.max_pixels = max;
    }
    let (registry, snapshot) = snapshot_registry()?;
    let surface = load(&registry, &args.in_path, &opts)?;
    write_presented(surface, &snapshot, &args.out)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.ops)
        .with_context(|| format!("read ops '{}'", args.ops.display()))?;
    let ops = parse_ops(&json)?;

    let (registry, snapshot) = snapshot_registry()?;
    let surface = load(&registry, &args.in_path, &DecodeOpts::default())?;
    let surface = apply_ops(surface, &ops)?
        .context("crop region lies entirely outside the image; nothing to write")?;
    write_presented(surface, &snapshot, &args.out)
}

fn snapshot_registry() -> anyhow::Result<(RendererRegistry, Arc<SnapshotBackend>)> {
    let registry = RendererRegistry::new();
    let snapshot = Arc::new(SnapshotBackend::default());
    registry.register(snapshot.clone())?;
    Ok((registry, snapshot))
}

fn load(registry: &RendererRegistry, path: &Path, opts: &DecodeOpts) -> anyhow::Result<Surface> {
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("input path '{}' has no usable file name", path.display()))?;
    let files = DirFileSource::new(root);
    decode_surface(registry, &files, name, opts)
        .with_context(|| format!("decode '{}'", path.display()))
}

fn write_presented(
    mut surface: Surface,
    snapshot: &SnapshotBackend,
    out: &Path,
) -> anyhow::Result<()> {
    surface.present()?;
    surface.free();
    let frame = snapshot
        .take_frame()
        .context("backend kept no frame after present")?;
    let img = frame
        .into_rgba_image()
        .context("presented frame has inconsistent geometry")?;

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
