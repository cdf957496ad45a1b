use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use rand::SeedableRng;
use rand::rngs::StdRng;

use geolapse::{
    CompositeState, Compositor, DatasetKind, EngineConfig, FrameStore, GeoError, JsonDirLoader,
    ManualClock, OverlayKind, PixelBuffer, Presentation, TRANSITION_DURATION_MS,
    TransitionAnimator, Year,
};

#[derive(Parser, Debug)]
#[command(name = "geolapse", version)]
struct Cli {
    /// Log at DEBUG instead of WARN.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one composited frame as a PNG and print its statistics as JSON.
    Frame(FrameArgs),
    /// Render the progressive reveal between two years as a numbered PNG sequence.
    Transition(TransitionArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Directory holding `<dataset>/<year>.json` frames.
    #[arg(long)]
    data: PathBuf,

    /// Base dataset (`land_cover`, `precipitation`, `vegetation`, `population`).
    #[arg(long, value_parser = parse_base_dataset)]
    dataset: DatasetKind,

    /// Overlay to draw on top; repeat for several.
    #[arg(long = "overlay", value_parser = parse_overlay)]
    overlays: Vec<OverlayKind>,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Year to render.
    #[arg(long)]
    year: Year,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TransitionArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Year shown first.
    #[arg(long)]
    from: Year,

    /// Year revealed.
    #[arg(long)]
    to: Year,

    /// Number of ticks across the transition.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Seed for the per-cell draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for `frame_NNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(serde::Serialize)]
struct FrameReport<'a> {
    dataset: DatasetKind,
    year: Year,
    query: Option<geolapse::TemporalQuery>,
    stats: Option<&'a geolapse::FrameStats>,
    missing: &'a [geolapse::MissingLayer],
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
        Command::Frame(args) => cmd_frame(args),
        Command::Transition(args) => cmd_transition(args),
    }
}

fn parse_base_dataset(s: &str) -> Result<DatasetKind, String> {
    match DatasetKind::from_slug(s.trim()) {
        Some(kind) if !kind.is_overlay() => Ok(kind),
        Some(kind) => Err(format!("'{kind}' is an overlay, pass it with --overlay")),
        None => Err(format!("unknown dataset '{s}'")),
    }
}

fn parse_overlay(s: &str) -> Result<OverlayKind, String> {
    OverlayKind::Z_ORDER
        .into_iter()
        .find(|k| k.slug() == s.trim())
        .ok_or_else(|| format!("unknown overlay '{s}'"))
}

fn make_compositor(source: &SourceArgs) -> anyhow::Result<(Compositor, CompositeState)> {
    let config = match &source.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let store = FrameStore::new(Rc::new(JsonDirLoader::new(&source.data)));
    let compositor = Compositor::with_config(store, config)?;

    let mut state = CompositeState::default();
    let report = block_on(compositor.set_base_dataset(&mut state, source.dataset))?;
    if let Some(report) = report {
        tracing::debug!(loaded = report.loaded, failed = ?report.failed, "preloaded base dataset");
    }
    for &overlay in &source.overlays {
        if !state.is_overlay_enabled(overlay) {
            block_on(compositor.toggle_overlay(&mut state, overlay));
        }
    }
    Ok((compositor, state))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (compositor, state) = make_compositor(&args.source)?;
    let out = block_on(compositor.render_frame(args.year, &state));
    if out.pixels.is_empty() {
        anyhow::bail!(
            "no data for {} @ {} and no overlay could be drawn",
            args.source.dataset,
            args.year
        );
    }

    write_png(&args.out, &out.pixels)?;
    eprintln!("wrote {}", args.out.display());

    let report = FrameReport {
        dataset: args.source.dataset,
        year: args.year,
        query: out.query,
        stats: out.stats.as_ref(),
        missing: &out.missing,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize frame report")?
    );
    Ok(())
}

fn cmd_transition(args: TransitionArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be at least 1");
    }
    let (compositor, state) = make_compositor(&args.source)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let kind = args.source.dataset;
    let mut resolve = |year: Year| {
        block_on(compositor.resolve_base_with_rng(kind, year, &mut rng))
            .ok_or(GeoError::MissingFrame { kind, year })
    };
    let from = resolve(args.from)?;
    let to = resolve(args.to)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let clock = Rc::new(ManualClock::new());
    let mut animator = TransitionAnimator::with_clock(Rc::clone(&clock));

    let Presentation::Immediate(first) = animator.present(&from) else {
        anyhow::bail!("first frame unexpectedly animated");
    };
    let (pixels, _) = compositor.paint(Some(first.view()), &state);
    write_png(&frame_path(&args.out_dir, 0), &pixels)?;

    let handle = match animator.present(&to) {
        Presentation::Animating(handle) => handle,
        Presentation::Immediate(draw) => {
            // Same year or different shape: nothing to reveal.
            let (pixels, _) = compositor.paint(Some(draw.view()), &state);
            write_png(&frame_path(&args.out_dir, 1), &pixels)?;
            eprintln!("wrote 2 frames to {}", args.out_dir.display());
            return Ok(());
        }
    };

    let step_ms = TRANSITION_DURATION_MS / f64::from(args.steps);
    let mut written = 1u32;
    for i in 1..=args.steps {
        clock.set(if i == args.steps {
            TRANSITION_DURATION_MS
        } else {
            step_ms * f64::from(i)
        });
        let Some(draw) = animator.tick(handle, &mut rng) else {
            break;
        };
        let (pixels, _) = compositor.paint(Some(draw.view()), &state);
        write_png(&frame_path(&args.out_dir, i), &pixels)?;
        written += 1;
        if draw.finished {
            break;
        }
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn frame_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame_{index:03}.png"))
}

fn write_png(path: &Path, pixels: &PixelBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &pixels.to_straight_rgba8(),
        pixels.width,
        pixels.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
