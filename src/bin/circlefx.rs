use std::path::{Path, PathBuf};

use anyhow::Context as _;
use circlefx::{
    BorderPreset, BorderStyle, CancelToken, Color, ExportSettings, FrameShape, GifSink,
    PatternKind, RasterSurface, Rng64, SheetOpts, Tier,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "circlefx", version, about = "Procedural avatar borders")]
struct Cli {
    /// JSON export settings (defaults apply to missing fields).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in presets.
    Presets(PresetsArgs),
    /// Render a border alone on a transparent PNG.
    Border(BorderArgs),
    /// Compose a photo with a border into a PNG.
    Still(StillArgs),
    /// Compose a looping GIF from the start of a video clip (requires `media-ffmpeg`).
    Gif(GifArgs),
    /// Render every preset into one contact-sheet PNG.
    Sheet(SheetArgs),
}

#[derive(Args, Debug)]
struct PresetsArgs {
    /// Only list one tier.
    #[arg(long)]
    tier: Option<Tier>,

    /// Print JSON records instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Preset id (see `circlefx presets`).
    #[arg(long, conflicts_with = "pattern")]
    preset: Option<String>,

    /// Raw pattern tag, e.g. `ring-glow`.
    #[arg(long)]
    pattern: Option<String>,

    /// Primary color (`#RRGGBB`, `rgba(...)`, or a named color).
    #[arg(long)]
    color: Option<String>,

    /// Accent color for patterns that use one.
    #[arg(long)]
    secondary: Option<String>,

    /// Completion fraction for the `progress` pattern.
    #[arg(long)]
    progress: Option<f64>,

    /// Frame shape.
    #[arg(long)]
    shape: Option<FrameShape>,

    /// Seed for the random patterns.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct BorderArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Output edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Source photo. Omit (or pass an unreadable file) for a border-only placeholder.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    /// Output edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct GifArgs {
    /// Source video clip.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    style: StyleArgs,

    /// Output edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Number of frames to sample.
    #[arg(long)]
    frames: Option<u32>,

    /// Compose frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SheetArgs {
    /// Only include one tier.
    #[arg(long)]
    tier: Option<Tier>,

    /// Cell edge length in pixels.
    #[arg(long, default_value_t = 128)]
    cell: u32,

    /// Cells per row.
    #[arg(long, default_value_t = 6)]
    columns: u32,

    /// Frame shape.
    #[arg(long, default_value_t = FrameShape::Circle)]
    shape: FrameShape,

    /// Seed for the random patterns.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;
    match cli.cmd {
        Command::Presets(args) => cmd_presets(args),
        Command::Border(args) => cmd_border(args, &settings),
        Command::Still(args) => cmd_still(args, &settings),
        Command::Gif(args) => cmd_gif(args, &settings),
        Command::Sheet(args) => cmd_sheet(args, &settings),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<ExportSettings> {
    let mut settings = match path {
        Some(p) => ExportSettings::from_path(p)
            .with_context(|| format!("load settings '{}'", p.display()))?,
        None => ExportSettings::default(),
    };
    settings
        .apply_env()
        .context("apply CIRCLEFX_* environment overrides")?;
    Ok(settings)
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let presets: Vec<&BorderPreset> = match args.tier {
        Some(tier) => circlefx::catalog::presets_for_tier(tier).iter().collect(),
        None => circlefx::all_presets().collect(),
    };
    if args.json {
        let json = serde_json::to_string_pretty(&presets).context("serialize presets")?;
        println!("{json}");
        return Ok(());
    }
    for p in presets {
        let secondary = p
            .secondary_color
            .map(|c| format!(" + {}", c.to_hex()))
            .unwrap_or_default();
        println!(
            "{:<18} {:<10} {:<13} {}{secondary}",
            p.id,
            p.tier().to_string(),
            p.pattern.as_tag(),
            p.color.to_hex()
        );
    }
    Ok(())
}

impl StyleArgs {
    /// Resolve to a border style. Shape and progress fall back to `default_shape` and the settings.
    fn resolve(
        &self,
        settings: &ExportSettings,
        default_shape: FrameShape,
    ) -> anyhow::Result<BorderStyle> {
        let shape = self.shape.unwrap_or(default_shape);
        let progress = self.progress.unwrap_or(settings.progress);

        let mut style = match (&self.preset, &self.pattern) {
            (_, Some(tag)) => {
                let pattern = PatternKind::from_tag(tag)
                    .with_context(|| format!("unknown pattern '{tag}'"))?;
                BorderStyle::new(pattern, Color::WHITE)
                    .with_progress(progress)
                    .with_shape(shape)
            }
            (Some(id), None) => {
                let preset = circlefx::preset_by_id(id)
                    .with_context(|| format!("unknown preset '{id}'"))?;
                BorderStyle::from_preset(preset, progress, shape)
            }
            (None, None) => {
                let preset = circlefx::preset_by_id("classic-blue")
                    .context("default preset missing from catalog")?;
                BorderStyle::from_preset(preset, progress, shape)
            }
        };

        if let Some(c) = &self.color {
            style = style.with_primary(parse_color(c)?);
        }
        if let Some(c) = &self.secondary {
            style.secondary = Some(parse_color(c)?);
        }
        Ok(style)
    }

    fn rng(&self, settings: &ExportSettings) -> Rng64 {
        match self.seed.or(settings.seed) {
            Some(seed) => Rng64::new(seed),
            None => Rng64::from_clock(),
        }
    }
}

fn parse_color(s: &str) -> anyhow::Result<Color> {
    Color::parse(s).map_err(|e| anyhow::anyhow!(e))
}

fn cmd_border(args: BorderArgs, settings: &ExportSettings) -> anyhow::Result<()> {
    let style = args.style.resolve(settings, settings.shape)?;
    let size = args.size.unwrap_or(settings.still_size);
    let mut surface = RasterSurface::square(size)?;
    circlefx::draw_border(
        &mut surface,
        &style.request(f64::from(size)),
        &mut args.style.rng(settings),
    );
    circlefx::encode::still::write_png(&args.out, &surface.to_rgba_image())
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_still(args: StillArgs, settings: &ExportSettings) -> anyhow::Result<()> {
    let style = args.style.resolve(settings, settings.shape)?;
    let size = args.size.unwrap_or(settings.still_size);
    circlefx::export_still(
        args.in_path.as_deref(),
        &style,
        size,
        &args.out,
        &mut args.style.rng(settings),
    )
    .with_context(|| format!("export still '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs, settings: &ExportSettings) -> anyhow::Result<()> {
    let style = args.style.resolve(settings, settings.gif_shape)?;
    let mut opts = settings.animation_opts();
    if let Some(size) = args.size {
        opts.size = size;
    }
    if let Some(frames) = args.frames {
        opts.sample.frame_count = frames;
    }
    opts.parallel |= args.parallel;
    opts.threads = args.threads.or(opts.threads);
    opts.seed = args.style.seed.or(opts.seed);

    let mut source = circlefx::media::video::FfmpegVideoSource::open(&args.in_path)
        .with_context(|| format!("open video '{}'", args.in_path.display()))?;
    let mut sink = GifSink::create(&args.out)?;
    let stats = circlefx::export_animation(
        &mut source,
        &style,
        &opts,
        &CancelToken::new(),
        &mut sink,
    )
    .with_context(|| format!("export gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} skipped)",
        args.out.display(),
        stats.frames_captured,
        stats.frames_skipped
    );
    Ok(())
}

fn cmd_sheet(args: SheetArgs, settings: &ExportSettings) -> anyhow::Result<()> {
    let presets: Vec<&BorderPreset> = match args.tier {
        Some(tier) => circlefx::catalog::presets_for_tier(tier).iter().collect(),
        None => circlefx::all_presets().collect(),
    };
    let opts = SheetOpts {
        cell_size: args.cell,
        columns: args.columns,
        progress: settings.progress,
        shape: args.shape,
        parallel: true,
        threads: settings.threads,
        seed: args.seed,
    };
    let sheet = circlefx::render_preset_sheet(&presets, &opts)?;
    circlefx::encode::still::write_png(&args.out, &sheet)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} presets)", args.out.display(), presets.len());
    Ok(())
}
