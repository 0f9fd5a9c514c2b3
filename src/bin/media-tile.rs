use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use media_tile::{
    BindRequest, Bitmap, ColorRef, CornerRadius, CpuSurface, FrameTime, HostView,
    InteractionState, IntRect, Provenance, ShapeMode, TileOptions, TileSettings, set_bitmap,
};

#[derive(Parser, Debug)]
#[command(name = "media-tile", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the fade-in of an image as a sequence of PNG frames.
    Frames(FramesArgs),
    /// Print the effective settings as JSON.
    Settings(SettingsArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeArg {
    Circle,
    RoundedRect,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProvenanceArg {
    Memory,
    Disk,
    Network,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Settings JSON; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Clip shape.
    #[arg(long, value_enum, default_value_t = ShapeArg::Circle)]
    shape: ShapeArg,

    /// Fixed corner radius for rounded rects (negative means auto).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    radius: i32,

    /// Border inset in pixels.
    #[arg(long, default_value_t = 0)]
    border: u32,

    /// Border colour as `AARRGGBB` hex.
    #[arg(long, default_value = "FF000000")]
    border_color: String,

    /// Render the view pressed, showing the border background.
    #[arg(long, default_value_t = false)]
    pressed: bool,

    /// Where the bitmap is pretended to come from.
    #[arg(long, value_enum, default_value_t = ProvenanceArg::Network)]
    provenance: ProvenanceArg,

    /// Never fade.
    #[arg(long, default_value_t = false)]
    no_fade: bool,

    /// Always fade, even for memory hits.
    #[arg(long, default_value_t = false)]
    force_fade: bool,

    /// Draw the provenance indicator.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// View width; defaults to the image width.
    #[arg(long)]
    width: Option<u32>,

    /// View height; defaults to the image height.
    #[arg(long)]
    height: Option<u32>,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 50)]
    step_ms: u64,
}

#[derive(Parser, Debug)]
struct SettingsArgs {
    /// Settings JSON to load before applying environment overrides.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Settings(args) => cmd_settings(args),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<TileSettings> {
    let settings = match path {
        Some(p) => {
            let f = std::fs::File::open(p)
                .with_context(|| format!("open settings '{}'", p.display()))?;
            TileSettings::from_json_reader(std::io::BufReader::new(f))
                .with_context(|| format!("load settings '{}'", p.display()))?
        }
        None => TileSettings::default(),
    };
    Ok(settings.with_env_overrides())
}

fn cmd_settings(args: SettingsArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.settings.as_deref())?;
    println!("{}", settings.to_json_pretty()?);
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    let settings = load_settings(args.settings.as_deref())?;

    let img = image::open(&args.in_path)
        .with_context(|| format!("decode image '{}'", args.in_path.display()))?
        .to_rgba8();
    let bitmap = Bitmap::from(&img);
    let width = args.width.unwrap_or(bitmap.width());
    let height = args.height.unwrap_or(bitmap.height());

    let border_color = u32::from_str_radix(args.border_color.trim_start_matches('#'), 16)
        .with_context(|| format!("parse border colour '{}'", args.border_color))?;

    let mut options = TileOptions::from_settings(&settings);
    options.provenance = match args.provenance {
        ProvenanceArg::Memory => Provenance::Memory,
        ProvenanceArg::Disk => Provenance::Disk,
        ProvenanceArg::Network => Provenance::Network,
    };
    options.shape = match args.shape {
        ShapeArg::Circle => ShapeMode::Circle,
        ShapeArg::RoundedRect => ShapeMode::RoundedRect,
    };
    options.corner_radius = CornerRadius::from_raw(args.radius);
    options.border.size = args.border;
    options.border.color = ColorRef(border_color);
    options.fade.suppress = args.no_fade;
    options.fade.force = args.force_fade;
    options.debugging |= args.debug;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut view = HostView::default();
    view.set_bounds(IntRect::from_size(
        i32::try_from(width).context("view width")?,
        i32::try_from(height).context("view height")?,
    ));
    if args.pressed {
        view.set_state(InteractionState::PRESSED);
    }
    set_bitmap(&mut view, BindRequest::new(bitmap, options), FrameTime(0))?;

    let mut index = 0u64;
    loop {
        let now = FrameTime(index * args.step_ms);
        let mut surface = CpuSurface::new(width, height)?;
        let more = view.draw(&mut surface, now);
        let frame = surface.finish()?;

        let out = args.out_dir.join(format!("frame_{index:04}.png"));
        image::save_buffer_with_format(
            &out,
            &frame.to_straight_rgba8(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out.display()))?;

        index += 1;
        if !more {
            break;
        }
    }

    eprintln!("wrote {index} frame(s) to {}", args.out_dir.display());
    Ok(())
}
