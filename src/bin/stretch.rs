use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use stretch::{
    Channel, Direction, Image, Interpolation, RenderSettings, RenderThreading, StretchParams,
};

#[derive(Parser, Debug)]
#[command(name = "stretch", version, about = stretch::DESCRIPTION)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stretch a PNG and write the result as PNG.
    Apply(ApplyArgs),
    /// Print the output expansion for an input size as JSON.
    Plan(PlanArgs),
    /// Print name, version and description.
    About,
}

#[derive(Args, Debug)]
struct StretchArgs {
    /// JSON file with stretch parameters; flags below override its fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Anchor point in input pixels. Defaults to the image center.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    anchor: Option<Vec<i32>>,

    /// Cut line angle in degrees.
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Shift amount in pixels.
    #[arg(long)]
    shift: Option<f64>,

    #[arg(long, value_enum)]
    direction: Option<DirectionChoice>,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Input PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    stretch: StretchArgs,

    #[arg(long, value_enum, default_value_t = InterpolationChoice::Bilinear)]
    interpolation: InterpolationChoice,

    /// Row workers (default: available parallelism, at most 16).
    #[arg(long)]
    workers: Option<usize>,

    /// Grow the output so displaced content is not cropped.
    #[arg(long)]
    expand: bool,

    /// Render through the float pipeline (written back as 16-bit PNG).
    #[arg(long)]
    float: bool,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Take the input size from this image.
    #[arg(long = "in", conflicts_with_all = ["width", "height"])]
    in_path: Option<PathBuf>,

    #[arg(long, requires = "height")]
    width: Option<u32>,

    #[arg(long, requires = "width")]
    height: Option<u32>,

    #[command(flatten)]
    stretch: StretchArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Both,
    Forward,
    Backward,
}

impl From<DirectionChoice> for Direction {
    fn from(d: DirectionChoice) -> Self {
        match d {
            DirectionChoice::Both => Direction::Both,
            DirectionChoice::Forward => Direction::Forward,
            DirectionChoice::Backward => Direction::Backward,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InterpolationChoice {
    Nearest,
    Bilinear,
}

impl From<InterpolationChoice> for Interpolation {
    fn from(i: InterpolationChoice) -> Self {
        match i {
            InterpolationChoice::Nearest => Interpolation::Nearest,
            InterpolationChoice::Bilinear => Interpolation::Bilinear,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Plan(args) => cmd_plan(args),
        Command::About => {
            println!("{}", stretch::about_text().replace('\r', "\n"));
            println!("version {}", stretch::VERSION);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_params_json(path: &Path) -> anyhow::Result<StretchParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let params: StretchParams = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse params JSON '{}'", path.display()))?;
    Ok(params)
}

/// Parameters from the JSON file (if any) with command-line overrides applied.
fn resolve_params(args: &StretchArgs, width: u32, height: u32) -> anyhow::Result<StretchParams> {
    let mut params = match &args.params {
        Some(path) => read_params_json(path)?,
        None => StretchParams {
            anchor: [(width / 2) as i32, (height / 2) as i32],
            ..StretchParams::default()
        },
    };
    if let Some(anchor) = &args.anchor {
        params.anchor = [anchor[0], anchor[1]];
    }
    if let Some(angle) = args.angle {
        params.angle_deg = angle;
    }
    if let Some(shift) = args.shift {
        params.shift = shift;
    }
    if let Some(direction) = args.direction {
        params.direction = direction.into();
    }
    Ok(params)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (width, height) = match (&args.in_path, args.width, args.height) {
        (Some(path), _, _) => image::image_dimensions(path)
            .with_context(|| format!("read image size '{}'", path.display()))?,
        (None, Some(w), Some(h)) => (w, h),
        _ => anyhow::bail!("either --in or --width/--height is required"),
    };
    let params = resolve_params(&args.stretch, width, height)?;
    let plan = stretch::plan_expansion(&params, width as usize, height as usize);
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let input = image::open(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let (width, height) = (input.width(), input.height());
    let params = resolve_params(&args.stretch, width, height)?;
    let settings = RenderSettings {
        interpolation: args.interpolation.into(),
        threading: RenderThreading {
            workers: args.workers,
            ..RenderThreading::default()
        },
    };
    tracing::debug!(?params, ?settings, "applying stretch");

    let output = if args.float {
        let rgba = input.to_rgba32f();
        let src = Image::from_vec(width as usize, height as usize, rgba_to_argb(rgba.as_raw()))?;
        let out = stretch_image(&src, &params, &settings, args.expand)?;
        let buf = image::Rgba32FImage::from_raw(
            out.width() as u32,
            out.height() as u32,
            argb_to_rgba(out.data()),
        )
        .context("float output buffer has the wrong size")?;
        image::DynamicImage::ImageRgba32F(buf).to_rgba16().into()
    } else if is_deep(input.color()) {
        let rgba = input.to_rgba16();
        let native: Vec<u16> = rgba.as_raw().iter().map(|&v| png16_to_host(v)).collect();
        let src = Image::from_vec(width as usize, height as usize, rgba_to_argb(&native))?;
        let out = stretch_image(&src, &params, &settings, args.expand)?;
        let png: Vec<u16> = argb_to_rgba(out.data())
            .into_iter()
            .map(host_to_png16)
            .collect();
        let buf = image::ImageBuffer::<image::Rgba<u16>, _>::from_raw(
            out.width() as u32,
            out.height() as u32,
            png,
        )
        .context("16-bit output buffer has the wrong size")?;
        image::DynamicImage::ImageRgba16(buf)
    } else {
        let rgba = input.to_rgba8();
        let src = Image::from_vec(width as usize, height as usize, rgba_to_argb(rgba.as_raw()))?;
        let out = stretch_image(&src, &params, &settings, args.expand)?;
        let buf = image::RgbaImage::from_raw(
            out.width() as u32,
            out.height() as u32,
            argb_to_rgba(out.data()),
        )
        .context("8-bit output buffer has the wrong size")?;
        image::DynamicImage::ImageRgba8(buf)
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    output
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        output.width(),
        output.height()
    );
    Ok(())
}

fn stretch_image<C: Channel>(
    src: &Image<C>,
    params: &StretchParams,
    settings: &RenderSettings,
    expand: bool,
) -> anyhow::Result<Image<C>> {
    let out = if expand {
        let (out, plan) = stretch::render_expanded(src.as_view(), params, settings)?;
        tracing::debug!(margins = ?plan.margins, "expanded output");
        out
    } else {
        stretch::render_same_size(src.as_view(), params, settings)?
    };
    Ok(out)
}

fn is_deep(color: image::ColorType) -> bool {
    color.bytes_per_pixel() > color.channel_count()
}

// PNG stores 16-bit channels as 0..=65535; the engine works in 0..=32768.
fn png16_to_host(v: u16) -> u16 {
    ((u32::from(v) * 32768 + 32767) / 65535) as u16
}

fn host_to_png16(v: u16) -> u16 {
    ((u32::from(v.min(32768)) * 65535 + 16384) / 32768) as u16
}

fn rgba_to_argb<T: Copy>(rgba: &[T]) -> Vec<T> {
    rgba.chunks_exact(4)
        .flat_map(|p| [p[3], p[0], p[1], p[2]])
        .collect()
}

fn argb_to_rgba<T: Copy>(argb: &[T]) -> Vec<T> {
    argb.chunks_exact(4)
        .flat_map(|p| [p[1], p[2], p[3], p[0]])
        .collect()
}
