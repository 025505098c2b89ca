use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trivia_shorts::{Fact, ProgressEvent, ShortsConfig, VideoGenerator, load_facts};

#[derive(Parser, Debug)]
#[command(name = "trivia-shorts", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the segment plan as JSON.
    Plan(PlanArgs),
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Facts JSON (array of facts or an Open Trivia DB response).
    #[arg(long)]
    facts: PathBuf,

    /// Optional configuration JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Think animation GIF shown under questions.
    #[arg(long)]
    think_asset: Option<PathBuf>,

    /// Preferred TTF/OTF font.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory receiving `trivia_video_<timestamp>.mp4`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Time into the video, in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn setup(common: &CommonArgs) -> anyhow::Result<(VideoGenerator, Vec<Fact>)> {
    let mut cfg = match common.config.as_deref() {
        Some(path) => ShortsConfig::from_path(path)?,
        None => ShortsConfig::default(),
    };
    if let Some(path) = &common.think_asset {
        cfg.think_asset = Some(path.clone());
    }
    if let Some(path) = &common.font {
        cfg.font_path = Some(path.clone());
    }
    let facts = load_facts(&common.facts)?;
    Ok((VideoGenerator::new(cfg)?, facts))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (generator, facts) = setup(&args.common)?;
    let out = generator
        .generate_video(&facts, &args.out_dir, |ev: &ProgressEvent| {
            eprintln!("[{:5.1}%] {}", ev.percent, ev.message);
        })
        .map_err(|err| {
            if err.is_permission_denied() {
                anyhow::anyhow!("{err}\nchoose another --out-dir or rerun with write access")
            } else {
                err.into()
            }
        })?;
    println!("{}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (generator, facts) = setup(&args.common)?;
    let frame = generator.render_frame_at(&facts, args.time)?;

    create_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (generator, facts) = setup(&args.common)?;
    let plan = generator.plan(&facts)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
