use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "vidintro", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the intro headlessly and write rendered frames as PNGs.
    Render(RenderArgs),
    /// Print the frustum-filling plane size for a viewport as JSON.
    Plane(PlaneArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Intro configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Video file or frame directory; overrides `video.src` from the config.
    #[arg(long)]
    video: Option<PathBuf>,

    /// Use a synthetic video of this many seconds instead of loading a file.
    #[arg(long, conflicts_with = "video")]
    test_pattern: Option<f64>,

    /// Output directory for PNG frames.
    #[arg(long)]
    out: PathBuf,

    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Viewport height in CSS pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Host frame rate.
    #[arg(long, default_value_t = 24.0)]
    fps: f64,

    /// Number of host frames to run.
    #[arg(long, default_value_t = 240)]
    max_frames: u64,

    /// Write one PNG every N frames.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Host autoplay policy.
    #[arg(long, value_enum, default_value_t = AutoplayChoice::MutedOnly)]
    autoplay: AutoplayChoice,
}

#[derive(Parser, Debug)]
struct PlaneArgs {
    /// Viewport width in CSS pixels.
    #[arg(long)]
    width: u32,

    /// Viewport height in CSS pixels.
    #[arg(long)]
    height: u32,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 75.0)]
    fov: f64,

    /// Camera-to-plane distance.
    #[arg(long, default_value_t = 5.0)]
    distance: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AutoplayChoice {
    Allowed,
    MutedOnly,
    Blocked,
}

impl From<AutoplayChoice> for vidintro::AutoplayPolicy {
    fn from(c: AutoplayChoice) -> Self {
        match c {
            AutoplayChoice::Allowed => Self::Allowed,
            AutoplayChoice::MutedOnly => Self::MutedOnly,
            AutoplayChoice::Blocked => Self::Blocked,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plane(args) => cmd_plane(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => vidintro::IntroConfig::from_json_path(path)?,
        None => vidintro::IntroConfig::default(),
    };
    if let Some(video) = &args.video {
        cfg.video.src = video.clone();
    }

    let loader: Arc<dyn vidintro::SourceLoader> = match args.test_pattern {
        Some(duration_secs) => Arc::new(vidintro::TestPatternLoader {
            width: 64,
            height: 36,
            duration_secs,
            fps: cfg.video.sequence_fps,
        }),
        None => Arc::new(vidintro::DefaultLoader {
            sequence_fps: cfg.video.sequence_fps,
        }),
    };

    let viewport = vidintro::Viewport::with_pixel_ratio(args.width, args.height, args.dpr)?;
    let host = vidintro::HeadlessHost::new(viewport, args.fps, args.max_frames)?
        .with_autoplay(args.autoplay.into());
    let mut sink = vidintro::PngSequenceSink::new(&args.out, args.every)?;

    let (session, stats) = vidintro::run_intro(host, cfg, loader, &mut sink)
        .with_context(|| format!("render intro into '{}'", args.out.display()))?;

    let summary = serde_json::json!({
        "phase": session.phase(),
        "stats": stats,
        "content": session.region(),
        "pngs": sink.written().len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plane(args: PlaneArgs) -> anyhow::Result<()> {
    let viewport = vidintro::Viewport::new(args.width, args.height)?;
    let mut camera = vidintro::PerspectiveCamera::new(args.fov, viewport.aspect(), 0.1, 1000.0)?;
    camera.position = vidintro::Point3::new(0.0, 0.0, args.distance);
    let size = vidintro::plane_size(&camera, args.distance);

    let out = serde_json::json!({
        "width": size.width,
        "height": size.height,
        "aspect": camera.aspect(),
    });
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
