use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use fxcanvas::Host as _;

#[derive(Parser, Debug)]
#[command(name = "fxcanvas", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the features a hash produces, as JSON.
    Features(RunArgs),
    /// Lay out, draw and export one run as PNG.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Run hash; a fresh one is generated when omitted.
    #[arg(long)]
    hash: Option<String>,

    /// Page query string (`forceWidth`, `forceId`, `forceDownload`, `fxhash`).
    #[arg(long, default_value = "")]
    query: String,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Initial viewport, `WxH` or `WxH@DPR`.
    #[arg(long, default_value = "800x600")]
    viewport: fxcanvas::Viewport,

    /// Device pixel ratio, overriding the one in `--viewport`.
    #[arg(long)]
    dpr: Option<f64>,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Viewports to resize through before exporting (repeatable).
    #[arg(long = "resize")]
    resizes: Vec<fxcanvas::Viewport>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Features(args) => cmd_features(args),
        Command::Render(args) => cmd_render(args),
    }
}

struct Run {
    config: fxcanvas::SketchConfig,
    overrides: fxcanvas::UrlOverrides,
    host: fxcanvas::HeadlessHost,
}

fn prepare(args: &RunArgs) -> anyhow::Result<Run> {
    let config = match &args.config {
        Some(path) => fxcanvas::SketchConfig::from_path(path)?,
        None => fxcanvas::SketchConfig::default(),
    };
    let overrides = fxcanvas::UrlOverrides::parse(&args.query);

    let hash = match (&overrides.fxhash, &args.hash) {
        (Some(h), _) => h.clone(),
        (None, Some(raw)) => fxcanvas::FxHash::new(raw.as_str()).context("--hash")?,
        (None, None) => fxcanvas::FxHash::generate(wall_clock_seed()),
    };
    if !hash.is_canonical() {
        tracing::warn!(%hash, "hash is not in the canonical oo + 49 base58 form");
    }

    Ok(Run {
        config,
        overrides,
        host: fxcanvas::HeadlessHost::new(hash),
    })
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn cmd_features(args: RunArgs) -> anyhow::Result<()> {
    let mut run = prepare(&args)?;
    run.config.validate()?;
    let features = fxcanvas::generate_features(&mut run.host);

    let out = serde_json::json!({
        "hash": run.host.hash().as_str(),
        "features": features.summary(),
        "line_colours": features.line_colours(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let run = prepare(&args.run)?;
    let viewport = match args.dpr {
        Some(dpr) => args.viewport.with_device_pixel_ratio(dpr),
        None => args.viewport,
    };

    let file_name = fxcanvas::export_file_name(
        &run.config.prefix,
        run.host.hash().as_str(),
        run.overrides.padded_force_id().as_deref(),
    );
    let forced = run.overrides.force_download;

    let sink = fxcanvas::DirectorySink::new(&args.out_dir);
    let ctx = fxcanvas::SketchContext::new(run.config, run.overrides, run.host, sink)?;
    let mut rt = fxcanvas::EventLoop::start(ctx, viewport)?;

    for resize in args.resizes {
        rt.post(fxcanvas::Event::Resize(resize));
    }
    rt.settle();
    if !forced {
        rt.post(fxcanvas::Event::KeyPress('s'));
        rt.settle();
    }

    if let Some(first) = rt.take_errors().into_iter().next() {
        return Err(first).context("render failed");
    }

    let path = args.out_dir.join(&file_name);
    anyhow::ensure!(path.exists(), "expected '{}' to be written", path.display());
    eprintln!("wrote {}", path.display());
    Ok(())
}
