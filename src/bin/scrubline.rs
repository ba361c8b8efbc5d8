use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;

use scrubline::{MemoryTarget, Progress, SceneConfig, ScrollMetrics, ScrollScene, StepSnapshot};

#[derive(Parser, Debug)]
#[command(name = "scrubline", version)]
struct Cli {
    /// Most verbose level logged to stderr.
    #[arg(long, global = true, default_value_t = tracing::Level::WARN)]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a scene, then print its regions.
    Validate(SceneArgs),
    /// Print the settled style of one region at a progress value.
    Sample(SampleArgs),
    /// Print which step is active at a progress value.
    Steps(StepsArgs),
    /// Scroll through a scene and print what each event writes.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input scene JSON. The built-in landing page when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Print the scene back as JSON.
    #[arg(long)]
    dump: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    #[arg(long)]
    region: String,

    /// Progress in [0, 1]; out-of-range values are clamped.
    #[arg(long)]
    progress: f64,
}

const MAX_STEPS: u64 = 10_000;

#[derive(Parser, Debug)]
struct StepsArgs {
    #[arg(long)]
    progress: f64,

    /// Number of steps, up to 10000. The built-in process topics when omitted.
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_STEPS))]
    count: Option<usize>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Final offset. The bottom of the document when omitted.
    #[arg(long)]
    to: Option<f64>,

    /// Number of scroll events between `from` and `to`.
    #[arg(long, default_value_t = 20)]
    events: usize,

    /// Display frames run after each scroll event.
    #[arg(long, default_value_t = 0)]
    frames: usize,

    #[arg(long, default_value_t = scrubline::presets::NOMINAL_VIEWPORT)]
    viewport: f64,

    #[arg(long, default_value_t = scrubline::presets::NOMINAL_DOCUMENT)]
    document: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Steps(args) => cmd_steps(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load_scene(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(p) => SceneConfig::from_path(p)
            .with_context(|| format!("load scene '{}'", p.display())),
        None => Ok(scrubline::presets::landing_page()?),
    }
}

fn print_json(v: &impl Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).with_context(|| "serialize output")?;
    println!("{s}");
    Ok(())
}

fn cmd_validate(args: SceneArgs) -> anyhow::Result<()> {
    let scene = load_scene(args.in_path.as_deref())?;
    if args.dump {
        println!("{}", scene.to_json_pretty()?);
        return Ok(());
    }
    for r in &scene.regions {
        println!(
            "{}\t{} -> {}\t{} targets",
            r.id,
            r.trigger.start,
            r.trigger.end,
            r.targets().len()
        );
    }
    eprintln!("ok: {} regions", scene.regions.len());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let scene = load_scene(args.in_path.as_deref())?;
    let spec = scene
        .region(&args.region)
        .with_context(|| format!("no region '{}'", args.region))?;
    let frame = scrubline::scene::scroll_scene::sample_region(spec, Progress::new(args.progress))?;
    print_json(&frame)
}

#[derive(Serialize)]
struct StepsOut<'a> {
    #[serde(flatten)]
    snapshot: StepSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let p = Progress::new(args.progress);
    let topics = scrubline::presets::process_topics()?;
    let n = args.count.unwrap_or(topics.len());
    let snapshot = StepSnapshot::at(p, n).with_context(|| "step count must be at least 1")?;
    let title = args
        .count
        .is_none()
        .then(|| topics.get(snapshot.active).map(|i| i.content.title))
        .flatten();
    print_json(&StepsOut { snapshot, title })
}

#[derive(Serialize)]
struct EventOut {
    offset: f64,
    writes: usize,
    edges: Vec<scrubline::EdgeNotice>,
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scene_cfg = load_scene(args.in_path.as_deref())?;
    anyhow::ensure!(
        args.document >= args.viewport && args.viewport > 0.0,
        "document ({}) must be at least the viewport ({})",
        args.document,
        args.viewport
    );
    let metrics = ScrollMetrics::new(args.from, args.document, args.viewport);
    let to = args.to.unwrap_or_else(|| metrics.max_offset());

    let scene = ScrollScene::new();
    let _handles = scene.mount_all(scene_cfg.regions)?;
    let mut target = MemoryTarget::open();

    let events = args.events.max(1);
    for i in 0..=events {
        let offset = args.from + (to - args.from) * i as f64 / events as f64;
        let report = scene.on_scroll(metrics.at(offset), &mut target);
        let mut out = EventOut {
            offset,
            writes: report.diff.len(),
            edges: report.edges,
        };
        for _ in 0..args.frames {
            let more = scene.on_frame(1.0 / 60.0, &mut target);
            out.writes += more.diff.len();
            out.edges.extend(more.edges);
        }
        println!(
            "{}",
            serde_json::to_string(&out).with_context(|| "serialize event")?
        );
    }
    eprintln!(
        "done: {} commits, {} values applied",
        target.commits().len(),
        target.state().len()
    );
    Ok(())
}
