use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "svgmotion", version)]
struct Cli {
    /// Log locally recovered parse problems.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an SVG file and print the scene graph as JSON.
    Inspect(InspectArgs),
    /// Parse an SVG file, run its animations and print snapshots as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input SVG file.
    input: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input SVG file.
    input: PathBuf,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 1.0)]
    until: f64,

    /// Seconds between snapshots.
    #[arg(long, default_value_t = 0.25)]
    step: f64,
}

#[derive(serde::Serialize)]
struct Snapshot<'a> {
    time: f64,
    running_tasks: usize,
    objects: Vec<ObjectSnapshot<'a>>,
}

#[derive(serde::Serialize)]
struct ObjectSnapshot<'a> {
    index: usize,
    id: Option<&'a str>,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    angle: f64,
    opacity: f64,
    fill: Option<&'a str>,
    transform: [f64; 6],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load(path: &Path) -> anyhow::Result<svgmotion::Document> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read svg '{}'", path.display()))?;
    svgmotion::Document::parse_str(&text).with_context(|| format!("parse svg '{}'", path.display()))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut doc = load(&args.input)?;
    let mut registry = svgmotion::AnimationRegistry::new();
    let out = svgmotion::parse_svg_document(
        &mut doc,
        &mut registry,
        &svgmotion::ParseOptions::default(),
    );
    let json = if args.pretty {
        serde_json::to_string_pretty(&out)
    } else {
        serde_json::to_string(&out)
    }
    .context("serialize parse output")?;
    println!("{json}");
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be a positive number of seconds");
    }
    if !(args.until.is_finite() && args.until >= 0.0) {
        anyhow::bail!("--until must be a non-negative number of seconds");
    }
    let mut doc = load(&args.input)?;
    let mut registry = svgmotion::AnimationRegistry::new();
    let mut out = svgmotion::parse_svg_document(
        &mut doc,
        &mut registry,
        &svgmotion::ParseOptions::default(),
    );

    let mut time = 0.0;
    loop {
        registry.tick(time, &mut out.scene);
        let snapshot = Snapshot {
            time,
            running_tasks: registry.len(),
            objects: out
                .scene
                .objects()
                .filter(|(_, o)| o.is_animatable())
                .map(|(id, o)| ObjectSnapshot {
                    index: id.0,
                    id: o.id.as_deref(),
                    left: o.left,
                    top: o.top,
                    width: o.width,
                    height: o.height,
                    angle: o.angle,
                    opacity: o.opacity,
                    fill: o.fill.as_deref(),
                    transform: o.own_matrix().as_coeffs(),
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string(&snapshot).context("serialize snapshot")?
        );
        if time >= args.until {
            break;
        }
        time = (time + args.step).min(args.until);
    }
    Ok(())
}
