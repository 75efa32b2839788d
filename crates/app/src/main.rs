use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use solar_showcase_core::{
    solar_catalog, DisplayItem, FrameLoop, ItemSequencer, LoopTopology, RecordingSurface,
    Showcase, ShowcaseConfig, ShowcaseError, StripFrame,
};
use tracing_subscriber::EnvFilter;

fn main() -> solar_showcase_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let items = load_items(cli.items.as_deref())?;

    match cli.command {
        Commands::Simulate(args) => run_simulate(items, &config, &args),
        Commands::Geometry => run_geometry(&items, &config),
    }
}

fn load_config(path: Option<&Path>) -> solar_showcase_core::Result<ShowcaseConfig> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading showcase configuration");
            ShowcaseConfig::from_path(path)
        }
        None => Ok(ShowcaseConfig::default()),
    }
}

fn load_items(path: Option<&Path>) -> solar_showcase_core::Result<Vec<DisplayItem>> {
    match path {
        Some(path) => Ok(ItemSequencer::from_path(path)?.items().to_vec()),
        None => Ok(solar_catalog()),
    }
}

fn run_simulate(
    items: Vec<DisplayItem>,
    config: &ShowcaseConfig,
    args: &SimulateArgs,
) -> solar_showcase_core::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        return Err(ShowcaseError::msg(format!(
            "--fps must be a positive number, got {}",
            args.fps
        )));
    }
    tracing::info!(frames = args.frames, fps = args.fps, "starting simulation");

    let frames = FrameLoop::new();
    let surface = RecordingSurface::new();
    let showcase = Showcase::mount(items, config, &frames, surface.clone());
    if !showcase.is_enabled() {
        tracing::warn!("showcase is disabled; nothing will scroll");
    }
    if let Some(offset) = args.scroll_to {
        showcase.manual_scroll(offset);
        surface.clear();
    }

    let frame_ms = 1000.0 / args.fps;
    for frame in 0..args.frames {
        if args.hover_from == Some(frame) {
            showcase.pointer_enter();
        }
        if args.hover_until == Some(frame) {
            showcase.pointer_leave();
        }
        frames.run_frame(frame as f64 * frame_ms);
    }
    showcase.teardown();

    let recorded = surface.frames();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&recorded)?);
    } else {
        for (index, frame) in recorded.iter().enumerate() {
            print_frame(index, frame);
        }
    }
    tracing::info!(presented = showcase.frames_presented(), "simulation finished");
    Ok(())
}

fn print_frame(index: usize, frame: &StripFrame) {
    let timestamp = frame.timestamp.unwrap_or_default();
    match frame.focused() {
        Some(card) => println!(
            "frame {index:>5}  t={timestamp:>9.1}ms  position={:>8.2}  focus={:<20} scale={:.3} tilt={:.2}",
            frame.position, card.label, card.scale, card.tilt
        ),
        None => println!("frame {index:>5}  t={timestamp:>9.1}ms  (empty strip)"),
    }
}

fn run_geometry(items: &[DisplayItem], config: &ShowcaseConfig) -> solar_showcase_core::Result<()> {
    config.validate()?;
    let sequencer = ItemSequencer::new(items.to_vec());
    let Some(topology) =
        LoopTopology::new(sequencer.len(), config.layout.card_width, config.layout.gap)
    else {
        println!(
            "strip disabled: {} items, unit width {}",
            sequencer.len(),
            config.unit_width()
        );
        return Ok(());
    };

    println!("items          {}", topology.item_count());
    println!("unit width     {}", topology.unit_width());
    println!("loop width     {}", topology.loop_width());
    println!("falloff window {}", config.falloff_window());
    println!("viewport width {}", config.layout.viewport_width);
    println!();
    for (index, item) in sequencer.rendered_sequence().enumerate() {
        println!(
            "{index:>3}  center={:>8.1}  {}  ({})",
            topology.item_center(index),
            item.label,
            item.image_ref
        );
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless harness for the solar category showcase", long_about = None)]
struct Cli {
    /// JSON configuration file; defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// JSON array of display items; the built-in solar catalog is used when omitted.
    #[arg(short, long, global = true)]
    items: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the strip for a number of frames and print what would be painted.
    Simulate(SimulateArgs),
    /// Print the strip geometry and the rendered sequence.
    Geometry,
}

#[derive(clap::Args, Debug)]
struct SimulateArgs {
    /// Number of frames to run.
    #[arg(short, long, default_value_t = 120)]
    frames: usize,
    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Frame at which the pointer enters the strip.
    #[arg(long)]
    hover_from: Option<usize>,
    /// Frame at which the pointer leaves the strip.
    #[arg(long)]
    hover_until: Option<usize>,
    /// Manual scroll offset applied before the first frame.
    #[arg(long, allow_negative_numbers = true)]
    scroll_to: Option<f64>,
    /// Emit every recorded frame as JSON.
    #[arg(long)]
    json: bool,
}
