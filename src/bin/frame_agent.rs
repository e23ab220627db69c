use anyhow::Context;
use clap::Parser;
use game_agent::*;
use log::{info, warn};
use std::path::PathBuf;

/// Feeds a directory of captured frames through a game agent.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Agent name; its options are read from the `[<agent>Plugin]` section
    #[arg(long, default_value = "GameAgent")]
    agent: String,

    /// Directory of PNG frames, dispatched in file name order
    #[arg(long)]
    frames: PathBuf,

    /// Directory of PNG sprites for the game descriptor
    #[arg(long)]
    sprites: Option<PathBuf>,

    /// Create the dataset directories before dispatching
    #[arg(long)]
    init_datasets: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AgentConfig::load(path, &args.agent),
        None => AgentConfig::from_environment(&args.agent),
    }
    .context("loading agent configuration")?;

    if args.init_datasets {
        config
            .datasets()
            .create_roots()
            .context("creating dataset directories")?;
    }

    let game = match &args.sprites {
        Some(dir) => StaticGame::from_sprite_dir(&args.agent, dir)
            .with_context(|| format!("loading sprites from {:?}", dir))?,
        None => StaticGame::new(args.agent.clone(), Default::default()),
    };

    let mut agent = GameAgent::builder(&args.agent, game, config).build()?;

    let mut frame_paths: Vec<_> = std::fs::read_dir(&args.frames)
        .with_context(|| format!("reading frames from {:?}", args.frames))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("png"))
        .collect();
    frame_paths.sort();
    info!("Dispatching {} frames", frame_paths.len());

    let mut failed = 0;
    for path in frame_paths.iter() {
        let frame = GameFrame::open(path)?;
        if let Err(e) = agent.dispatch(frame) {
            if e.is_unknown_frame_handler() {
                return Err(e.into());
            }
            warn!("Frame {:?} was not handled: {}", path, e);
            failed += 1;
        }
    }

    let summary = serde_json::json!({
        "agent": agent.name(),
        "uuid": agent.uuid(),
        "started_at": agent.started_at(),
        "frame_handler": agent.config().frame_handler,
        "frames_dispatched": frame_paths.len(),
        "frames_failed": failed,
        "frames_buffered": agent.game_frame_buffer().len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
