use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use azalea_registry::builtin::{BlockKind, ItemKind};
use hookline_client::block::{self, VanillaPalette};
use hookline_client::config::ClientConfig;
use hookline_client::net::{ChannelSink, PacketWriter};
use hookline_client::session::Session;
use hookline_engine::host::Inventory;
use hookline_engine::interaction::HotbarSlot;
use hookline_engine::module::Module;
use hookline_engine::movement::MovementInput;
use hookline_engine::world::World;

/// Ticks the demo runs for when `--ticks` is not given.
const DEFAULT_TICKS: u64 = 200;

#[tokio::main]
async fn main() {
    let demo_mode = std::env::args().any(|a| a == "--demo");
    let config_path: Option<PathBuf> = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(PathBuf::from);
    let record_path: Option<PathBuf> = std::env::args()
        .skip_while(|a| a != "--record")
        .nth(1)
        .map(PathBuf::from);
    let ticks: u64 = std::env::args()
        .skip_while(|a| a != "--ticks")
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    let config = match config_path {
        Some(path) => match ClientConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{:#}", e);
                return;
            }
        },
        None => ClientConfig::default(),
    };

    if !demo_mode {
        tracing::info!("hookline -- nothing to do without --demo");
        return;
    }

    let record_path = record_path.or_else(|| config.record_path.clone());
    if let Err(e) = run_demo(config, record_path, ticks).await {
        tracing::error!("Demo failed: {:#}", e);
    }
}

/// Walk off the edge of a flat world with Scaffold on, bridging as we go.
async fn run_demo(mut config: ClientConfig, record_path: Option<PathBuf>, ticks: u64) -> Result<()> {
    tracing::info!("hookline -- interaction engine demo");

    let world = Arc::new(World::new(Arc::new(VanillaPalette::new())));
    let layers = [
        (60, block::block_id(BlockKind::Bedrock)),
        (61, block::block_id(BlockKind::Stone)),
        (62, block::block_id(BlockKind::Stone)),
        (63, block::block_id(BlockKind::Dirt)),
        (64, block::block_id(BlockKind::Dirt)),
    ];
    world.generate_flat(config.world_radius, &layers);
    tracing::info!("World ready: {} chunks loaded", world.chunk_count());

    // Start two blocks short of the edge, facing +Z.
    let edge = f64::from(config.world_radius * 16);
    config.spawn = [0.5, 65.0, edge - 1.5];
    if !config.enabled_modules.iter().any(|m| m.eq_ignore_ascii_case("Scaffold")) {
        config.enabled_modules.push("Scaffold".into());
    }

    let (network, rx) = ChannelSink::channel();
    let writer = PacketWriter::new(config.compression_threshold);
    let writer_task = tokio::spawn(async move {
        match record_path {
            Some(path) => {
                let mut file = tokio::fs::File::create(&path)
                    .await
                    .with_context(|| format!("creating {}", path.display()))?;
                let written = writer.run(rx, &mut file).await?;
                tracing::info!("Recorded {} packets to {}", written, path.display());
                Ok::<u64, anyhow::Error>(written)
            }
            None => writer.run(rx, &mut tokio::io::sink()).await,
        }
    });

    let mut session = Session::new(&config, world, network)?;
    let active: Vec<&str> = session
        .modules()
        .iter()
        .filter(|m| m.is_active())
        .map(Module::name)
        .collect();
    tracing::info!("Active modules: {}", active.join(", "));

    let hotbar = session.hotbar().state().clone();
    hotbar.set_item(slot(0), Some(ItemKind::DiamondPickaxe));
    hotbar.set_item(slot(3), Some(ItemKind::Cobblestone));
    session.hotbar_mut().sync_to_client()?;
    session.player_mut().set_sprinting(true);

    let input = MovementInput {
        forward: 1.0,
        ..Default::default()
    };
    let start = std::time::Instant::now();
    for _ in 0..ticks {
        session.tick(input)?;
    }
    let end = session.player().position();
    tracing::info!(
        "Ran {} ticks in {:?}: player at ({:.2}, {:.2}, {:.2}), {} swings",
        session.ticks(),
        start.elapsed(),
        end.x,
        end.y,
        end.z,
        session.player().swings()
    );

    // Dropping the session closes the packet queue.
    drop(session);
    let written = writer_task.await.context("packet writer panicked")??;
    tracing::info!("Packet stream closed after {} packets", written);
    Ok(())
}

fn slot(index: u8) -> HotbarSlot {
    HotbarSlot::new(index).unwrap_or_default()
}
