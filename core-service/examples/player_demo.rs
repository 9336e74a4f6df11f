//! Desktop demo: scan a music folder, enrich it, and print the track list.
//!
//! ```sh
//! cargo run -p core-service --example player_demo -- ~/Music
//! ```

use anyhow::Context;
use async_trait::async_trait;
use bridge_desktop::{FolderMediaLibrary, KeyringSecureStore, LoftyTagReader, TokioFileSystem};
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::playback::{PlayerEngine, PlayerSetupOptions, QueuedTrack};
use bridge_traits::storage::FileSystemAccess;
use core_runtime::config::CoreConfig;
use core_runtime::logging::{init_logging, LoggingConfig};
use core_service::TrackListController;
use std::sync::Arc;
use tracing::info;

/// Engine stand-in: logs transport calls instead of driving an audio stack.
struct LoggingPlayerEngine;

#[async_trait]
impl PlayerEngine for LoggingPlayerEngine {
    async fn setup(&self, options: PlayerSetupOptions) -> BridgeResult<()> {
        info!(?options, "player setup");
        Ok(())
    }

    async fn reset(&self) -> BridgeResult<()> {
        info!("player reset");
        Ok(())
    }

    async fn add(&self, track: QueuedTrack) -> BridgeResult<()> {
        info!(title = %track.title, artist = %track.artist, "queued");
        Ok(())
    }

    async fn play(&self) -> BridgeResult<()> {
        info!("play");
        Ok(())
    }

    async fn pause(&self) -> BridgeResult<()> {
        info!("pause");
        Ok(())
    }

    async fn stop(&self) -> BridgeResult<()> {
        info!("stop");
        Ok(())
    }

    async fn skip_to_next(&self) -> BridgeResult<()> {
        info!("skip to next");
        Ok(())
    }

    async fn skip_to_previous(&self) -> BridgeResult<()> {
        info!("skip to previous");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default()).ok();

    let music_dir = std::env::args()
        .nth(1)
        .context("Usage: player_demo <music-dir>")?;

    let file_system = Arc::new(TokioFileSystem::new());
    let cache_dir = file_system.cache_directory().await?;

    let config = CoreConfig::builder()
        .cache_dir(cache_dir)
        .media_library(Arc::new(FolderMediaLibrary::new(&music_dir)))
        .tag_reader(Arc::new(LoftyTagReader::new()))
        .player_engine(Arc::new(LoggingPlayerEngine))
        .file_system(file_system)
        .secure_store(Arc::new(KeyringSecureStore::new()))
        .build()?;

    let controller = TrackListController::new(config);
    controller.initialize().await;
    controller.load_library().await?;

    for asset in controller.visible_assets().await {
        println!(
            "{:>6}  {}  -  {}",
            asset.format_duration(),
            asset.display_title(),
            asset.display_artist(),
        );
    }

    if let Some(first) = controller.visible_assets().await.first() {
        controller.select_track(&first.id).await?;
    }

    controller.shutdown();
    Ok(())
}
