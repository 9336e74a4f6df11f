//! Integration tests for the TrackListController
//!
//! These tests run the complete pipeline (permission flow, enumeration,
//! batched enrichment, concurrent artwork caching, search, and track
//! selection) against in-memory bridge fakes, with call counts and call
//! order recorded where the contracts demand them.

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::media::{AssetQuery, MediaLibrary, PermissionStatus, RawAssetRecord};
use bridge_traits::playback::{PlayerEngine, PlayerSetupOptions, QueuedTrack};
use bridge_traits::storage::{FileSystemAccess, SecureStore};
use bridge_traits::tags::{TagReader, TagRecord};
use bytes::Bytes;
use core_runtime::batch::BatchConfig;
use core_runtime::config::CoreConfig;
use core_service::{LoadState, TrackListController};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// In-memory bridge fakes
// ============================================================================

struct FakeMediaLibrary {
    permission: PermissionStatus,
    records: Vec<RawAssetRecord>,
    fail_enumeration: AtomicBool,
}

impl FakeMediaLibrary {
    fn new(permission: PermissionStatus, records: Vec<RawAssetRecord>) -> Self {
        Self {
            permission,
            records,
            fail_enumeration: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl MediaLibrary for FakeMediaLibrary {
    async fn request_permission(&self) -> BridgeResult<PermissionStatus> {
        Ok(self.permission)
    }

    async fn list_assets(&self, query: AssetQuery) -> BridgeResult<Vec<RawAssetRecord>> {
        if self.fail_enumeration.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed("device busy".to_string()));
        }
        Ok(self.records.iter().take(query.limit).cloned().collect())
    }
}

#[derive(Default)]
struct FakeTagReader {
    tags: HashMap<String, TagRecord>,
    failing_uris: HashSet<String>,
}

#[async_trait]
impl TagReader for FakeTagReader {
    async fn read_tags(&self, uri: &str) -> BridgeResult<TagRecord> {
        if self.failing_uris.contains(uri) {
            return Err(BridgeError::OperationFailed("unreadable file".to_string()));
        }
        Ok(self.tags.get(uri).cloned().unwrap_or_default())
    }
}

/// In-memory filesystem counting underlying copies.
#[derive(Default)]
struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, Bytes>>,
    dirs: Mutex<HashSet<PathBuf>>,
    copy_count: AtomicUsize,
}

impl MemoryFileSystem {
    fn seed_file(&self, path: impl Into<PathBuf>, data: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), Bytes::copy_from_slice(data));
    }

    fn files_under(&self, dir: &Path) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|path| path.starts_with(dir))
            .cloned()
            .collect()
    }

    fn copies(&self) -> usize {
        self.copy_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileSystemAccess for MemoryFileSystem {
    async fn cache_directory(&self) -> BridgeResult<PathBuf> {
        Ok(PathBuf::from("/cache"))
    }

    async fn exists(&self, path: &Path) -> BridgeResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path)
            || self.dirs.lock().unwrap().contains(path))
    }

    async fn create_dir_all(&self, path: &Path) -> BridgeResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> BridgeResult<()> {
        let data = self
            .files
            .lock()
            .unwrap()
            .get(from)
            .cloned()
            .ok_or_else(|| BridgeError::OperationFailed(format!("missing: {}", from.display())))?;
        self.files.lock().unwrap().insert(to.to_path_buf(), data);
        self.copy_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> BridgeResult<Bytes> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| BridgeError::OperationFailed(format!("missing: {}", path.display())))
    }

    async fn write_file(&self, path: &Path, data: Bytes) -> BridgeResult<()> {
        self.files.lock().unwrap().insert(path.to_path_buf(), data);
        Ok(())
    }

    async fn delete_file(&self, path: &Path) -> BridgeResult<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    async fn list_directory(&self, path: &Path) -> BridgeResult<Vec<PathBuf>> {
        Ok(self.files_under(path))
    }
}

#[derive(Default)]
struct MemorySecureStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn set_string(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_string(&self, key: &str) -> BridgeResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> BridgeResult<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Player engine recording transport calls in order.
#[derive(Default)]
struct RecordingPlayerEngine {
    calls: Mutex<Vec<String>>,
    queued: Mutex<Vec<QueuedTrack>>,
}

impl RecordingPlayerEngine {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn queued(&self) -> Vec<QueuedTrack> {
        self.queued.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlayerEngine for RecordingPlayerEngine {
    async fn setup(&self, _options: PlayerSetupOptions) -> BridgeResult<()> {
        self.record("setup");
        Ok(())
    }

    async fn reset(&self) -> BridgeResult<()> {
        self.record("reset");
        Ok(())
    }

    async fn add(&self, track: QueuedTrack) -> BridgeResult<()> {
        self.record("add");
        self.queued.lock().unwrap().push(track);
        Ok(())
    }

    async fn play(&self) -> BridgeResult<()> {
        self.record("play");
        Ok(())
    }

    async fn pause(&self) -> BridgeResult<()> {
        self.record("pause");
        Ok(())
    }

    async fn stop(&self) -> BridgeResult<()> {
        self.record("stop");
        Ok(())
    }

    async fn skip_to_next(&self) -> BridgeResult<()> {
        self.record("skip_to_next");
        Ok(())
    }

    async fn skip_to_previous(&self) -> BridgeResult<()> {
        self.record("skip_to_previous");
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    controller: TrackListController,
    file_system: Arc<MemoryFileSystem>,
    engine: Arc<RecordingPlayerEngine>,
    secure_store: Arc<MemorySecureStore>,
    media_library: Arc<FakeMediaLibrary>,
}

fn record(id: &str, filename: &str, artwork_ref: Option<&str>) -> RawAssetRecord {
    RawAssetRecord {
        id: id.to_string(),
        filename: filename.to_string(),
        uri: format!("file:///music/{}", filename),
        duration_secs: 120.0,
        artist: None,
        artwork_ref: artwork_ref.map(str::to_string),
    }
}

/// Seven raw assets: three with artwork, one `.wma`.
fn seven_records() -> Vec<RawAssetRecord> {
    vec![
        record("a1", "alpha.mp3", Some("/device/art/a1.png")),
        record("a2", "bravo.mp3", None),
        record("a3", "charlie.flac", Some("/device/art/a3.png")),
        record("a4", "track.wma", None),
        record("a5", "delta.ogg", None),
        record("a6", "echo.mp3", Some("/device/art/a6.png")),
        record("a7", "foxtrot.mp3", None),
    ]
}

fn build_harness(
    permission: PermissionStatus,
    records: Vec<RawAssetRecord>,
    tag_reader: FakeTagReader,
) -> Harness {
    let media_library = Arc::new(FakeMediaLibrary::new(permission, records));
    let file_system = Arc::new(MemoryFileSystem::default());
    let secure_store = Arc::new(MemorySecureStore::default());
    let engine = Arc::new(RecordingPlayerEngine::default());

    for id in ["a1", "a3", "a6"] {
        file_system.seed_file(format!("/device/art/{}.png", id), b"png-bytes");
    }

    let config = CoreConfig::builder()
        .cache_dir("/cache")
        .media_library(media_library.clone())
        .tag_reader(Arc::new(tag_reader))
        .player_engine(engine.clone())
        .file_system(file_system.clone())
        .secure_store(secure_store.clone())
        .batch(BatchConfig {
            batch_size: 5,
            batch_delay: Duration::from_millis(1),
        })
        .build()
        .unwrap();

    Harness {
        controller: TrackListController::new(config),
        file_system,
        engine,
        secure_store,
        media_library,
    }
}

/// Poll until `condition` holds or a second passes.
async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("Condition not met within timeout");
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn seven_assets_reveal_six_with_three_artworks() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    let controller = harness.controller.clone();

    controller.initialize().await;
    controller.load_library().await.unwrap();

    let visible = controller.visible_assets().await;
    assert_eq!(visible.len(), 6);
    assert!(visible.iter().all(|a| !a.filename.ends_with(".wma")));
    assert_eq!(controller.load_state().await, LoadState::Ready);

    // Artwork caching runs concurrently; wait for the worker to land all
    // three files.
    let fs = harness.file_system.clone();
    wait_until(move || fs.files_under(Path::new("/cache/artwork")).len() == 3).await;

    let mut resolved = 0;
    for _ in 0..200 {
        let assets = controller.all_assets().await;
        resolved = assets.iter().filter(|a| a.artwork_uri.is_some()).count();
        if resolved == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(resolved, 3);

    assert_eq!(harness.file_system.copies(), 3);
}

#[tokio::test]
async fn extraction_failure_keeps_the_asset_with_defaults() {
    let mut tag_reader = FakeTagReader::default();
    tag_reader
        .failing_uris
        .insert("file:///music/bravo.mp3".to_string());

    let harness = build_harness(PermissionStatus::Granted, seven_records(), tag_reader);
    harness.controller.load_library().await.unwrap();

    let assets = harness.controller.all_assets().await;
    let bravo = assets.iter().find(|a| a.filename == "bravo.mp3").unwrap();
    assert_eq!(bravo.artist.as_deref(), Some("Unknown Artist"));
    assert_eq!(bravo.album.as_deref(), Some("Unknown Album"));
}

#[tokio::test]
async fn permission_denial_leaves_the_list_empty() {
    let harness = build_harness(
        PermissionStatus::Denied,
        seven_records(),
        FakeTagReader::default(),
    );

    let result = harness.controller.load_library().await;
    assert!(result.is_err());
    assert!(harness.controller.visible_assets().await.is_empty());
    assert_eq!(harness.controller.load_state().await, LoadState::Idle);
}

#[tokio::test]
async fn selecting_a_track_issues_reset_add_play() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    harness.controller.load_library().await.unwrap();

    harness.controller.select_track("a2").await.unwrap();

    assert_eq!(harness.engine.calls(), vec!["reset", "add", "play"]);

    let queued = harness.engine.queued();
    assert_eq!(queued.len(), 1);
    // No title tag was extracted, so the filename stands in.
    assert_eq!(queued[0].title, "bravo.mp3");
    assert_eq!(queued[0].artist, "Unknown Artist");
}

#[tokio::test]
async fn selecting_an_unknown_asset_fails() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    harness.controller.load_library().await.unwrap();

    assert!(harness.controller.select_track("missing").await.is_err());
    assert!(harness.engine.calls().is_empty());
}

#[tokio::test]
async fn search_narrows_and_clearing_restores() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    harness.controller.load_library().await.unwrap();

    harness.controller.set_search_query("ALPHA").await;
    let narrowed = harness.controller.visible_assets().await;
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].filename, "alpha.mp3");

    // A broader query widens again; it is not constrained by the previous
    // narrow view.
    harness.controller.set_search_query("a").await;
    assert!(harness.controller.visible_assets().await.len() > 1);

    harness.controller.set_search_query("").await;
    assert_eq!(harness.controller.visible_assets().await.len(), 6);
}

#[tokio::test]
async fn reloading_copies_each_artwork_at_most_once() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    let controller = harness.controller.clone();

    controller.load_library().await.unwrap();
    let fs = harness.file_system.clone();
    wait_until(move || fs.files_under(Path::new("/cache/artwork")).len() == 3).await;

    controller.load_library().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(harness.file_system.copies(), 3);
    assert_eq!(
        harness
            .file_system
            .files_under(Path::new("/cache/artwork"))
            .len(),
        3
    );
}

#[tokio::test]
async fn enumeration_failure_keeps_the_last_known_list() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    harness.controller.load_library().await.unwrap();
    assert_eq!(harness.controller.visible_assets().await.len(), 6);

    harness
        .media_library
        .fail_enumeration
        .store(true, Ordering::SeqCst);

    let result = harness.controller.load_library().await;
    assert!(result.is_err());
    assert_eq!(harness.controller.visible_assets().await.len(), 6);
    assert_eq!(harness.controller.load_state().await, LoadState::Ready);
}

#[tokio::test]
async fn loaded_artwork_set_round_trips_through_the_secure_store() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );
    harness.controller.load_library().await.unwrap();

    let store = harness.secure_store.clone();
    wait_until(move || {
        store
            .values
            .lock()
            .unwrap()
            .get("artwork_cache_data")
            .map(|payload| payload.contains("a1") && payload.contains("a3") && payload.contains("a6"))
            .unwrap_or(false)
    })
    .await;
}

#[tokio::test]
async fn shutdown_before_load_reveals_nothing() {
    let harness = build_harness(
        PermissionStatus::Granted,
        seven_records(),
        FakeTagReader::default(),
    );

    harness.controller.shutdown();
    harness.controller.load_library().await.unwrap();

    assert!(harness.controller.all_assets().await.is_empty());
    assert_eq!(harness.controller.load_state().await, LoadState::Idle);
}

#[tokio::test]
async fn extracted_tags_surface_in_the_queue() {
    let mut tag_reader = FakeTagReader::default();
    tag_reader.tags.insert(
        "file:///music/alpha.mp3".to_string(),
        TagRecord {
            album: Some("First Album".to_string()),
            artist: Some("First Artist".to_string()),
            name: Some("Alpha Song".to_string()),
            ..TagRecord::default()
        },
    );

    let harness = build_harness(PermissionStatus::Granted, seven_records(), tag_reader);
    harness.controller.load_library().await.unwrap();
    harness.controller.select_track("a1").await.unwrap();

    let queued = harness.engine.queued();
    assert_eq!(queued[0].title, "Alpha Song");
    assert_eq!(queued[0].artist, "First Artist");
}
