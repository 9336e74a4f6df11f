//! Storage and File System Abstractions
//!
//! Provides platform-agnostic traits for the file I/O the artwork cache needs
//! and for scoped key-value persistence.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File system access trait
///
/// Abstracts file I/O operations to support different platforms:
/// - Desktop: direct filesystem access
/// - iOS/Android: sandboxed app directories
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::FileSystemAccess;
///
/// async fn cache_image(fs: &dyn FileSystemAccess, src: &Path, dst: &Path) -> Result<()> {
///     if let Some(parent) = dst.parent() {
///         fs.create_dir_all(parent).await?;
///     }
///     fs.copy_file(src, dst).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    /// Get the application's cache directory
    ///
    /// This directory is suitable for files that can be deleted by the
    /// system when storage is low.
    async fn cache_directory(&self) -> Result<PathBuf>;

    /// Check if a file or directory exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Create a directory and all parent directories if they don't exist
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Copy a file to a new location, overwriting any existing file
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;

    /// Read entire file contents into memory
    async fn read_file(&self, path: &Path) -> Result<Bytes>;

    /// Write data to a file, creating it if it doesn't exist
    async fn write_file(&self, path: &Path, data: Bytes) -> Result<()>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<()>;

    /// List all entries in a directory
    async fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Scoped key-value secure storage trait
///
/// Abstracts platform secure storage:
/// - macOS/iOS: Keychain
/// - Android: Keystore-backed preferences
/// - Windows: DPAPI
/// - Linux: Secret Service / libsecret
///
/// Values are strings; callers serialize structured payloads (JSON) before
/// storing them.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Store a string value under `key`, replacing any previous value.
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a string value.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Delete a value. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists without retrieving it
    async fn has_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_string(key).await?.is_some())
    }
}
