//! # Chat Transcript Cache
//!
//! File: server/src/client/transcript.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Best-effort local persistence of the chat transcript, stored as a JSON
//! array under the key `chat_history`.
//!
//! - [`TranscriptStore::save_chat_history`] never fails. Serialization and
//!   storage errors are logged at debug level and dropped.
//! - [`TranscriptStore::load_chat_history`] never fails. A missing key,
//!   unreadable storage or corrupt JSON all yield an empty list.
//!
//! ## Architecture
//!
//! Storage sits behind the [`KeyValueStore`] trait. [`FileStore`] keeps one
//! `<key>.json` file per key inside a directory; tests swap in in-memory and
//! always-failing stores.
//!
use crate::core::error::{MotivError, Result};
use crate::models::ChatMessage;
use anyhow::{anyhow, Context};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage key of the transcript.
pub const HISTORY_KEY: &str = "chat_history";

/// Minimal string key/value storage.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` if the key has never been set.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// A [`KeyValueStore`] backed by one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create directory {}", self.dir.display()))?;
            debug!("Created transcript directory: {}", self.dir.display());
        } else if !self.dir.is_dir() {
            return Err(anyhow!(MotivError::Storage(format!(
                "Path exists but is not a directory: {}",
                self.dir.display()
            ))));
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!(MotivError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .map_err(|e| MotivError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!(MotivError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            )))),
        }
    }
}

/// The transcript cache on top of some [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct TranscriptStore<S> {
    store: S,
}

impl TranscriptStore<FileStore> {
    /// Transcript cache kept in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(FileStore::new(dir))
    }
}

impl<S: KeyValueStore> TranscriptStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save_chat_history(&self, history: &[ChatMessage]) {
        let result = serde_json::to_string(history)
            .context("Failed to serialize chat history")
            .and_then(|json| self.store.set_item(HISTORY_KEY, &json));
        if let Err(e) = result {
            debug!("Ignoring chat history save failure: {:#}", e);
        }
    }

    pub fn load_chat_history(&self) -> Vec<ChatMessage> {
        let raw = match self.store.get_item(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                debug!("Chat history unavailable: {:#}", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!("Discarding unreadable chat history: {}", e);
            Vec::new()
        })
    }

    /// Appends messages to the stored transcript.
    pub fn append(&self, messages: &[ChatMessage]) {
        let mut history = self.load_chat_history();
        history.extend_from_slice(messages);
        self.save_chat_history(&history);
    }

    pub fn clear_chat_history(&self) {
        if let Err(e) = self.store.remove_item(HISTORY_KEY) {
            debug!("Ignoring chat history clear failure: {:#}", e);
        }
    }
}
