//! Durable key-value storage behind the persistent mirror
//!
//! `FileStore` keeps the whole map in memory and hands snapshots to a
//! background writer thread, so `set` never touches the disk on the caller's
//! thread.

use crate::{Result, StoriesError};
use crossbeam_channel::{unbounded, Sender};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Minimal string key-value interface.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Volatile store, used as the fallback when no durable store is available
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

enum WriterCommand {
    Write(BTreeMap<String, String>),
    Flush(Sender<()>),
}

/// JSON file store with a fire-and-forget background writer.
pub struct FileStore {
    entries: BTreeMap<String, String>,
    writer: Option<Sender<WriterCommand>>,
    handle: Option<JoinHandle<()>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// reported as `StorageUnavailable`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<BTreeMap<String, String>>(&bytes).map_err(|e| {
                StoriesError::StorageUnavailable(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoriesError::StorageUnavailable(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "opened file store");

        let (tx, rx) = unbounded::<WriterCommand>();
        let writer_path = path.clone();
        let handle = thread::Builder::new()
            .name("store-writer".to_string())
            .spawn(move || {
                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        WriterCommand::Write(mut snapshot) => {
                            // Only the newest queued snapshot matters
                            let mut acks = Vec::new();
                            for next in rx.try_iter() {
                                match next {
                                    WriterCommand::Write(s) => snapshot = s,
                                    WriterCommand::Flush(ack) => acks.push(ack),
                                }
                            }
                            if let Err(e) = write_snapshot(&writer_path, &snapshot) {
                                warn!(
                                    path = %writer_path.display(),
                                    error = %e,
                                    "failed to persist store"
                                );
                            }
                            for ack in acks {
                                let _ = ack.send(());
                            }
                        }
                        WriterCommand::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            })?;

        Ok(Self {
            entries,
            writer: Some(tx),
            handle: Some(handle),
        })
    }

    /// Block until every write queued so far has hit the disk.
    pub fn flush(&self) -> Result<()> {
        let writer = self
            .writer
            .as_ref()
            .ok_or_else(|| StoriesError::StorageUnavailable("writer stopped".to_string()))?;
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        writer
            .send(WriterCommand::Flush(ack_tx))
            .map_err(|_| StoriesError::StorageUnavailable("writer stopped".to_string()))?;
        ack_rx
            .recv()
            .map_err(|_| StoriesError::StorageUnavailable("writer stopped".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        let snapshot = self.entries.clone();
        match &self.writer {
            Some(writer) => writer
                .send(WriterCommand::Write(snapshot))
                .map_err(|_| StoriesError::StorageUnavailable("writer stopped".to_string())),
            None => Err(StoriesError::StorageUnavailable("writer stopped".to_string())),
        }
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain and exit
        self.writer.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Write the snapshot to a uniquely named sibling, then rename it over `path`.
fn write_snapshot(path: &Path, snapshot: &BTreeMap<String, String>) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut tmp, snapshot)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
