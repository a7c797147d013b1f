//! Session store checkpointed to a YAML file.

use super::{SessionError, SessionStore};
use log::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

type Entries = BTreeMap<String, String>;

/// Requests handled by the saver thread, in the order they were sent.
///
enum SaverCommand {
    Checkpoint(Entries),
    Flush(mpsc::Sender<Result<(), SessionError>>),
}

struct Inner {
    entries: Entries,
    saver: Option<mpsc::Sender<SaverCommand>>,
}

/// Session store backed by a YAML map on disk.
///
/// The whole map is read once by `open`. Writes happen on a dedicated saver
/// thread, so `set` never blocks on the disk. The saver writes through a
/// sibling temp file and a rename, so a crash mid-write leaves either the old
/// or the new checkpoint, never a torn one. Snapshots queued behind a newer
/// one are skipped; the file only ever moves forward.
pub struct FileSessionStore {
    path: PathBuf,
    inner: Mutex<Inner>,
    writer: Option<JoinHandle<()>>,
}

impl FileSessionStore {
    /// Open the session at `path`, restoring any previous checkpoint, and
    /// start its saver thread.
    ///
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| SessionError::ReadFailed {
                path: path.clone(),
                source: e,
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(&contents)
                    .map_err(|e| SessionError::Deserialization(e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };
        debug!(
            "Restored {} session entries from {}",
            entries.len(),
            path.display()
        );

        let (saver, receiver) = mpsc::channel();
        let saver_path = path.clone();
        let writer = thread::Builder::new()
            .name("session-saver".to_string())
            .spawn(move || run_saver(&saver_path, receiver))
            .map_err(|e| SessionError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;

        Ok(FileSessionStore {
            path,
            inner: Mutex::new(Inner {
                entries,
                saver: Some(saver),
            }),
            writer: Some(writer),
        })
    }

    /// Location of the session file.
    ///
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn saver_gone(&self) -> SessionError {
        SessionError::WriteFailed {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "session saver stopped"),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.entries.insert(key.to_owned(), value.to_owned());
        // sent under the lock so snapshots queue in mutation order
        let snapshot = SaverCommand::Checkpoint(inner.entries.clone());
        match &inner.saver {
            Some(saver) if saver.send(snapshot).is_ok() => Ok(()),
            _ => Err(self.saver_gone()),
        }
    }

    fn flush(&self) -> Result<(), SessionError> {
        let (reply, done) = mpsc::channel();
        {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            match &inner.saver {
                Some(saver) if saver.send(SaverCommand::Flush(reply)).is_ok() => {}
                _ => return Err(self.saver_gone()),
            }
        }
        done.recv().map_err(|_| self.saver_gone())?
    }
}

impl Drop for FileSessionStore {
    fn drop(&mut self) {
        // closing the channel lets the saver finish its queue and exit
        self.inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .saver
            .take();
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                error!("Session saver for {} panicked", self.path.display());
            }
        }
    }
}

/// Saver thread body. Drains everything queued, writes only the newest
/// snapshot of the batch, then answers the flushes of that batch.
///
fn run_saver(path: &Path, receiver: mpsc::Receiver<SaverCommand>) {
    let mut unreported: Option<SessionError> = None;
    while let Ok(first) = receiver.recv() {
        let mut latest = None;
        let mut waiters = Vec::new();
        let mut next = Some(first);
        while let Some(command) = next.take() {
            match command {
                SaverCommand::Checkpoint(entries) => latest = Some(entries),
                SaverCommand::Flush(reply) => waiters.push(reply),
            }
            next = receiver.try_recv().ok();
        }

        if let Some(entries) = latest {
            if let Err(e) = write_checkpoint(path, &entries) {
                error!("Failed to checkpoint session: {}", e);
                unreported = Some(e);
            }
        }
        for reply in waiters {
            let _ = reply.send(match unreported.take() {
                Some(e) => Err(e),
                None => Ok(()),
            });
        }
    }
    debug!("Session saver for {} stopped.", path.display());
}

fn write_checkpoint(path: &Path, entries: &Entries) -> Result<(), SessionError> {
    let content =
        serde_yaml::to_string(entries).map_err(|e| SessionError::Serialization(e.to_string()))?;
    let write_failed = |e| SessionError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    let tmp_path = path.with_extension("yml.tmp");
    let mut file = fs::File::create(&tmp_path).map_err(write_failed)?;
    write!(file, "{}", content).map_err(write_failed)?;
    file.sync_all().map_err(write_failed)?;
    fs::rename(&tmp_path, path).map_err(write_failed)?;
    Ok(())
}
