use crate::errors::StorageError;
use crate::models::DayState;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::{debug, info};

/// Reads the persisted state. A missing file starts a fresh day 1; a file
/// that cannot be read or decoded is an error, never a silent reset.
pub async fn load_state(path: &Path) -> Result<DayState, StorageError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no state file at {}, starting at day 1", path.display());
            Ok(DayState::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Writes the state to a temp file in the same directory, syncs it, and
/// renames it over `path`. Readers see either the old or the new state, and
/// the new one is on disk before this returns.
pub async fn persist_state(path: &Path, state: &DayState) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(state)?;
    let path = path.to_path_buf();
    task::spawn_blocking(move || atomic_write(&path, &payload)).await??;
    Ok(())
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;

    sync_parent_dir(parent);
    Ok(())
}

fn sync_parent_dir(parent: &Path) {
    #[cfg(unix)]
    if let Err(err) = std::fs::File::open(parent).and_then(|dir| dir.sync_all()) {
        debug!(path = %parent.display(), "parent directory sync failed (best-effort): {err}");
    }
    #[cfg(not(unix))]
    let _ = parent;
}
