use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tracing::info;

/// Notices edits to the arena config file.
///
/// The parent directory is watched rather than the file itself so editors
/// that save by replacing the file are still picked up.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    changes: Receiver<()>,
}

impl ConfigWatcher {
    /// Drain pending notifications; true if the file changed since the last call.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changes.try_iter().count() > 0
    }
}

pub fn start(path: &Path) -> Result<ConfigWatcher> {
    info!("Initializing config watcher...");
    let file_name: OsString = path
        .file_name()
        .with_context(|| format!("config path {} has no file name", path.display()))?
        .to_owned();

    let (tx, changes) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if (event.kind.is_modify() || event.kind.is_create())
                && event.paths.iter().any(|p| p.file_name() == Some(file_name.as_os_str()))
            {
                // The receiver is gone once the run ends; nothing left to notify.
                let _ = tx.send(());
            }
        }
        Err(e) => tracing::error!("Error watching config file: {e:?}"),
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    info!("Config watcher started for {}.", path.display());
    Ok(ConfigWatcher { _watcher: watcher, changes })
}
