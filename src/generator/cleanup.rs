use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

/// Removes `dir` and everything below it.
///
/// An absent directory is success, so the rollback path and the [`CrashGuard`] can both
/// call this for the same directory in any order.
pub fn remove_output_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Removes an output directory when dropped while armed.
///
/// Armed for the duration of a generation run and disarmed once the run returns, so
/// the directory only goes away when the run unwinds.
#[derive(Debug)]
pub struct CrashGuard {
    dir: PathBuf,
    armed: bool,
}

impl CrashGuard {
    pub fn arm(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            armed: true,
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Drop for CrashGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if std::thread::panicking() {
            error!(dir = %self.dir.display(), "Generation panicked, removing output directory");
        } else {
            warn!(dir = %self.dir.display(), "Generation abandoned, removing output directory");
        }
        if let Err(e) = remove_output_dir(&self.dir) {
            error!(dir = %self.dir.display(), error = %e, "Failed to remove output directory");
        }
    }
}
