//! The port record: a file holding the port the server listens on, so other
//! local tools can find it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// A written port record. The file is deleted by [`PortRecord::remove`], or
/// when the record is dropped without being removed.
///
/// If the process dies without unwinding (e.g. `SIGKILL`) the file is left
/// behind with a stale port.
#[derive(Debug)]
pub struct PortRecord {
    path: PathBuf,
    port: u16,
    removed: bool,
}

impl PortRecord {
    /// Writes `port` in decimal as the entire content of `path`, replacing
    /// any previous record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortRecordWrite`] if the file cannot be written.
    pub fn create(path: impl Into<PathBuf>, port: u16) -> Result<Self> {
        let path = path.into();
        fs::write(&path, port.to_string()).map_err(|source| Error::PortRecordWrite {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), port, "wrote port record");

        Ok(Self {
            path,
            port,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Deletes the file. A file that is already gone is fine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortRecordRemove`] if the file exists but cannot be
    /// deleted.
    pub fn remove(mut self) -> Result<()> {
        self.removed = true;
        delete(&self.path).map_err(|source| Error::PortRecordRemove {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for PortRecord {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(error) = delete(&self.path) {
            tracing::warn!(path = %self.path.display(), %error, "failed to remove port record");
        }
    }
}

fn delete(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed port record");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error),
    }
}
