//! Size-rotating line writer for trace output.
//!
//! Lines are appended to a single file. Once the file grows past its size
//! limit it is shifted to `<name>.1`, older backups move up one index, and the
//! oldest beyond the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the trace file is rotated (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const DEFAULT_BACKUPS: usize = 3;

struct OpenFile {
    file: File,
    len: u64,
}

/// Thread-safe appending writer with numbered backups.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    current: Mutex<Option<OpenFile>>,
}

impl RotatingFileWriter {
    /// Writer with the default 10 MiB limit and 3 backups.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            current: Mutex::new(None),
        }
    }

    /// Path of the `index`-th backup (`trustboard-otlp.json.1`, ...).
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening, rotating or writing the file.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut current = self
            .current
            .lock()
            .map_err(|e| io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if current.as_ref().is_some_and(|open| open.len >= self.max_bytes) {
            *current = None;
            self.rotate()?;
        }

        let open = match current.take() {
            Some(open) => open,
            None => Self::open(&self.path)?,
        };
        let open = current.insert(open);

        writeln!(open.file, "{line}")?;
        open.file.flush()?;
        open.len += line.len() as u64 + 1;
        Ok(())
    }

    fn open(path: &Path) -> io::Result<OpenFile> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let len = file.metadata()?.len();
        Ok(OpenFile { file, len })
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}
