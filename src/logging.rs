//! Debug logging to a file.
//!
//! The wizard owns the terminal (raw mode, alternate screen), so log
//! records never go to stderr. Logging is opt-in: without a file no logger
//! is installed and every `log` macro is a no-op.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use env_logger::Target;
use log::LevelFilter;

#[derive(Debug, Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    verbose: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write log records to this file (truncated on start).
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Log every action and directive, not just run milestones.
    #[must_use]
    pub fn with_verbose(mut self, enable: bool) -> Self {
        self.verbose = enable;
        self
    }

    pub fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Install the global logger.
    ///
    /// Returns `Ok(false)` when no file was configured. The file handle is
    /// handed to the logger and lives until the process exits.
    pub fn start(&self) -> io::Result<bool> {
        let Some(file_name) = &self.file_name else {
            return Ok(false);
        };

        let fd = open_log_file(file_name)?;

        env_logger::builder()
            .filter_level(self.level())
            .format_timestamp_millis()
            .target(Target::Pipe(Box::new(fd)))
            .try_init()
            .map_err(io::Error::other)?;

        Ok(true)
    }
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}
