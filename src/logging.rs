use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing::Level;

// LogSink keeps the log file subscriber installed for the current thread
// for as long as it is alive. Dropping it closes the file.
pub struct LogSink {
    path: PathBuf,
    _guard: DefaultGuard,
}

impl LogSink {
    // Opens (or creates) the log file in append mode and routes every
    // tracing event of this thread into it, one timestamped line each.
    pub fn open(path: &Path) -> io::Result<LogSink> {
        let file = open_append(path)?;
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_max_level(Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);

        Ok(LogSink {
            path: path.to_path_buf(),
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn open_append(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .append(true)
        .create(true)
        .mode(0o664)
        .open(path)
}

#[cfg(not(unix))]
fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}
