use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::config::LogLevel;

/// Send `tracing` output to `path`. The terminal belongs to the UI, so logs never go to stdout.
///
/// Returns false when logging is switched off.
pub fn init_logging(level: LogLevel, path: &Path) -> io::Result<bool> {
    let Some(level) = level.to_tracing_level() else {
        return Ok(false);
    };
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(io::Error::other)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_does_not_touch_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("off.log");
        assert!(!init_logging(LogLevel::Off, &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn writes_events_to_file_in_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file-browser.log");

        assert!(init_logging(LogLevel::Info, &path).unwrap());
        tracing::info!(path = "a/b", "listing merged");
        tracing::debug!("filtered out");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("listing merged"));
        assert!(written.contains("a/b"));
        assert!(!written.contains("filtered out"));
    }
}
