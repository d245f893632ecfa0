use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::AppError;

/// Where log output should go. The terminal belongs to the UI, so logs only
/// ever go to a file.
pub fn resolve_log_path(explicit: Option<&Path>, rust_log_set: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if rust_log_set => AppDirs::log_path(),
        None => None,
    }
}

/// Installs the global logger writing to `path`. Level comes from
/// `RUST_LOG`, defaulting to `info`.
pub fn init_file_logger(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("flinch {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}
