use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default log file, used when logging is requested without a path
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("flinch");
            Some(state_dir.join("flinch.log"))
        } else {
            ProjectDirs::from("", "", "flinch")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("flinch.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_ends_with_file_name() {
        if let Some(path) = AppDirs::log_path() {
            assert!(path.ends_with("flinch.log"));
        }
    }
}
