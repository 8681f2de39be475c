/// Configuration resolution module
///
/// This module handles:
/// - Resolving the backing data file from flag, environment, or default
/// - Deriving the archive and export directories next to the data file
use log::debug;
use std::env;
use std::path::PathBuf;

/// Environment variable consulted when no --data-file flag is given.
pub const DATA_FILE_ENV: &str = "REPAIR_DESK_DATA";

/// Resolved filesystem locations for one invocation.
#[derive(Debug, Clone)]
pub struct Paths {
    /// The backing xlsx file (may not exist yet).
    pub data_file: PathBuf,
    /// Timestamped copies of imported workbooks.
    pub archive_dir: PathBuf,
    /// Default destination for generated exports and reports.
    pub export_dir: PathBuf,
}

impl Paths {
    /// Resolution order: explicit flag, then REPAIR_DESK_DATA, then
    /// service_data.xlsx under the platform data directory (falling back
    /// to ./data for systems without one).
    pub fn resolve(data_file: Option<PathBuf>) -> Paths {
        let data_file = data_file
            .or_else(|| env::var(DATA_FILE_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(default_data_file);
        debug!("Using data file {}", data_file.display());

        let data_dir = data_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Paths { archive_dir: data_dir.join("archive"), export_dir: data_dir.join("exports"), data_file }
    }
}

fn default_data_file() -> PathBuf {
    dirs::data_dir().map(|p| p.join("repair-desk")).unwrap_or_else(|| PathBuf::from("data")).join("service_data.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flag_wins() {
        let paths = Paths::resolve(Some(PathBuf::from("/tmp/ledger/data.xlsx")));
        assert_eq!(paths.data_file, PathBuf::from("/tmp/ledger/data.xlsx"));
        assert_eq!(paths.archive_dir, PathBuf::from("/tmp/ledger/archive"));
        assert_eq!(paths.export_dir, PathBuf::from("/tmp/ledger/exports"));
    }

    #[test]
    fn test_bare_filename_gets_relative_dirs() {
        let paths = Paths::resolve(Some(PathBuf::from("data.xlsx")));
        assert_eq!(paths.archive_dir, PathBuf::from("./archive"));
        assert_eq!(paths.export_dir, PathBuf::from("./exports"));
    }
}
