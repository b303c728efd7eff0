//! Archive path planning.

use componentgen_core::config::schema::is_plain_segment;
use componentgen_core::error::{GenerateError, Result};
use std::path::{Path, PathBuf};

/// Subdirectory of the build output directory holding the final archive.
pub const DISTRIBUTIONS_DIR: &str = "distributions";

/// Staging and final archive locations for one project build.
///
/// A pure function of project identity and the build output directory:
/// repeated calls with the same inputs yield the same paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePlan {
    /// Archive consumed by downstream packaging steps.
    pub final_archive: PathBuf,
    /// Write target for the generation run, promoted only on full success.
    pub staging_archive: PathBuf,
}

impl ArchivePlan {
    pub fn for_project(build_dir: &Path, name: &str, version: &str) -> Result<Self> {
        if !is_plain_segment(name) {
            return Err(GenerateError::Config(format!(
                "project name '{}' is not usable in an archive file name",
                name
            )));
        }
        if !is_plain_segment(version) {
            return Err(GenerateError::Config(format!(
                "project version '{}' is not usable in an archive file name",
                version
            )));
        }
        let stem = format!("{}-{}", name, version);
        Ok(Self {
            final_archive: build_dir
                .join(DISTRIBUTIONS_DIR)
                .join(format!("{}.zip", stem)),
            staging_archive: build_dir.join(format!("{}-temp.zip", stem)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_for_widgets_project() {
        let plan = ArchivePlan::for_project(Path::new("/build"), "widgets", "1.0").unwrap();
        assert_eq!(
            plan.final_archive,
            PathBuf::from("/build/distributions/widgets-1.0.zip")
        );
        assert_eq!(
            plan.staging_archive,
            PathBuf::from("/build/widgets-1.0-temp.zip")
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = ArchivePlan::for_project(Path::new("/build"), "widgets", "1.0").unwrap();
        let b = ArchivePlan::for_project(Path::new("/build"), "widgets", "1.0").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_plan_rejects_path_separators() {
        assert!(ArchivePlan::for_project(Path::new("/build"), "wid/gets", "1.0").is_err());
        assert!(ArchivePlan::for_project(Path::new("/build"), "widgets", "../1.0").is_err());
    }
}
