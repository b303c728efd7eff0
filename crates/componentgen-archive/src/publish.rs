//! Archive publication: staging to final promotion.
//!
//! The engine writes only to the staging archive; the final archive is
//! replaced here, after the run has fully succeeded. Failed runs never
//! reach this module, so the final archive stays exactly as it was.

use crate::plan::ArchivePlan;
use crate::write::archive_error;
use componentgen_core::error::{GenerateError, Result};
use std::fs;

/// Promote the staging archive to the final location.
///
/// Full replacement, not a merge: any prior final archive is discarded
/// wholesale. The staging archive is complete by the time this runs, so
/// the switch is a single same-filesystem rename.
pub fn publish(plan: &ArchivePlan) -> Result<()> {
    if !plan.staging_archive.is_file() {
        return Err(GenerateError::Archive {
            path: plan.staging_archive.clone(),
            reason: "staging archive was not produced".to_string(),
        });
    }
    if let Some(parent) = plan.final_archive.parent() {
        fs::create_dir_all(parent).map_err(|e| archive_error(&plan.final_archive, e))?;
    }
    if plan.final_archive.exists() {
        fs::remove_file(&plan.final_archive)
            .map_err(|e| archive_error(&plan.final_archive, e))?;
    }
    fs::rename(&plan.staging_archive, &plan.final_archive)
        .map_err(|e| archive_error(&plan.final_archive, e))?;
    tracing::info!(archive = %plan.final_archive.display(), "published component archive");
    Ok(())
}

/// Called after a failed run: the staging archive is kept on disk for
/// diagnosis, its location logged.
pub fn retain_staging_for_diagnosis(plan: &ArchivePlan) {
    if plan.staging_archive.is_file() {
        tracing::debug!(
            staging = %plan.staging_archive.display(),
            "run failed; staging archive retained"
        );
    }
}
