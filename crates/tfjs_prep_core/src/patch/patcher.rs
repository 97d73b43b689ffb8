//! File patcher.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{PatchError, PatchResult};
use super::types::{apply_rules, BackupPolicy, PatchOutcome, PatchSummary, SubstitutionRule};
use crate::locate::InstalledFile;
use crate::logging::RunLogger;

/// `<path>.bak`, keeping the original extension.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Applies an ordered rule list to files in place.
///
/// Writes are not transactional across files: an interrupted batch can
/// leave some files patched and others untouched.
#[derive(Debug, Clone)]
pub struct Patcher {
    rules: Vec<SubstitutionRule>,
    backup: BackupPolicy,
}

impl Patcher {
    pub fn new(rules: Vec<SubstitutionRule>) -> Self {
        Self {
            rules,
            backup: BackupPolicy::default(),
        }
    }

    pub fn with_backup_policy(mut self, backup: BackupPolicy) -> Self {
        self.backup = backup;
        self
    }

    /// Patch one file. Never panics or returns early; errors land in the outcome.
    pub fn patch_file(&self, file: &InstalledFile) -> PatchOutcome {
        let backup_path = backup_path_for(&file.path);
        match self.try_patch(&file.path, &backup_path) {
            Ok(replacements) => PatchOutcome {
                file: file.clone(),
                backup_path,
                replacements,
                error: None,
            },
            Err(e) => PatchOutcome {
                file: file.clone(),
                backup_path,
                replacements: Vec::new(),
                error: Some(e),
            },
        }
    }

    /// Patch every file, reporting each one, and continue past failures.
    pub fn patch_all(&self, files: &[InstalledFile], logger: &RunLogger) -> PatchSummary {
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            logger.info(&format!("Found file: {}", file.path.display()));
            let outcome = self.patch_file(file);

            match &outcome.error {
                None => {
                    logger.success(&format!(
                        "Patched {} ({} substitution(s))",
                        file.path.display(),
                        outcome.total_replacements()
                    ));
                    logger.info(&format!("Backup saved to: {}", outcome.backup_path.display()));
                }
                Some(e) => {
                    tracing::debug!("Patching {} failed: {}", file.name, e);
                    logger.error(&format!("Failed to patch {}: {}", file.name, e));
                }
            }

            outcomes.push(outcome);
        }

        PatchSummary::from_outcomes(outcomes)
    }

    fn try_patch(&self, path: &Path, backup_path: &Path) -> PatchResult<Vec<usize>> {
        let content = fs::read_to_string(path).map_err(|e| PatchError::read(path, e))?;

        if self.backup == BackupPolicy::KeepOriginal && backup_path.exists() {
            tracing::debug!("Keeping existing backup {}", backup_path.display());
        } else {
            fs::write(backup_path, &content).map_err(|e| PatchError::backup(backup_path, e))?;
        }

        let (updated, counts) = apply_rules(&content, &self.rules);

        fs::write(path, updated).map_err(|e| PatchError::write(path, e))?;

        tracing::debug!("Patched {} with counts {:?}", path.display(), counts);
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_support::capturing_logger;
    use tempfile::tempdir;

    const ORIGINAL: &str = "import numpy as np\nmask = np.zeros(3, dtype=np.bool)\nobj = np.object\n";
    const PATCHED: &str = "import numpy as np\nmask = np.zeros(3, dtype=bool)\nobj = object\n";

    fn numpy_patcher() -> Patcher {
        Patcher::new(vec![
            SubstitutionRule::new("np.bool", "bool"),
            SubstitutionRule::new("np.object", "object"),
        ])
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path_for(Path::new("/x/read_weights.py")),
            PathBuf::from("/x/read_weights.py.bak")
        );
    }

    #[test]
    fn patches_in_place_and_backs_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("read_weights.py");
        fs::write(&path, ORIGINAL).unwrap();

        let outcome = numpy_patcher().patch_file(&InstalledFile::new("read_weights.py", &path));

        assert!(outcome.success());
        assert_eq!(outcome.replacements, vec![1, 1]);
        assert_eq!(fs::read_to_string(&path).unwrap(), PATCHED);
        assert_eq!(fs::read_to_string(&outcome.backup_path).unwrap(), ORIGINAL);
        assert!(!fs::read_to_string(&path).unwrap().contains("np.bool"));
    }

    #[test]
    fn overwrite_policy_loses_original_on_second_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("write_weights.py");
        fs::write(&path, ORIGINAL).unwrap();
        let file = InstalledFile::new("write_weights.py", &path);

        let patcher = numpy_patcher();
        patcher.patch_file(&file);
        let second = patcher.patch_file(&file);

        assert!(second.success());
        assert_eq!(second.total_replacements(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), PATCHED);
        assert_eq!(fs::read_to_string(&second.backup_path).unwrap(), PATCHED);
    }

    #[test]
    fn keep_original_policy_preserves_first_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("write_weights.py");
        fs::write(&path, ORIGINAL).unwrap();
        let file = InstalledFile::new("write_weights.py", &path);

        let patcher = numpy_patcher().with_backup_policy(BackupPolicy::KeepOriginal);
        patcher.patch_file(&file);
        let second = patcher.patch_file(&file);

        assert!(second.success());
        assert_eq!(fs::read_to_string(&second.backup_path).unwrap(), ORIGINAL);
    }

    #[test]
    fn unreadable_file_is_isolated() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("read_weights.py");
        fs::write(&good, ORIGINAL).unwrap();
        let missing = dir.path().join("write_weights.py");

        let files = vec![
            InstalledFile::new("write_weights.py", &missing),
            InstalledFile::new("read_weights.py", &good),
        ];
        let (logger, lines) = capturing_logger();
        let summary = numpy_patcher().patch_all(&files, &logger);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failure_count(), 1);
        assert!(matches!(
            summary.outcomes[0].error,
            Some(PatchError::Read { .. })
        ));
        assert!(!missing.exists());
        assert!(!backup_path_for(&missing).exists());
        assert!(summary.outcomes[1].success());
        assert_eq!(fs::read_to_string(&good).unwrap(), PATCHED);

        let lines = lines.lock();
        assert!(lines.iter().any(|l| l.starts_with("[ERROR] Failed to patch write_weights.py")));
        assert!(lines.iter().any(|l| l.starts_with("[SUCCESS] Patched")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_failure_keeps_backup_and_continues() {
        // Readable by everyone, but opening it for writing fails even as root.
        let read_only = Path::new("/proc/sys/kernel/osrelease");
        let dir = tempdir().unwrap();
        let locked = dir.path().join("write_weights.py");
        std::os::unix::fs::symlink(read_only, &locked).unwrap();
        let original = fs::read_to_string(&locked).unwrap();
        let good = dir.path().join("read_weights.py");
        fs::write(&good, ORIGINAL).unwrap();

        let files = vec![
            InstalledFile::new("write_weights.py", &locked),
            InstalledFile::new("read_weights.py", &good),
        ];
        let (logger, _lines) = capturing_logger();
        let summary = numpy_patcher().patch_all(&files, &logger);

        assert!(matches!(
            summary.outcomes[0].error,
            Some(PatchError::Write { .. })
        ));
        assert_eq!(
            fs::read_to_string(&summary.outcomes[0].backup_path).unwrap(),
            original
        );
        assert!(summary.outcomes[1].success());
        assert_eq!(fs::read_to_string(&good).unwrap(), PATCHED);
        assert_eq!(summary.success_count, 1);
    }

    #[test]
    fn backup_failure_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("read_weights.py");
        fs::write(&path, ORIGINAL).unwrap();
        // A directory where the backup file should go makes the backup write fail.
        fs::create_dir(backup_path_for(&path)).unwrap();

        let outcome = numpy_patcher().patch_file(&InstalledFile::new("read_weights.py", &path));

        assert!(matches!(outcome.error, Some(PatchError::Backup { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), ORIGINAL);
    }
}
