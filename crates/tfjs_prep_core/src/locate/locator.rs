//! Lookup of `<root>/<package>/<filename>` across search roots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::errors::{LocateError, LocateResult};

/// A discovered file eligible for patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledFile {
    /// File name as requested (e.g. `read_weights.py`).
    pub name: String,
    /// Resolved on-disk location.
    pub path: PathBuf,
}

impl InstalledFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Searches an ordered list of roots for a package's files.
///
/// When a file exists under several roots the later root wins.
#[derive(Debug, Clone)]
pub struct PathLocator {
    roots: Vec<PathBuf>,
}

impl PathLocator {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Find the requested files of `package`.
    ///
    /// The result holds at most one entry per filename, in request order.
    /// An empty result means the package is not installed under any root.
    pub fn locate<S: AsRef<str>>(&self, package: &str, filenames: &[S]) -> Vec<InstalledFile> {
        let mut found: HashMap<&str, PathBuf> = HashMap::new();

        for root in &self.roots {
            let package_dir = root.join(package);
            if !package_dir.is_dir() {
                continue;
            }

            for name in filenames {
                let name = name.as_ref();
                let candidate = package_dir.join(name);
                if candidate.is_file() {
                    if let Some(previous) = found.insert(name, candidate.clone()) {
                        tracing::warn!(
                            "{} found in several roots, using {} over {}",
                            name,
                            candidate.display(),
                            previous.display()
                        );
                    }
                }
            }
        }

        let mut seen = Vec::new();
        filenames
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| {
                if seen.contains(name) {
                    false
                } else {
                    seen.push(*name);
                    true
                }
            })
            .filter_map(|name| {
                found
                    .get(name)
                    .map(|path| InstalledFile::new(name, path.clone()))
            })
            .collect()
    }

    /// Like [`locate`](Self::locate), but an empty result is an error.
    pub fn locate_required<S: AsRef<str>>(
        &self,
        package: &str,
        filenames: &[S],
    ) -> LocateResult<Vec<InstalledFile>> {
        let files = self.locate(package, filenames);
        if files.is_empty() {
            return Err(LocateError::package_not_found(package, self.roots.len()));
        }
        Ok(files)
    }
}

impl<P: AsRef<Path>> FromIterator<P> for PathLocator {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FILES: [&str; 2] = ["read_weights.py", "write_weights.py"];

    fn install(root: &Path, names: &[&str]) {
        let dir = root.join("tensorflowjs");
        fs::create_dir_all(&dir).unwrap();
        for name in names {
            fs::write(dir.join(name), "import numpy as np\n").unwrap();
        }
    }

    #[test]
    fn finds_files_under_single_root() {
        let root = tempdir().unwrap();
        install(root.path(), &FILES);

        let locator = PathLocator::new(vec![root.path().to_path_buf()]);
        let files = locator.locate("tensorflowjs", &FILES);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "read_weights.py");
        assert_eq!(files[0].path, root.path().join("tensorflowjs/read_weights.py"));
        assert_eq!(files[1].name, "write_weights.py");
    }

    #[test]
    fn later_root_wins() {
        let global = tempdir().unwrap();
        let user = tempdir().unwrap();
        install(global.path(), &FILES);
        install(user.path(), &["write_weights.py"]);

        let locator: PathLocator = [global.path(), user.path()].into_iter().collect();
        let files = locator.locate("tensorflowjs", &FILES);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, global.path().join("tensorflowjs/read_weights.py"));
        assert_eq!(files[1].path, user.path().join("tensorflowjs/write_weights.py"));
    }

    #[test]
    fn missing_package_yields_empty() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("numpy")).unwrap();

        let locator = PathLocator::new(vec![
            root.path().to_path_buf(),
            root.path().join("does-not-exist"),
        ]);

        assert!(locator.locate("tensorflowjs", &FILES).is_empty());
        assert!(matches!(
            locator.locate_required("tensorflowjs", &FILES),
            Err(LocateError::PackageNotFound { roots: 2, .. })
        ));
    }

    #[test]
    fn ignores_unrequested_and_directory_entries() {
        let root = tempdir().unwrap();
        install(root.path(), &["other.py"]);
        fs::create_dir_all(root.path().join("tensorflowjs/read_weights.py")).unwrap();

        let locator = PathLocator::new(vec![root.path().to_path_buf()]);
        assert!(locator.locate("tensorflowjs", &FILES).is_empty());
    }

    #[test]
    fn duplicate_request_names_collapse() {
        let root = tempdir().unwrap();
        install(root.path(), &FILES);

        let locator = PathLocator::new(vec![root.path().to_path_buf()]);
        let files = locator.locate("tensorflowjs", &["read_weights.py", "read_weights.py"]);
        assert_eq!(files.len(), 1);
    }
}
