//! Lookup of previously downloaded license files in a local cache directory.
//!
//! A cache root holds one subdirectory per dependency, named exactly after
//! the dependency's repository name. Supplying a cache root opts into
//! cache-only operation: dependencies without a cached license are reported
//! as misses instead of being fetched remotely.

use log::*;
use std::path::{Path, PathBuf};

/// File name prefixes recognized as license documents (compared lowercase).
const LICENSE_PREFIXES: [&str; 2] = ["license", "licence"];

/// Result of looking for a cached license file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CacheLookupResult {
    /// A license file exists at this path; do not fetch remotely.
    Found(PathBuf),
    /// A cache root was configured and checked but holds no license for the
    /// dependency, or could not be read.
    CheckedAbsent,
    /// No cache root was configured; a remote fetch is required.
    #[default]
    NotConfigured,
}

impl CacheLookupResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            CacheLookupResult::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Whether resolution should fall through to the remote service.
    pub fn should_fetch_remote(&self) -> bool {
        matches!(self, CacheLookupResult::NotConfigured)
    }
}

/// Locates a cached license for `name` under `cache_root`. Never fails:
/// unreadable or missing directories degrade to
/// [`CacheLookupResult::CheckedAbsent`].
pub fn locate(cache_root: Option<&Path>, name: &str) -> CacheLookupResult {
    let Some(root) = cache_root else {
        return CacheLookupResult::NotConfigured;
    };

    if !root.is_dir() {
        debug!(
            "license cache root {} is not a readable directory",
            root.display()
        );
        return CacheLookupResult::CheckedAbsent;
    }

    let dir = root.join(name);

    let entries = match dir.read_dir() {
        Ok(entries) => entries,
        Err(err) => {
            debug!("unable to read cache directory {}: {err}", dir.display());
            return CacheLookupResult::CheckedAbsent;
        }
    };

    let mut candidates = entries
        .filter_map(|entry| entry.ok())
        // package and bundle style directories are never license files,
        // including symlinks that resolve to a directory
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|file_name| !file_name.starts_with('.'))
        .filter(|file_name| is_license_file_name(file_name))
        .collect::<Vec<String>>();

    // directory enumeration order is platform dependent
    candidates.sort();

    match candidates.into_iter().next() {
        Some(file_name) => {
            let path = dir.join(file_name);
            debug!("found cached license for {name}: {}", path.display());
            CacheLookupResult::Found(path)
        }
        None => {
            debug!("no cached license for {name} in {}", dir.display());
            CacheLookupResult::CheckedAbsent
        }
    }
}

fn is_license_file_name(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    LICENSE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn cache_with(name: &str, files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), "license body").unwrap();
        }
        temp_dir
    }

    #[test]
    fn not_configured_without_root() {
        assert_eq!(locate(None, "Foo"), CacheLookupResult::NotConfigured);
    }

    #[test]
    fn finds_license_file() {
        let cache = cache_with("Foo", &["README.md", "LICENSE.md"]);

        let result = locate(Some(cache.path()), "Foo");

        assert_eq!(
            result,
            CacheLookupResult::Found(cache.path().join("Foo/LICENSE.md"))
        );
        assert!(!result.should_fetch_remote());
    }

    #[test]
    fn matches_case_insensitively() {
        let files = ["license", "License.txt", "LICENSE", "LICENCE.md", "Licence"];
        for file in files {
            let cache = cache_with("Foo", &[file]);
            let result = locate(Some(cache.path()), "Foo");
            assert_eq!(
                result.path(),
                Some(cache.path().join("Foo").join(file).as_path()),
                "expected {file} to match"
            );
        }
    }

    #[test]
    fn ignores_names_without_license_prefix() {
        let cache = cache_with("Foo", &["unlicensed.txt", "COPYING"]);

        let result = locate(Some(cache.path()), "Foo");

        assert_eq!(result, CacheLookupResult::CheckedAbsent);
    }

    #[test]
    fn ignores_hidden_files() {
        let cache = cache_with("Foo", &[".license"]);

        assert_eq!(
            locate(Some(cache.path()), "Foo"),
            CacheLookupResult::CheckedAbsent
        );
    }

    #[test]
    fn ignores_directories() {
        let cache = cache_with("Foo", &[]);
        fs::create_dir_all(cache.path().join("Foo/Licenses.bundle")).unwrap();

        assert_eq!(
            locate(Some(cache.path()), "Foo"),
            CacheLookupResult::CheckedAbsent
        );
    }

    #[cfg(unix)]
    #[test]
    fn ignores_symlinks_to_directories() {
        let cache = cache_with("Foo", &["LICENSE.txt"]);
        let dir = cache.path().join("Foo");
        fs::create_dir_all(dir.join("docs")).unwrap();
        std::os::unix::fs::symlink(dir.join("docs"), dir.join("LICENSE"))
            .unwrap();

        assert_eq!(
            locate(Some(cache.path()), "Foo"),
            CacheLookupResult::Found(dir.join("LICENSE.txt"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_to_files() {
        let cache = cache_with("Foo", &["COPYING"]);
        let dir = cache.path().join("Foo");
        std::os::unix::fs::symlink(dir.join("COPYING"), dir.join("LICENSE"))
            .unwrap();

        assert_eq!(
            locate(Some(cache.path()), "Foo"),
            CacheLookupResult::Found(dir.join("LICENSE"))
        );
    }

    #[test]
    fn picks_first_candidate_by_name() {
        let cache =
            cache_with("Foo", &["LICENSE.txt", "LICENSE", "Licence.md"]);

        let result = locate(Some(cache.path()), "Foo");

        assert_eq!(
            result,
            CacheLookupResult::Found(cache.path().join("Foo/LICENSE"))
        );
    }

    #[test]
    fn checked_absent_when_dependency_dir_missing() {
        let cache = cache_with("Foo", &["LICENSE"]);

        assert_eq!(
            locate(Some(cache.path()), "Bar"),
            CacheLookupResult::CheckedAbsent
        );
    }

    #[test]
    fn checked_absent_when_root_missing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let result = locate(Some(&missing), "Foo");

        assert_eq!(result, CacheLookupResult::CheckedAbsent);
        assert!(!result.should_fetch_remote());
    }

    #[cfg(unix)]
    #[test]
    fn checked_absent_when_dependency_dir_unreadable() {
        use std::os::unix::fs::PermissionsExt;

        let cache = cache_with("Foo", &["LICENSE"]);
        let dir = cache.path().join("Foo");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores permission bits
        let readable = fs::read_dir(&dir).is_ok();
        let result = locate(Some(cache.path()), "Foo");

        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            return;
        }

        assert_eq!(result, CacheLookupResult::CheckedAbsent);
        assert!(!result.should_fetch_remote());
    }

    #[test]
    fn checked_absent_when_root_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("cache");
        fs::write(&file, "not a directory").unwrap();

        assert_eq!(
            locate(Some(&file), "Foo"),
            CacheLookupResult::CheckedAbsent
        );
    }
}
