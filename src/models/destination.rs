use std::path::{Path, PathBuf};

/// Default file name stem for pasted images
pub const DEFAULT_BASE_NAME: &str = "Pasted Image";

/// Resolve "Pasted Image.<ext>" inside `dir` without clobbering existing files
pub fn resolve_destination(dir: &Path, extension: &str) -> PathBuf {
    resolve_named(dir, DEFAULT_BASE_NAME, extension)
}

/// Resolve "<base>.<ext>", or "<base> <n>.<ext>" for the first free n >= 1
///
/// The scan is linear and unbounded. The returned path did not exist when it
/// was checked; nothing stops another process from creating it afterwards.
pub fn resolve_named(dir: &Path, base_name: &str, extension: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.{}", base_name, extension));
    if !exists(&candidate) {
        return candidate;
    }

    (1u64..)
        .map(|n| dir.join(format!("{} {}.{}", base_name, n, extension)))
        .find(|path| !exists(path))
        .unwrap_or(candidate)
}

/// Existence check that also counts dangling symlinks as taken
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
