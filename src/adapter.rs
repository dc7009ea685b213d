//! Glue between file-manager actions and the paster
//!
//! File managers hand over either plain paths or `file://` URIs. A menu entry
//! should only be shown when the clipboard holds an image and at least one of
//! the selected items is a directory.

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use url::Url;

use crate::clipboard::ClipboardSource;
use crate::error::PasteResult;
use crate::paster::ClipboardImagePaster;

/// Turn a command-line argument into a filesystem path
/// Accepts plain paths and local `file://` URIs; URIs naming another host
/// are rejected
pub fn parse_target(arg: &str) -> Result<PathBuf> {
    if !arg.starts_with("file://") {
        return Ok(PathBuf::from(arg));
    }

    // Url handles percent-decoding (spaces, non-ASCII names)
    let url = Url::parse(arg).with_context(|| format!("Invalid file URI {:?}", arg))?;
    url.to_file_path()
        .map_err(|_| anyhow!("Cannot convert URI to a local path: {}", arg))
}

/// Whether a "Paste Image" entry should be offered for `selection`
/// An empty selection is the folder background, which always qualifies
pub fn menu_visible<S: ClipboardSource>(
    paster: &ClipboardImagePaster<S>,
    selection: &[PathBuf],
) -> bool {
    if !selection.is_empty() && !selection.iter().any(|p| p.is_dir()) {
        return false;
    }
    paster.has_image_in_clipboard()
}

/// Paste into every target, collecting one result per target
pub fn paste_all<S: ClipboardSource>(
    paster: &ClipboardImagePaster<S>,
    targets: &[PathBuf],
) -> Vec<(PathBuf, PasteResult<Option<PathBuf>>)> {
    targets
        .iter()
        .map(|target| (target.clone(), paster.paste_image(Path::new(target))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use std::fs;

    #[test]
    fn test_parse_plain_path() {
        assert_eq!(parse_target("/tmp/a b").unwrap(), PathBuf::from("/tmp/a b"));
        assert_eq!(parse_target("relative").unwrap(), PathBuf::from("relative"));
    }

    #[test]
    fn test_parse_file_uri() {
        assert_eq!(
            parse_target("file:///home/me/My%20Pictures").unwrap(),
            PathBuf::from("/home/me/My Pictures")
        );
        assert_eq!(
            parse_target("file://localhost/tmp/x%C3%A9").unwrap(),
            PathBuf::from("/tmp/xé")
        );
    }

    #[test]
    fn test_remote_host_rejected() {
        assert!(parse_target("file://otherhost/etc/passwd").is_err());
        assert!(parse_target("file://otherhost").is_err());
    }

    #[test]
    fn test_menu_visibility() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, b"").unwrap();

        let with_image =
            ClipboardImagePaster::new(MemoryClipboard::new().with("image/png", vec![1]));
        let without_image = ClipboardImagePaster::new(MemoryClipboard::new());

        assert!(menu_visible(&with_image, &[]));
        assert!(menu_visible(&with_image, &[file.clone(), dir.path().to_path_buf()]));
        assert!(!menu_visible(&with_image, &[file.clone()]));
        assert!(!menu_visible(&without_image, &[]));
        assert!(!menu_visible(&without_image, &[dir.path().to_path_buf()]));
    }

    #[test]
    fn test_paste_all_targets() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let paster = ClipboardImagePaster::new(MemoryClipboard::new().with("image/png", vec![7]));

        let results = paste_all(
            &paster,
            &[first.path().to_path_buf(), second.path().to_path_buf()],
        );

        assert_eq!(results.len(), 2);
        for ((_, result), dir) in results.into_iter().zip([&first, &second]) {
            assert_eq!(result.unwrap(), Some(dir.path().join("Pasted Image.png")));
        }
    }
}
