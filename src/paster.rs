use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::clipboard::ClipboardSource;
use crate::error::{PasteError, PasteResult};
use crate::models::{DEFAULT_BASE_NAME, FormatChoice, ImageFormat, image_formats, resolve_named, select_format};

/// Pastes the clipboard image into directories
pub struct ClipboardImagePaster<S: ClipboardSource> {
    source: S,
    base_name: String,
}

impl<S: ClipboardSource> ClipboardImagePaster<S> {
    /// Create a paster naming files "Pasted Image.<ext>"
    pub fn new(source: S) -> Self {
        Self::with_base_name(source, DEFAULT_BASE_NAME)
    }

    /// Create a paster with a custom file name stem
    pub fn with_base_name(source: S, base_name: impl Into<String>) -> Self {
        ClipboardImagePaster {
            source,
            base_name: base_name.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Image formats the clipboard offers, in offered order
    /// Fails if the clipboard utility cannot be reached
    pub fn list_image_formats(&self) -> Result<Vec<ImageFormat>> {
        let offer = self.source.list_types()?;
        let formats = image_formats(&offer);
        log::debug!(
            "{} clipboard offers {} types, {} images: {:?}",
            self.source.name(),
            offer.len(),
            formats.len(),
            formats
        );
        Ok(formats)
    }

    /// True iff the clipboard offers at least one image type
    pub fn has_image_in_clipboard(&self) -> bool {
        !self.available_formats().is_empty()
    }

    /// Paste the clipboard image into `target`, or into its parent if it is
    /// not a directory
    ///
    /// Returns the written path, or None when the clipboard holds no image.
    /// The destination is created exclusively, so a file that appears between
    /// name resolution and the write makes the paste fail instead of being
    /// overwritten.
    pub fn paste_image(&self, target: &Path) -> PasteResult<Option<PathBuf>> {
        let formats = self.available_formats();
        if formats.is_empty() {
            log::info!("No image in clipboard, nothing to paste into {:?}", target);
            return Ok(None);
        }

        let dir = target_directory(target)?;
        let choice = select_format(&formats)?;
        let destination = resolve_named(&dir, &self.base_name, choice.extension());

        let written = self.write_image(&choice, &destination)?;
        if written == 0 {
            log::warn!("Clipboard returned no data for {}, nothing pasted", choice.mime());
            remove_partial(&destination);
            return Ok(None);
        }

        log::info!(
            "Pasted {} bytes of {} into {:?}",
            written,
            choice.mime(),
            destination
        );
        Ok(Some(destination))
    }

    /// Formats for availability decisions; clipboard failures count as none
    fn available_formats(&self) -> Vec<ImageFormat> {
        self.list_image_formats().unwrap_or_else(|e| {
            log::warn!("Clipboard query failed, treating as empty: {:#}", e);
            Vec::new()
        })
    }

    fn write_image(&self, choice: &FormatChoice, destination: &Path) -> PasteResult<u64> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .map_err(|e| PasteError::io(destination, e))?;

        let mime = choice.mime();
        let written = self
            .source
            .fetch(&mime, &mut file)
            .and_then(|n| file.flush().map(|_| n).map_err(Into::into));

        match written {
            Ok(n) => Ok(n),
            Err(source) => {
                drop(file);
                remove_partial(destination);
                Err(PasteError::Retrieval { mime, source })
            }
        }
    }
}

/// Directory a paste into `target` lands in
/// A path that is not a directory is replaced by its parent
pub fn target_directory(target: &Path) -> PasteResult<PathBuf> {
    let dir = if target.is_dir() {
        target.to_path_buf()
    } else {
        match target.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_path_buf(),
            None => target.to_path_buf(),
        }
    };

    if !dir.is_dir() {
        return Err(PasteError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "target directory does not exist"),
        ));
    }

    Ok(dir)
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        log::warn!("Failed to remove partial file {:?}: {}", path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;

    #[test]
    fn test_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"x").unwrap();

        assert_eq!(target_directory(dir.path()).unwrap(), dir.path());
        assert_eq!(target_directory(&file).unwrap(), dir.path());
        // A path that does not exist yet still resolves to its parent
        assert_eq!(
            target_directory(&dir.path().join("new.png")).unwrap(),
            dir.path()
        );
        assert_eq!(target_directory(Path::new("relative.txt")).unwrap(), Path::new("."));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = target_directory(&dir.path().join("gone/inner.txt"));
        assert!(matches!(result, Err(PasteError::Io { .. })));
    }

    #[test]
    fn test_availability_matches_format_list() {
        let cases = [
            MemoryClipboard::new(),
            MemoryClipboard::new().with("text/plain", "hello"),
            MemoryClipboard::new().with("image/png", vec![1]),
            MemoryClipboard::new()
                .with("TARGETS", "")
                .with("image/x-ms-bmp", vec![1]),
        ];
        for clipboard in cases {
            let paster = ClipboardImagePaster::new(clipboard);
            assert_eq!(
                paster.has_image_in_clipboard(),
                !paster.list_image_formats().unwrap().is_empty()
            );
        }

        let paster = ClipboardImagePaster::new(MemoryClipboard::unavailable());
        assert!(!paster.has_image_in_clipboard());
    }

    #[test]
    fn test_custom_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = MemoryClipboard::new().with("image/gif", b"GIF89a".to_vec());
        let paster = ClipboardImagePaster::with_base_name(clipboard, "Screenshot");

        let path = paster.paste_image(dir.path()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("Screenshot.gif"));
        assert_eq!(fs::read(path).unwrap(), b"GIF89a");
    }

    #[test]
    fn test_retrieval_failure_removes_file() {
        // Offers an image type it cannot deliver
        struct Broken;
        impl ClipboardSource for Broken {
            fn list_types(&self) -> Result<Vec<String>> {
                Ok(vec!["image/png".to_string()])
            }
            fn fetch(&self, _mime: &str, out: &mut dyn Write) -> Result<u64> {
                out.write_all(b"partial")?;
                anyhow::bail!("xclip died")
            }
            fn name(&self) -> &'static str {
                "Broken"
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let paster = ClipboardImagePaster::new(Broken);
        let result = paster.paste_image(dir.path());

        assert!(matches!(result, Err(PasteError::Retrieval { .. })));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_existing_destination_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("Pasted Image.png");
        fs::write(&destination, b"mine").unwrap();

        let paster = ClipboardImagePaster::new(MemoryClipboard::new().with("image/png", vec![1, 2]));
        let choice = select_format(&[ImageFormat::from("png")]).unwrap();

        // Another writer created the resolved name before the write
        match paster.write_image(&choice, &destination) {
            Err(PasteError::Io { path, source }) => {
                assert_eq!(path, destination);
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists);
            }
            other => panic!("expected AlreadyExists, got {:?}", other),
        }
        assert_eq!(fs::read(&destination).unwrap(), b"mine");
    }

    #[test]
    fn test_empty_retrieval_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paster = ClipboardImagePaster::new(MemoryClipboard::new().with("image/png", Vec::new()));

        assert_eq!(paster.paste_image(dir.path()).unwrap(), None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
