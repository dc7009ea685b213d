use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use pasteimg::clipboard::MemoryClipboard;
use pasteimg::models::resolve_destination;
use pasteimg::ClipboardImagePaster;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

fn png_clipboard() -> MemoryClipboard {
    MemoryClipboard::new()
        .with("TARGETS", "")
        .with("image/jpeg", b"jpeg".to_vec())
        .with("image/png", PNG_BYTES.to_vec())
}

fn dir_entries(dir: &std::path::Path) -> Vec<PathBuf> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

#[test]
fn test_paste_prefers_png() {
    let dir = tempfile::tempdir().unwrap();
    let paster = ClipboardImagePaster::new(png_clipboard());

    let path = paster.paste_image(dir.path()).unwrap().unwrap();

    assert_eq!(path, dir.path().join("Pasted Image.png"));
    assert_eq!(fs::read(&path).unwrap(), PNG_BYTES);
}

#[test]
fn test_jpeg_only_clipboard_writes_jpg() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = MemoryClipboard::new().with("image/jpeg", b"jpeg".to_vec());
    let paster = ClipboardImagePaster::new(clipboard);

    let path = paster.paste_image(dir.path()).unwrap().unwrap();
    assert_eq!(path, dir.path().join("Pasted Image.jpg"));
    assert_eq!(fs::read(&path).unwrap(), b"jpeg");
}

#[test]
fn test_vendor_type_requested_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    // MemoryClipboard only serves the exact tag, so this fails if the
    // request were sent as image/ms-bmp
    let clipboard = MemoryClipboard::new().with("image/x-ms-bmp", b"BM".to_vec());
    let paster = ClipboardImagePaster::new(clipboard);

    let path = paster.paste_image(dir.path()).unwrap().unwrap();
    assert_eq!(path, dir.path().join("Pasted Image.ms-bmp"));
}

#[test]
fn test_file_target_pastes_into_parent() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("report.pdf");
    fs::write(&file, b"pdf").unwrap();
    let paster = ClipboardImagePaster::new(png_clipboard());

    let path = paster.paste_image(&file).unwrap().unwrap();

    assert_eq!(path, dir.path().join("Pasted Image.png"));
    assert_ne!(path, file);
    assert_eq!(fs::read(&file).unwrap(), b"pdf");
}

#[test]
fn test_empty_clipboard_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();

    for clipboard in [
        MemoryClipboard::new(),
        MemoryClipboard::new().with("text/plain", "not an image"),
        MemoryClipboard::unavailable(),
    ] {
        let paster = ClipboardImagePaster::new(clipboard);
        assert!(!paster.has_image_in_clipboard());
        assert_eq!(paster.paste_image(dir.path()).unwrap(), None);
    }

    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn test_no_image_skips_missing_directory_check() {
    // With nothing to paste, the target is never inspected
    let paster = ClipboardImagePaster::new(MemoryClipboard::new());
    let missing = PathBuf::from("/nonexistent/pasteimg/target");
    assert_eq!(paster.paste_image(&missing).unwrap(), None);
}

#[test]
fn test_missing_directory_fails_loudly() {
    let dir = tempfile::tempdir().unwrap();
    let paster = ClipboardImagePaster::new(png_clipboard());

    let result = paster.paste_image(&dir.path().join("gone/child"));
    assert!(matches!(result, Err(pasteimg::PasteError::Io { .. })));
}

#[test]
fn test_repeated_pastes_never_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let paster = ClipboardImagePaster::new(png_clipboard());

    let written: Vec<PathBuf> = (0..5)
        .map(|_| paster.paste_image(dir.path()).unwrap().unwrap())
        .collect();

    let unique: HashSet<_> = written.iter().collect();
    assert_eq!(unique.len(), 5);
    assert_eq!(written[0], dir.path().join("Pasted Image.png"));
    assert_eq!(written[4], dir.path().join("Pasted Image 4.png"));
    assert_eq!(dir_entries(dir.path()).len(), 5);
}

#[test]
fn test_resolution_continues_existing_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Pasted Image.png"), b"old").unwrap();
    fs::write(dir.path().join("Pasted Image 1.png"), b"old").unwrap();

    assert_eq!(
        resolve_destination(dir.path(), "png"),
        dir.path().join("Pasted Image 2.png")
    );

    let paster = ClipboardImagePaster::new(png_clipboard());
    let path = paster.paste_image(dir.path()).unwrap().unwrap();
    assert_eq!(path, dir.path().join("Pasted Image 2.png"));
    assert_eq!(fs::read(dir.path().join("Pasted Image.png")).unwrap(), b"old");
}

#[test]
fn test_malformed_first_offer_fails() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = MemoryClipboard::new().with("image/", b"?".to_vec());
    let paster = ClipboardImagePaster::new(clipboard);

    let result = paster.paste_image(dir.path());
    assert!(matches!(result, Err(pasteimg::PasteError::MalformedOffer(_))));
    assert!(dir_entries(dir.path()).is_empty());
}
