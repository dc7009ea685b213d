use anyhow::Result;
use std::io::Write;

/// Trait for clipboard source abstraction
/// Supports different clipboard systems (Wayland, X11, in-memory)
/// Source is read-only: the paster never mutates clipboard state
pub trait ClipboardSource: Send + Sync {
    /// List the type tags the clipboard currently offers, in offered order
    fn list_types(&self) -> Result<Vec<String>>;

    /// Stream the clipboard content for `mime` into `out`
    /// Returns the number of bytes written
    fn fetch(&self, mime: &str, out: &mut dyn Write) -> Result<u64>;

    /// Get the source name (for logging/debugging)
    fn name(&self) -> &'static str;
}

impl<T: ClipboardSource + ?Sized> ClipboardSource for Box<T> {
    fn list_types(&self) -> Result<Vec<String>> {
        (**self).list_types()
    }

    fn fetch(&self, mime: &str, out: &mut dyn Write) -> Result<u64> {
        (**self).fetch(mime, out)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Split a utility's type listing into tags, one per non-blank line
pub fn parse_type_listing(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
