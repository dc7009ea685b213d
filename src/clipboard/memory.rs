use anyhow::{Result, anyhow};
use std::io::Write;

use super::backend::ClipboardSource;

/// In-process clipboard holding fixed offers
/// Used by tests and by callers embedding the paster without a display server
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    offers: Vec<(String, Vec<u8>)>,
    unavailable: bool,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose every query fails, as if the utility were missing
    pub fn unavailable() -> Self {
        MemoryClipboard {
            offers: Vec::new(),
            unavailable: true,
        }
    }

    /// Add an offer; offers are listed in insertion order
    pub fn with(mut self, mime: &str, data: impl Into<Vec<u8>>) -> Self {
        self.offers.push((mime.to_string(), data.into()));
        self
    }
}

impl ClipboardSource for MemoryClipboard {
    fn list_types(&self) -> Result<Vec<String>> {
        if self.unavailable {
            return Err(anyhow!("clipboard is unavailable"));
        }
        Ok(self.offers.iter().map(|(mime, _)| mime.clone()).collect())
    }

    fn fetch(&self, mime: &str, out: &mut dyn Write) -> Result<u64> {
        if self.unavailable {
            return Err(anyhow!("clipboard is unavailable"));
        }
        let (_, data) = self
            .offers
            .iter()
            .find(|(offered, _)| offered == mime)
            .ok_or_else(|| anyhow!("clipboard does not offer {}", mime))?;
        out.write_all(data)?;
        Ok(data.len() as u64)
    }

    fn name(&self) -> &'static str {
        "Memory"
    }
}
