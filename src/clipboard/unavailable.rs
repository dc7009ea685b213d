use anyhow::{Result, anyhow};
use std::io::Write;

use super::backend::ClipboardSource;

/// Source for sessions with no usable clipboard
/// Every query fails with `reason`, which the paster treats as "no image"
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        UnavailableSource {
            reason: reason.into(),
        }
    }
}

impl ClipboardSource for UnavailableSource {
    fn list_types(&self) -> Result<Vec<String>> {
        Err(anyhow!("{}", self.reason))
    }

    fn fetch(&self, _mime: &str, _out: &mut dyn Write) -> Result<u64> {
        Err(anyhow!("{}", self.reason))
    }

    fn name(&self) -> &'static str {
        "Unavailable"
    }
}
