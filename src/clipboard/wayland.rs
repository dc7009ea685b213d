use anyhow::Result;
use std::io::Write;

use super::backend::{ClipboardSource, parse_type_listing};
use super::launcher::Launcher;

/// Wayland clipboard source using wl-clipboard tools
/// Requires wl-paste to be installed
pub struct WaylandSource {
    launcher: Launcher,
}

impl WaylandSource {
    /// Create a new Wayland clipboard source
    pub fn new(launcher: Launcher) -> Self {
        log::debug!("WaylandSource using {}", launcher.describe("wl-paste"));
        WaylandSource { launcher }
    }
}

impl ClipboardSource for WaylandSource {
    fn list_types(&self) -> Result<Vec<String>> {
        // wl-paste exits non-zero when the clipboard is empty
        let stdout = self.launcher.capture("wl-paste", &["--list-types"])?;
        Ok(parse_type_listing(&stdout))
    }

    fn fetch(&self, mime: &str, out: &mut dyn Write) -> Result<u64> {
        self.launcher
            .stream("wl-paste", &["--no-newline", "--type", mime], out)
    }

    fn name(&self) -> &'static str {
        "Wayland"
    }
}
