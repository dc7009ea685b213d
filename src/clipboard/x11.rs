use anyhow::Result;
use std::io::Write;

use super::backend::{ClipboardSource, parse_type_listing};
use super::launcher::Launcher;

/// X11 clipboard source using xclip
/// Also used on immutable desktops, where xclip runs inside the sandbox
pub struct X11Source {
    launcher: Launcher,
    /// Skip the TARGETS query and report only image/png
    assume_png: bool,
}

impl X11Source {
    /// Create a new X11 clipboard source
    pub fn new(launcher: Launcher, assume_png: bool) -> Self {
        log::debug!(
            "X11Source using {} (assume_png={})",
            launcher.describe("xclip"),
            assume_png
        );
        X11Source {
            launcher,
            assume_png,
        }
    }
}

impl ClipboardSource for X11Source {
    fn list_types(&self) -> Result<Vec<String>> {
        if self.assume_png {
            return Ok(vec!["image/png".to_string()]);
        }

        let stdout = self
            .launcher
            .capture("xclip", &["-selection", "clipboard", "-t", "TARGETS", "-o"])?;
        Ok(parse_type_listing(&stdout))
    }

    fn fetch(&self, mime: &str, out: &mut dyn Write) -> Result<u64> {
        self.launcher
            .stream("xclip", &["-selection", "clipboard", "-t", mime, "-o"], out)
    }

    fn name(&self) -> &'static str {
        "X11"
    }
}
