use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_BASE_NAME;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
    #[serde(default)]
    pub x11: X11Config,
}

impl Config {
    /// Reject settings that would produce unusable file names or commands
    pub fn validate(&self) -> Result<()> {
        let base = self.general.base_name.trim();
        if base.is_empty() {
            bail!("general.base_name must not be empty");
        }
        if base.contains('/') || base.contains('\0') {
            bail!("general.base_name must not contain '/' or NUL: {:?}", base);
        }
        if self.sandbox.runner.trim().is_empty() {
            bail!("sandbox.runner must not be empty");
        }
        Ok(())
    }
}

/// Which clipboard utility family to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Pick from the detected session
    #[default]
    Auto,
    /// wl-paste
    Wayland,
    /// xclip
    X11,
}

/// Whether clipboard utilities run on the host or through the sandbox runner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LauncherPolicy {
    /// Sandbox on immutable OS variants, direct elsewhere
    #[default]
    Auto,
    Direct,
    Sandbox,
}

/// General configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// File name stem for pasted images
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Clipboard backend
    #[serde(default)]
    pub backend: BackendKind,

    /// How clipboard utilities are launched
    #[serde(default)]
    pub launcher: LauncherPolicy,

    /// Level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Level mirrored to stderr
    #[serde(default = "default_stderr_level")]
    pub stderr_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            base_name: default_base_name(),
            backend: BackendKind::default(),
            launcher: LauncherPolicy::default(),
            log_level: default_log_level(),
            stderr_level: default_stderr_level(),
        }
    }
}

/// Sandbox runner used on immutable systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default = "default_runner")]
    pub runner: String,

    #[serde(default = "default_runner_args")]
    pub args: Vec<String>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        SandboxConfig {
            runner: default_runner(),
            args: default_runner_args(),
        }
    }
}

/// xclip specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct X11Config {
    /// Do not query TARGETS; assume the clipboard holds image/png
    #[serde(default)]
    pub assume_png: bool,
}

// Default value functions for serde
fn default_base_name() -> String {
    DEFAULT_BASE_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stderr_level() -> String {
    "warn".to_string()
}

fn default_runner() -> String {
    "toolbox".to_string()
}

fn default_runner_args() -> Vec<String> {
    vec!["run".to_string()]
}
