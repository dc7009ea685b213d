pub mod settings;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use settings::{BackendKind, Config, GeneralConfig, LauncherPolicy, SandboxConfig, X11Config};

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Get the config file path
    fn path(&self) -> &Path;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {:?}", self.path))?;

        log::debug!(
            "Config: backend={:?}, launcher={:?}, base_name={:?}",
            config.general.backend,
            config.general.launcher,
            config.general.base_name
        );

        Ok(config)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Use the example config compiled into the binary
        let example_config = include_str!("../../pasteimg.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);
        Ok(())
    }
}

/// Ensure XDG config and state directories exist
/// Returns (config_dir, state_dir)
///
/// XDG Base Directory Specification:
/// - Config: $XDG_CONFIG_HOME/pasteimg (default: ~/.config/pasteimg)
/// - State: $XDG_STATE_HOME/pasteimg (default: ~/.local/state/pasteimg)
pub fn ensure_directories() -> Result<(PathBuf, PathBuf)> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    let home_path = PathBuf::from(home);

    let config_dir = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) if !xdg_config.is_empty() => PathBuf::from(xdg_config).join("pasteimg"),
        _ => home_path.join(".config/pasteimg"),
    };

    let state_dir = match env::var("XDG_STATE_HOME") {
        Ok(xdg_state) if !xdg_state.is_empty() => PathBuf::from(xdg_state).join("pasteimg"),
        _ => home_path.join(".local/state/pasteimg"),
    };

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;
    fs::create_dir_all(&state_dir)
        .with_context(|| format!("Failed to create state directory {:?}", state_dir))?;

    log::debug!("Config directory: {:?}", config_dir);
    log::debug!("State directory: {:?}", state_dir);

    Ok((config_dir, state_dir))
}
