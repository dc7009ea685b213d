use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use pasteimg::adapter::{menu_visible, parse_target, paste_all};
use pasteimg::clipboard::{self, ClipboardSource, Environment};
use pasteimg::config::{BackendKind, Config, ConfigStorage, TomlConfigStorage, ensure_directories};
use pasteimg::logging;
use pasteimg::models::select_format;
use pasteimg::paster::ClipboardImagePaster;

#[derive(Parser)]
#[command(name = "pasteimg")]
#[command(about = "Paste the clipboard image into a directory", long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/pasteimg/pasteimg.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured clipboard backend
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendKind>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paste the clipboard image into each target (file, directory or file:// URI)
    Paste {
        #[arg(required = true)]
        targets: Vec<String>,
    },

    /// Exit 0 if a "Paste Image" action should be offered for the selection
    Check { targets: Vec<String> },

    /// Show the image formats the clipboard offers
    Formats,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config_dir, state_dir) = ensure_directories()?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("pasteimg.toml"));
    let config_existed = config_path.exists();
    let mut config = TomlConfigStorage::new(config_path.clone()).load()?;
    if let Some(backend) = cli.backend {
        config.general.backend = backend;
    }

    init_logging(&config, &state_dir.join("pasteimg.log"), cli.verbose);

    // Loading ran before the logger existed; record its outcome now
    if !config_existed {
        log::info!("Created default configuration at {:?}", config_path);
    }
    log::debug!("Config file: {:?}, state directory: {:?}", config_path, state_dir);

    let source = clipboard::create_source(&config, &Environment::detect());
    let paster = ClipboardImagePaster::with_base_name(source, config.general.base_name.clone());

    match cli.command {
        Commands::Paste { targets } => cmd_paste(&paster, &targets),
        Commands::Check { targets } => cmd_check(&paster, &targets),
        Commands::Formats => cmd_formats(&paster),
    }
}

/// Install the file logger, falling back to env_logger if the log file is unusable
fn init_logging(config: &Config, log_path: &std::path::Path, verbose: bool) {
    let stderr_level = if verbose {
        "debug"
    } else {
        config.general.stderr_level.as_str()
    };

    if let Err(e) = logging::init_logger(log_path, &config.general.log_level, stderr_level) {
        env_logger::Builder::new()
            .filter_level(logging::parse_level(stderr_level))
            .init();
        log::warn!("File logging unavailable, using stderr only: {:#}", e);
    }
}

fn parse_targets(targets: &[String]) -> Result<Vec<PathBuf>> {
    targets
        .iter()
        .map(|t| parse_target(t).with_context(|| format!("Invalid target {:?}", t)))
        .collect()
}

/// Paste into every target; fails if any target failed
fn cmd_paste<S: ClipboardSource>(
    paster: &ClipboardImagePaster<S>,
    targets: &[String],
) -> Result<ExitCode> {
    let targets = parse_targets(targets)?;
    let mut failed = false;

    for (target, result) in paste_all(paster, &targets) {
        match result {
            Ok(Some(path)) => println!("{}", path.display()),
            Ok(None) => log::info!("No image pasted into {:?}", target),
            Err(e) => {
                log::error!("Paste into {:?} failed: {}", target, e);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_check<S: ClipboardSource>(
    paster: &ClipboardImagePaster<S>,
    targets: &[String],
) -> Result<ExitCode> {
    let targets = parse_targets(targets)?;
    Ok(if menu_visible(paster, &targets) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_formats<S: ClipboardSource>(paster: &ClipboardImagePaster<S>) -> Result<ExitCode> {
    let formats = paster
        .list_image_formats()
        .with_context(|| format!("Failed to query the {} clipboard", paster.source().name()))?;

    if formats.is_empty() {
        println!("(no image in clipboard)");
        return Ok(ExitCode::FAILURE);
    }

    for format in &formats {
        println!("image/{}", format);
    }

    match select_format(&formats) {
        Ok(choice) => println!("=> {} saved as .{}", choice.mime(), choice.extension()),
        Err(e) => println!("=> {}", e),
    }

    Ok(ExitCode::SUCCESS)
}
