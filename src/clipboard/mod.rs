pub mod backend;
pub mod launcher;
pub mod memory;
pub mod probe;
pub mod unavailable;
pub mod wayland;
pub mod x11;

use anyhow::{Result, anyhow};

pub use backend::ClipboardSource;
pub use launcher::Launcher;
pub use memory::MemoryClipboard;
pub use probe::{DisplayServer, Environment};
pub use unavailable::UnavailableSource;
pub use wayland::WaylandSource;
pub use x11::X11Source;

use crate::config::{BackendKind, Config, LauncherPolicy};

/// Choose the launcher for clipboard utilities
pub fn select_launcher(config: &Config, env: &Environment) -> Launcher {
    let sandboxed = match config.general.launcher {
        LauncherPolicy::Direct => false,
        LauncherPolicy::Sandbox => true,
        LauncherPolicy::Auto => env.immutable,
    };

    if sandboxed {
        Launcher::Sandbox {
            runner: config.sandbox.runner.clone(),
            args: config.sandbox.args.clone(),
        }
    } else {
        Launcher::Direct
    }
}

/// Choose the backend family from config and the probed environment
/// Immutable systems default to xclip inside the sandbox
pub fn select_backend(config: &Config, env: &Environment) -> Result<BackendKind> {
    match config.general.backend {
        BackendKind::Auto if env.immutable => Ok(BackendKind::X11),
        BackendKind::Auto => match env.display {
            DisplayServer::Wayland => Ok(BackendKind::Wayland),
            DisplayServer::X11 => Ok(BackendKind::X11),
            DisplayServer::Unknown => Err(anyhow!(
                "No supported display server detected. Set WAYLAND_DISPLAY or DISPLAY, or pick a backend in the config"
            )),
        },
        explicit => Ok(explicit),
    }
}

/// Create a clipboard source for the current environment
/// Without a display server the source is unavailable, so pasting degrades
/// to a no-op while diagnostic queries still report the reason
pub fn create_source(config: &Config, env: &Environment) -> Box<dyn ClipboardSource> {
    let backend = match select_backend(config, env) {
        Ok(backend) => backend,
        Err(e) => {
            log::info!("{}", e);
            return Box::new(UnavailableSource::new(e.to_string()));
        }
    };

    let launcher = select_launcher(config, env);
    let source: Box<dyn ClipboardSource> = match backend {
        BackendKind::Wayland => Box::new(WaylandSource::new(launcher)),
        BackendKind::X11 => Box::new(X11Source::new(launcher, config.x11.assume_png)),
        BackendKind::Auto => unreachable!("select_backend resolves Auto"),
    };

    log::info!("Using {} clipboard source", source.name());
    source
}
