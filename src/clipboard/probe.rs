use std::env;
use std::fs;

/// Immutable desktop variants that keep clipboard tools inside a toolbox
const IMMUTABLE_VARIANTS: &[&str] = &["silverblue", "kinoite", "sericea", "onyx", "atomic"];

/// Display server of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
    Unknown,
}

/// What the host environment can offer for clipboard access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub display: DisplayServer,
    /// Host is an immutable OS variant; clipboard tools live in a sandbox
    pub immutable: bool,
}

impl Environment {
    /// Probe the running session
    /// Reads WAYLAND_DISPLAY, DISPLAY, XDG_SESSION_TYPE and /etc/os-release
    pub fn detect() -> Self {
        let os_release = fs::read_to_string("/etc/os-release").ok();
        let environment = Self::from_parts(
            env::var("XDG_SESSION_TYPE").ok().as_deref(),
            env::var("WAYLAND_DISPLAY").ok().as_deref(),
            env::var("DISPLAY").ok().as_deref(),
            os_release.as_deref(),
        );
        log::debug!("Detected environment: {:?}", environment);
        environment
    }

    /// Build an environment from raw probe values
    /// The session type wins over display variables when it is conclusive
    pub fn from_parts(
        session_type: Option<&str>,
        wayland_display: Option<&str>,
        display: Option<&str>,
        os_release: Option<&str>,
    ) -> Self {
        let set = |value: Option<&str>| value.is_some_and(|v| !v.is_empty());

        let display = match session_type.map(str::to_ascii_lowercase).as_deref() {
            Some("wayland") => DisplayServer::Wayland,
            Some("x11") => DisplayServer::X11,
            _ if set(wayland_display) => DisplayServer::Wayland,
            _ if set(display) => DisplayServer::X11,
            _ => DisplayServer::Unknown,
        };

        Environment {
            display,
            immutable: os_release.is_some_and(is_immutable_os),
        }
    }
}

/// Check os-release contents for an immutable desktop variant
pub fn is_immutable_os(os_release: &str) -> bool {
    os_release
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| matches!(key.trim(), "ID" | "VARIANT_ID" | "NAME" | "PRETTY_NAME"))
        .map(|(_, value)| value.trim().trim_matches('"').to_ascii_lowercase())
        .any(|value| IMMUTABLE_VARIANTS.iter().any(|v| value.contains(v)))
}
