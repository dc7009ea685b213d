//! pasteimg - paste the clipboard image into a directory
//!
//! This library exports the core modules for testing and for file-manager
//! integrations that want to call the paster directly.

pub mod adapter;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod paster;

pub use error::{PasteError, PasteResult};
pub use paster::ClipboardImagePaster;
