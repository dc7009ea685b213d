pub mod destination;
pub mod format;

pub use destination::{DEFAULT_BASE_NAME, resolve_destination, resolve_named};
pub use format::{FormatChoice, IMAGE_PREFIX, ImageFormat, image_formats, select_format};
