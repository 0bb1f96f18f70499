mod file;

pub use file::{BufferFile, DEFAULT_EXPORT_FILE};
