pub mod error;
pub mod fs;

pub use error::{BatchError, BatchResult};
pub use fs::{create_dir_all, dir_exists, display_name, file_exists};
