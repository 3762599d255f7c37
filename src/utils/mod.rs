pub mod collections;
pub mod fs;
pub mod logging;

pub use collections::{is_contiguous, json_depth};
pub use fs::absolute_file_paths;
pub use logging::{truncate_text, LogConfig, Logger};
