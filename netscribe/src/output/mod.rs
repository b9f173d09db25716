//! Report output: CSV serialization and filename templating.

pub mod csv;
pub mod filename;

pub use csv::{write_rows, write_rows_flexible};
pub use filename::{create_output_filename, ensure_parent_dir, expand_path, sanitize_desc};
