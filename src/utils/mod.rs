pub mod answer_normalize;
pub mod download;
pub mod file_name;
pub mod multipart;
pub mod natural_sort;
pub mod parameter_error_handler;
pub mod rename_rule;
pub mod spreadsheet;
pub mod validate;

pub use answer_normalize::{answers_match, normalize_command};
pub use file_name::{format_file_size, parse_upload_name, split_extension};
pub use natural_sort::{natural_cmp, sort_names};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
