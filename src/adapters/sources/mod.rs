pub mod json_file_source;
