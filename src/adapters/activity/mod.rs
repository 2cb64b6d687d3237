pub mod json_activity_log;
