pub mod activity_helpers;
pub mod export;
pub mod import;
pub mod init;
pub mod issues;
pub mod log;
pub mod members;
pub mod notifications;
pub mod projects;
pub mod series;
pub mod shared;
pub mod show;
pub mod stats;
