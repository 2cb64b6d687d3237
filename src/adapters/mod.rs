pub mod activity;
pub mod api;
pub mod sources;
