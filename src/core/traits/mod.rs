pub mod activity;
pub mod admin;
pub mod event_source;
pub mod membership;
