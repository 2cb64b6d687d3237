pub mod activity_entry;
pub mod dashboard;
pub mod event;
pub mod export_bundle;
pub mod filter_state;
pub mod member;
pub mod notification;
pub mod project;
pub mod role;
pub mod series;
pub mod summary;
pub mod window;
