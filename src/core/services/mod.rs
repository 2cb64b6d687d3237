pub mod admin_service;
pub mod analytics_service;
pub mod filter_service;
pub mod member_service;
pub mod project_service;
pub mod series_service;
pub mod summary_service;
pub mod transfer_service;
