pub mod tag_service;
pub mod user_service;
