pub mod app_config;
pub mod binding;
pub mod handler_config;
