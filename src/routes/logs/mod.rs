pub mod log_handlers;
pub mod log_models;
