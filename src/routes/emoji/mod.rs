pub mod emoji_handlers;
pub mod emoji_models;
