// src/models/mod.rs

pub mod emoji_interpretation;
pub mod log;
pub mod session;
pub mod user;
