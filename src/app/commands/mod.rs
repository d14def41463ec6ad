//! Command handlers.

pub mod ask;
pub mod chat;
pub mod config;
