//! MedX library (config, provider client, formatting, chat loop).

pub mod app;
pub mod chat;
pub mod config;
pub mod format;
pub mod prompts;
pub mod providers;
pub mod renderer;
pub mod transcript;
