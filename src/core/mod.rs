//! Configuration, transport models and the command grammar

pub mod command;
pub mod config;
pub mod models;
pub mod platform;
