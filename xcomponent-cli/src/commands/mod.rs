//! CLI command implementations.

pub mod common;
pub mod components;
pub mod config;
pub mod library;
pub mod manifest;
