//! Internal modules for the tennis tournament client.
//!
//! This library provides the HTTP API client, command parsing, configuration
//! and terminal rendering used by the tc_client binary.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod render;
pub mod shell;
