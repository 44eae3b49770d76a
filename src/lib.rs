#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Public so the binary and the integration tests can reach every layer.
pub mod app;
pub mod config;
pub mod core;
pub mod utils;
