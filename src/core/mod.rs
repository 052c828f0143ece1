//! Core application module
//!
//! This module contains:
//! - Application state and message dispatch
//! - Console front end (command input, prompts, output)

pub mod app;
pub mod console;
