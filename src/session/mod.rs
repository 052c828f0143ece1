//! Drawing session
//!
//! This module contains:
//! - Message types the widget reacts to
//! - Parsing of console command lines into messages
//! - Session defaults and the recorded objects

pub mod commands;
pub mod messages;
pub mod state;
