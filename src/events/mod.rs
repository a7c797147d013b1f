//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Command events: search, selection and status requests applied to the
//!   query coordinator
//! - Input: turning lines typed on stdin into command events

pub mod command;
pub mod input;
