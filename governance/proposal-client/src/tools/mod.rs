//! Utility functions

pub mod reader;
pub mod time;
