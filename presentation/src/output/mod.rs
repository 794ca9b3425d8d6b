//! Output formatting for the poll views

pub mod console;
pub mod formatter;
pub mod json;
