//! Helper functions shared by the generator and CLI output

mod date;

pub use date::*;
