//! Shared formatting helpers.

mod number_format;

pub use number_format::format_count;
