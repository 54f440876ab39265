// Parsing utilities
pub mod parse_float;
pub mod url_parser;

// Formatting utilities
pub mod money;

// JSON utilities
pub mod json_converter;

// Re-export all utilities for convenient access
pub use parse_float::parse_float_prefix;
pub use url_parser::hostname_from_url;
pub use money::{format_capacity, format_cedis};
pub use json_converter::{lenient_f64, lenient_opt_f64, string_or_number, value_to_short_string};
