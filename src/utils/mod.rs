//! Utility functions

pub mod encoding;
pub mod paths;

pub use encoding::{decode_text, is_binary_bytes};
pub use paths::{display_relative, normalize_path};
