//! Response handling module.
//!
//! This module provides the [`ResponseFormat`] trait for type-safe response
//! decoding, with implementations for the three payload kinds the API uses:
//! JSON records, plain text configuration values and binary agent downloads.

mod format;

pub use format::{BinaryFormat, JsonFormat, PlainTextFormat, ResponseFormat};
