//! CLI argument parsing and validation.

mod args;

pub use args::{Args, Command, UploadParseError, parse_audio};
