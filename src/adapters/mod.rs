//! Adapters - outer surfaces around the library
//!
//! - `cli`: clap-based command line

pub mod cli;
