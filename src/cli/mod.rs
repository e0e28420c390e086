//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - run: Fetch every platform and write the data file and listing (default)
//! - config init: Write a configuration file with the built-in source registry
//! - show latest: Display the most recent data file

pub mod config;
pub mod run;
pub mod show;
