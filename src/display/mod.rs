//! Terminal display module
//!
//! Prints rendered digests, styled only when stdout is a terminal.

mod formatter;
mod terminal;

pub use formatter::print_markdown;
