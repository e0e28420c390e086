//! Color decision for terminal output

use std::io::IsTerminal;

/// Whether stdout should receive styled output
pub fn should_use_colors() -> bool {
    colors_from(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

/// NO_COLOR wins over CLICOLOR_FORCE, which wins over CLICOLOR=0, then the TTY check.
/// See https://no-color.org/ and https://bixense.com/clicolors/
fn colors_from<F>(lookup: F, is_tty: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("NO_COLOR").is_some() {
        return false;
    }

    if lookup("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }

    if lookup("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }

    is_tty
}
