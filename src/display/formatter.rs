//! Markdown terminal formatting using termimad

use termimad::{gray, MadSkin};

use crate::display::terminal::should_use_colors;

/// Print a rendered digest, styled when the terminal supports it
pub fn print_markdown(markdown: &str) {
    print!("{}", for_terminal(markdown, should_use_colors()));
}

/// Styled text when `colors` is set, the raw markdown otherwise
fn for_terminal(markdown: &str, colors: bool) -> String {
    if colors {
        skin().term_text(markdown).to_string()
    } else {
        format!("{}\n", markdown)
    }
}

fn skin() -> MadSkin {
    use termimad::crossterm::style::{Attribute, Color::*};

    let mut skin = MadSkin::default();

    skin.headers[0].set_fg(Yellow);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Cyan);
    skin.headers[1].add_attr(Attribute::Bold);

    // source names are rendered in italics
    skin.italic.set_fg(gray(14));
    skin.bold.add_attr(Attribute::Bold);

    skin.table.set_fg(White);
    skin.bullet.set_fg(Yellow);
    skin.quote_mark.set_fg(gray(10));

    skin
}
