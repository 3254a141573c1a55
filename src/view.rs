use crossterm::style::{style, Color, Stylize};
use itertools::Itertools;

use crate::resolver::Lookup;
use crate::session::Session;

pub const HOT_PINK: Color = Color::Rgb {
    r: 0xff,
    g: 0x06,
    b: 0xb7,
};
pub const ERROR_RED: Color = Color::Rgb {
    r: 0xff,
    g: 0x57,
    b: 0x33,
};

pub const DOMAIN_PROMPT: &str = "Enter a domain name:";
pub const A_RECORD_LABEL: &str = "A Record:";
pub const CNAMES_LABEL: &str = "CName Records:";
pub const ERROR_LABEL: &str = "Error Messages:";

const INPUT_PREFIX: &str = "> ";
const CURSOR: char = '█';

fn paint(text: &str, color: Color, styled: bool) -> String {
    if styled {
        style(text).with(color).to_string()
    } else {
        text.to_owned()
    }
}

// Renders the whole frame for the current session state. With styled set
// to false the frame is plain text.
pub fn render<L: Lookup>(session: &Session<L>, styled: bool) -> String {
    let mut lines = vec![
        paint(DOMAIN_PROMPT, HOT_PINK, styled),
        format!("{INPUT_PREFIX}{}{CURSOR}", session.input()),
        String::new(),
        paint(A_RECORD_LABEL, HOT_PINK, styled),
    ];
    lines.extend(session.a_records().iter().map(|record| record.to_string()));
    lines.push(paint(CNAMES_LABEL, HOT_PINK, styled));
    lines.extend(session.cnames().iter().map(|cname| cname.to_string()));

    if !session.error().is_empty() {
        lines.push(paint(ERROR_LABEL, ERROR_RED, styled));
        lines.push(session.error().trim_end_matches('\n').to_owned());
    }

    lines.iter().join("\n")
}
