//! IRC text formatting to ANSI escape sequences.

const BOLD: char = '\x02';
const COLOR: char = '\x03';
const RESET: char = '\x0f';
const STRIKETHROUGH: char = '\x1e';
const ITALIC: char = '\x1d';
const UNDERLINE: char = '\x1f';

/// ANSI colour suffix for IRC colours 0-15. The leading digit (`3` for
/// foreground, `4` for background) is added by the caller.
const BASIC_COLORS: [&str; 16] = [
    "7",        // white
    "0",        // black
    "4",        // blue
    "2",        // green
    "1",        // red
    "8;5;94",   // brown
    "3",        // magenta
    "8;5;215",  // orange
    "3",        // yellow
    "2",        // light green
    "6",        // cyan
    "8;5;159",  // light cyan
    "8;5;39",   // light blue
    "8;5;219",  // pink
    "8;5;7",    // grey
    "8;5;15",   // light grey
];

/// xterm-256 index for IRC colours 16-98.
const EXTENDED_COLORS: [u8; 83] = [
    52, 94, 100, 58, 22, 29, 23, 24, 17, 54, 53, 89, //
    88, 130, 142, 64, 28, 35, 30, 25, 18, 91, 90, 125, //
    124, 166, 184, 106, 34, 49, 37, 33, 19, 129, 127, 161, //
    196, 208, 226, 154, 46, 86, 51, 75, 21, 171, 201, 198, //
    203, 215, 227, 191, 83, 122, 87, 111, 63, 177, 207, 205, //
    217, 223, 229, 193, 157, 158, 159, 153, 147, 183, 219, 212, //
    16, 233, 235, 237, 239, 241, 244, 247, 250, 254, 231,
];

fn ansi_color(code: u8) -> Option<String> {
    match code {
        0..=15 => Some(BASIC_COLORS[usize::from(code)].to_owned()),
        16..=98 => Some(format!("8;5;{}", EXTENDED_COLORS[usize::from(code - 16)])),
        _ => None,
    }
}

/// Read up to two ASCII digits from the front of `chars`.
fn take_color_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u8> {
    let mut value: Option<u8> = None;
    for _ in 0..2 {
        match chars.peek().and_then(|c| c.to_digit(10)) {
            Some(digit) => {
                chars.next();
                value = Some(value.unwrap_or(0) * 10 + digit as u8);
            }
            None => break,
        }
    }
    value
}

/// Translate IRC formatting codes in `text` to ANSI escapes.
///
/// Colour numbers outside 0-98 are dropped. A reset is always appended so
/// formatting never leaks into the next line.
pub fn irc_to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            BOLD => out.push_str("\x1b[1m"),
            ITALIC => out.push_str("\x1b[3m"),
            UNDERLINE => out.push_str("\x1b[4m"),
            STRIKETHROUGH => out.push_str("\x1b[9m"),
            RESET => out.push_str("\x1b[0m"),
            COLOR => {
                let fg = take_color_number(&mut chars);
                let mut bg = None;
                if chars.peek() == Some(&',') {
                    chars.next();
                    bg = take_color_number(&mut chars);
                }
                if let Some(code) = fg.and_then(ansi_color) {
                    out.push_str(&format!("\x1b[3{code}m"));
                }
                if let Some(code) = bg.and_then(ansi_color) {
                    out.push_str(&format!("\x1b[4{code}m"));
                }
            }
            other => out.push(other),
        }
    }

    out.push_str("\x1b[0m");
    out
}
