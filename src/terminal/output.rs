//! Terminal output utilities.
//!
//! Box drawing, number formatting, ANSI helpers.

use std::io::{self, Write};

use crossterm::terminal;

// ============================================================================
// ANSI Color/Style Constants
// ============================================================================

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[38;5;9m";
pub const YELLOW: &str = "\x1b[38;5;11m";
pub const GREEN: &str = "\x1b[38;5;10m";

/// Flush stdout.
pub fn flush() {
    let _ = io::stdout().flush();
}

// ============================================================================
// Number Formatting
// ============================================================================

pub fn format_number(num: usize) -> String {
    let s = num.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Shorten a long decimal number to `1.234e56` form.
pub fn format_big(digits: &str) -> String {
    if digits.len() <= 15 {
        return digits.parse::<usize>().map_or_else(|_| digits.to_string(), format_number);
    }
    let (head, tail) = digits.split_at(1);
    format!("{head}.{}e{}", &tail[..3], digits.len() - 1)
}

// ============================================================================
// Box Drawing (74 char width, narrower on small terminals)
// ============================================================================

pub const BOX_WIDTH: usize = 74;
const MIN_BOX_WIDTH: usize = 40;

/// Box width fitted to the terminal.
pub fn box_width() -> usize {
    terminal::size()
        .map(|(cols, _)| usize::from(cols).clamp(MIN_BOX_WIDTH, BOX_WIDTH))
        .unwrap_or(BOX_WIDTH)
}

fn inner_width() -> usize {
    box_width() - 4
}

/// Print box top with optional title: ┌─ Title ───────────────────────────┐
pub fn box_top(title: &str) {
    let rule_len = box_width() - 2;
    if title.is_empty() {
        println!("┌{}┐", "─".repeat(rule_len));
        return;
    }
    let head = format!("─ {title} ");
    let tail = rule_len.saturating_sub(console_width(&head));
    println!("┌{head}{}┐", "─".repeat(tail));
}

/// Print one row between the box borders, padded to the box width.
/// Rows wider than the box are printed whole.
fn box_row(left: usize, content: &str) {
    let free = inner_width().saturating_sub(left + console_width(content));
    println!("│ {}{content}{} │", " ".repeat(left), " ".repeat(free));
}

/// │ content                                        │
pub fn box_line(content: &str) {
    box_row(0, content);
}

/// │          content          │
pub fn box_line_center(content: &str) {
    let slack = inner_width().saturating_sub(console_width(content));
    box_row(slack / 2, content);
}

/// │ label                                    value │
pub fn box_pair(label: &str, value: &str) {
    let gap = inner_width()
        .saturating_sub(console_width(label) + console_width(value))
        .max(1);
    box_line(&format!("{label}{}{value}", " ".repeat(gap)));
}

/// ├───────────────────────────────────────────────┤
pub fn box_rule() {
    println!("├{}┤", "─".repeat(box_width() - 2));
}

/// └───────────────────────────────────────────────┘
pub fn box_bottom() {
    println!("└{}┘", "─".repeat(box_width() - 2));
    flush();
}

const FLAG_COLUMN: usize = 27;

/// Print a help option: the flag in a fixed column, the description
/// word-wrapped beside it.
pub fn box_opt(flag: &str, desc: &str) {
    let desc_width = inner_width().saturating_sub(FLAG_COLUMN);
    let flag: String = flag.chars().take(FLAG_COLUMN).collect();
    let lines = wrap(desc, desc_width);

    let mut lines = lines.iter();
    let first = lines.next().map_or("", String::as_str);
    box_line(&format!("{flag:<FLAG_COLUMN$}{first}"));
    for line in lines {
        box_row(FLAG_COLUMN, line);
    }
}

/// Greedy word wrap to `width` columns.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Calculate display width accounting for ANSI escape codes.
pub fn console_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else {
            width += 1;
        }
    }
    width
}
