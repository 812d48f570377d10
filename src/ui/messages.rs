//! Console messages shown to the user. Errors go to stderr.

use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_STEP: &str = "▶";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

/// Like `success`, on stderr. Used for side effects such as schema upgrades.
pub fn status<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Progress line for a long-running step (network calls). Goes to stderr
/// so machine-readable output on stdout stays clean.
pub fn step<T: fmt::Display>(msg: T) {
    eprintln!("{}{} {}…{}", FG_CYAN, ICON_STEP, msg, RESET);
}

/// Section title underlined to its own width.
pub fn header<T: fmt::Display>(msg: T) {
    let title = msg.to_string();
    let rule = "─".repeat(title.chars().count().max(8));
    println!("{}{}{}{}", FG_BLUE, BOLD, title, RESET);
    println!("{}{}{}", FG_BLUE, rule, RESET);
}
