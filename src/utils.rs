//! Utilities for repo-bootstrap

use std::fmt::Display;

/// Style a snippet of text as a link
pub fn format_url<T: Display, U: Display>(text: T, url: U) -> String {
    format!("\u{1b}]8;;{url}\u{1b}\\{text}\u{1b}]8;;\u{1b}\\")
}

/// Report a step which went through
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {{
        println!(
            "  {} {}",
            colored::Colorize::bright_green("✓"),
            format!($($arg)*)
        )
    }};
}

/// Report a step which failed, the run may still continue
#[macro_export]
macro_rules! fail {
    ($($arg:tt)*) => {{
        eprintln!(
            "  {} {}",
            colored::Colorize::bright_red("✗"),
            format!($($arg)*)
        )
    }};
}

/// Announce what is about to happen
#[macro_export]
macro_rules! note {
    ($($arg:tt)*) => {{
        println!(
            "\n  {} {}",
            colored::Colorize::bright_black("»"),
            format!($($arg)*)
        )
    }};
}
