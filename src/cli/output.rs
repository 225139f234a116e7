//! Terminal styling for human-readable listings

use console::style;

pub fn found(message: &str) {
    println!("  {} {}", style("✓").green(), message);
}

pub fn missing(message: &str) {
    println!("  {} {}", style("✗").red(), message);
}

pub fn section(message: &str) {
    println!("{}", style(message).bold());
}
