//! Terminal output helpers shared by the commands

use colored::*;

pub fn header(title: &str) {
    println!();
    println!("  {}", title.bright_blue().bold());
    println!("  {}", "═".repeat(title.chars().count()).bright_blue());
}

pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("    {}: {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green().bold(), message);
}

pub fn warning(message: &str) {
    println!("  {} {}", "⚠".bright_yellow().bold(), message.bright_yellow());
}

/// `[3/40] name` progress line for per-program loops
pub fn progress(current: usize, total: usize, message: &str) {
    println!(
        "  {} {}",
        format!("[{}/{}]", current, total).dimmed(),
        message
    );
}
