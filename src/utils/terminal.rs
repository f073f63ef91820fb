//! Terminal output utilities

use console::style;

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}: {}", style("success").green().bold(), message);
}

/// Print a step banner before running an external tool
pub fn print_step(label: &str, message: &str) {
    println!("{} {}", style(format!("[{}]", label)).cyan().bold(), message);
}
