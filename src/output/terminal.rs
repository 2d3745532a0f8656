//! Terminal output formatting

use console::style;

/// Indent continuation lines so multi-line messages stay aligned under the
/// status icon.
fn indent_continuation(message: &str) -> String {
    message.lines().collect::<Vec<_>>().join("\n  ")
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), indent_continuation(message));
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), indent_continuation(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), indent_continuation(message));
}

/// Print a bare value for scripts to consume
pub fn print_value(value: &str) {
    println!("{}", value);
}
