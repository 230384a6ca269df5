//! Terminal output helpers
//!
//! Status lines go to stderr so stdout only carries data that can be piped
//! into files or other tools. Color is dropped when `NO_COLOR` is set.

const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";
const BLUE: &str = "34";

pub(crate) fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Status prefix, colored when the terminal allows it
fn prefix(color: &str, symbol: &str, plain: &str) -> String {
    if use_color() {
        format!("\x1b[{color}m{symbol}\x1b[0m")
    } else {
        plain.to_string()
    }
}

pub fn print_success(message: &str) {
    eprintln!("{} {message}", prefix(GREEN, "✓", "OK:"));
}

pub fn print_warning(message: &str) {
    eprintln!("{} {message}", prefix(YELLOW, "Warning:", "Warning:"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", prefix(RED, "✗", "Error:"));
}

pub fn print_info(message: &str) {
    eprintln!("{} {message}", prefix(BLUE, "ℹ", "Info:"));
}

/// Data line on stdout, never colored
pub fn print_data(message: &str) {
    println!("{message}");
}

/// Indented `key: value` line on stdout, key in bold
pub fn print_key_value(key: &str, value: &str) {
    if use_color() {
        println!("  \x1b[1m{key}:\x1b[0m {value}");
    } else {
        println!("  {key}: {value}");
    }
}
