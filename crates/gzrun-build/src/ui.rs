//! Terminal output for the build runner.
//!
//! Structured events go to stderr through `tracing`; everything here is the
//! human-facing console.

use std::time::Duration;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn banner(target: &str) {
    println!();
    println!("  {BOLD}gzrun-build{RESET} {target} {DIM}v{VERSION}{RESET}");
    println!();
}

pub fn task_started(name: &str) {
    println!("  {CYAN}\u{2192}{RESET} {name}");
}

pub fn task_finished(name: &str, elapsed: Duration) {
    println!(
        "  {GREEN}\u{2713}{RESET} {name} {DIM}({}){RESET}",
        format_elapsed(elapsed)
    );
}

pub fn task_failed(name: &str, message: &str) {
    println!("  {RED}\u{2717}{RESET} {name}: {message}");
}

pub fn warn(message: &str) {
    println!("  {YELLOW}!{RESET} {message}");
}

pub fn info(message: &str) {
    println!("  {DIM}{message}{RESET}");
}

/// `[LABEL] line` in green, on stdout.
pub fn compiler_line(label: &str, line: &str) {
    println!("{}", format_compiler_line(label, line));
}

/// `[LABEL ERROR] line` in red, on stderr.
pub fn compiler_error(label: &str, line: &str) {
    eprintln!("{}", format_compiler_error(label, line));
}

pub fn format_compiler_line(label: &str, line: &str) -> String {
    format!("{GREEN}[{label}]{RESET} {}", line.trim())
}

pub fn format_compiler_error(label: &str, line: &str) -> String {
    format!("{RED}[{label} ERROR]{RESET} {line}")
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis >= 1000 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{millis}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiler_line_is_green_and_trimmed() {
        let line = format_compiler_line("CLIENT", "  Found 0 errors.  ");
        assert_eq!(line, "\x1b[32m[CLIENT]\x1b[0m Found 0 errors.");
    }

    #[test]
    fn test_compiler_error_is_red() {
        let line = format_compiler_error("BACKEND", "error TS2304");
        assert_eq!(line, "\x1b[31m[BACKEND ERROR]\x1b[0m error TS2304");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(12)), "12ms");
        assert_eq!(format_elapsed(Duration::from_millis(2500)), "2.5s");
    }
}
