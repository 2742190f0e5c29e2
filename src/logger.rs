//! Terminal output with colored module prefixes.
//!
//! ```ignore
//! log!("assets"; "✓ Generated {}", file_name);
//! debug!("config"; "found {}", path.display());
//! ```

use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by --verbose)
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message only when --verbose is enabled
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    if module.eq_ignore_ascii_case("error") {
        eprintln!("{prefix} {message}");
    } else {
        println!("{prefix} {message}");
    }
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "assets" => prefix.bright_green().bold().to_string(),
        "manifest" => prefix.bright_cyan().bold().to_string(),
        "config" => prefix.bright_blue().bold().to_string(),
        "install" => prefix.bright_magenta().bold().to_string(),
        "report" => prefix.bright_yellow().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bold().to_string(),
    }
}
