//! Output formatting for CLI commands.
//!
//! Kept apart from command logic so the library can be used without the CLI.

use colored::Colorize;

use crate::core::CATCH_ALL;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Render a fallback chain entry; the catch-all is shown as `""`.
pub fn display_language(tag: &str) -> String {
    if tag == CATCH_ALL {
        "\"\"".to_string()
    } else {
        tag.to_string()
    }
}

/// `zh-CN: zh-cn, zh`
pub fn format_chain(tag: &str, chain: &[String]) -> String {
    let entries: Vec<String> = chain.iter().map(|entry| display_language(entry)).collect();
    format!("{}: {}", display_language(tag), entries.join(", "))
}

pub fn print_chain(tag: &str, chain: &[String]) {
    println!("{}", format_chain(tag, chain));
}

pub fn print_miss(namespace: &str, code: &str, language: &str) {
    eprintln!(
        "{} {}",
        FAILURE_MARK.red(),
        format!(
            "No description for {}.{} (language {})",
            namespace,
            code,
            display_language(language)
        )
        .red()
    );
}

pub fn print_created(file_name: &str) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", file_name).green()
    );
}
