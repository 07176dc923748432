//! Output formatting utilities.

use saidify_core::SiteReport;
use serde::Serialize;

/// Formats any serializable value as indented JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a site report as a table row.
pub fn format_site_row(site: &SiteReport) -> String {
    let embedded = match site.embedded.as_deref() {
        None | Some("") => "-",
        Some(s) => s,
    };
    format!(
        "{:<28} {:<10} {:<44} {}",
        truncate(&site.location.to_string(), 28),
        format!("{:?}", site.verdict),
        truncate(embedded, 44),
        site.computed
    )
}

/// Prints the site table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<28} {:<10} {:<44} {}",
        "SITE", "VERDICT", "EMBEDDED", "COMPUTED"
    );
    println!("{}", "-".repeat(128));
}

/// Shortens `s` to at most `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
