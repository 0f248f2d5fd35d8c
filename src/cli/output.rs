//! Output formatting utilities

use crate::application::SyncReport;
use crate::domain::{CategoryFilter, Quote};

/// Shown when a random pick finds nothing to pick from
pub const NO_QUOTES_AVAILABLE: &str = "No quotes available.";
/// Shown when the selected category has no quotes
pub const NO_QUOTES_IN_CATEGORY: &str = "No quotes in this category.";

/// Format a list of quotes for display
pub fn format_quote_list(quotes: &[Quote]) -> String {
    if quotes.is_empty() {
        return "No quotes found".to_string();
    }

    let width = quotes.len().to_string().len();
    let mut output = String::new();
    for (i, quote) in quotes.iter().enumerate() {
        output.push_str(&format!("{:>width$}. {}\n", i + 1, quote, width = width));
    }
    output
}

/// Format the category choices, marking the current selection
pub fn format_category_list(categories: &[String], selected: &CategoryFilter) -> String {
    let marker = |active: bool| if active { "*" } else { " " };

    let mut output = format!(
        "{} all (All Categories)\n",
        marker(*selected == CategoryFilter::All)
    );
    for category in categories {
        let active = matches!(selected, CategoryFilter::Exact(c) if c == category);
        output.push_str(&format!("{} {}\n", marker(active), category));
    }
    output
}

/// Format the first quote of a filtered view, or the empty-category notice
pub fn format_filtered(quotes: &[Quote]) -> String {
    match quotes.first() {
        Some(first) => first.to_string(),
        None => NO_QUOTES_IN_CATEGORY.to_string(),
    }
}

pub fn format_last_quote(quote: Option<&Quote>) -> String {
    match quote {
        Some(q) => format!("Last Quote:\n{}\nCategory: {}", q.text, q.category),
        None => "No last quote available.".to_string(),
    }
}

pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = String::new();
    if report.remote_failed {
        output.push_str("Could not reach the server; local quotes kept as they are.\n");
    }
    if report.changed {
        output.push_str(&format!(
            "Quotes synced with server! ({} from server, {} local kept, {} local replaced)",
            report.remote_count, report.kept_local, report.dropped_local
        ));
    } else {
        output.push_str("Quotes already up to date.");
    }
    output
}
