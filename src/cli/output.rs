//! Shared CLI output helpers and report rendering.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::{AppraisalReport, SoldListing};

const RULE_WIDTH: usize = 56;

/// Longest title shown in the comparables table.
const TITLE_WIDTH: usize = 48;

/// Comparables shown in the table before the rest is summarized.
const TABLE_LIMIT: usize = 10;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl std::fmt::Display) {
    println!("{label:<14} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

#[derive(Tabled)]
struct ComparableRow {
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Ended")]
    ended: String,
}

impl From<&SoldListing> for ComparableRow {
    fn from(listing: &SoldListing) -> Self {
        Self {
            price: format!("${}", listing.price.round_dp(2)),
            title: truncate(&listing.title, TITLE_WIDTH),
            ended: listing.ended.clone(),
        }
    }
}

/// Render one appraisal report as operator-facing text.
pub fn render_report(query: &str, report: &AppraisalReport) {
    section(&format!("Appraisal: {query}"));

    if let Some(message) = &report.error {
        error(message);
        return;
    }

    if report.limit_reached {
        note("Daily free lookups used up");
        note("Upgrade to keep appraising today");
        return;
    }

    let Some(stats) = &report.stats else {
        if let Some(message) = &report.note {
            note(message);
        }
        return;
    };

    if let Some(score) = report.flip_score {
        print_score(score);
    }

    key_value("Avg sold", format!("${}", stats.avg.round_dp(2)));
    key_value("Median", format!("${}", stats.median.round_dp(2)));
    key_value("Low", format!("${}", stats.min.round_dp(2)));
    key_value("High", format!("${}", stats.max.round_dp(2)));
    key_value("Sales", stats.count);

    let titled: Vec<ComparableRow> = report
        .comparables
        .iter()
        .filter(|listing| !listing.title.is_empty())
        .take(TABLE_LIMIT)
        .map(ComparableRow::from)
        .collect();

    if !titled.is_empty() {
        println!();
        println!("{}", Table::new(titled).with(Style::rounded()));
    }

    if let Some(message) = &report.note {
        println!();
        note(message);
    }
}

/// Score bands: 80+ is a hot flip, 60+ good, 31+ fair, lower a poor one.
fn print_score(score: u8) {
    let line = match score {
        80..=u8::MAX => format!("{score}  Hot flip").green().to_string(),
        60..=79 => format!("{score}  Good flip").bright_green().to_string(),
        31..=59 => format!("{score}  Fair flip").yellow().to_string(),
        _ => format!("{score}  Low flip").red().to_string(),
    };
    println!("{line}");
    println!();
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text_intact() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_appends_an_ellipsis() {
        let truncated = truncate("a very long listing title indeed", 10);
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with('…'));
    }
}
