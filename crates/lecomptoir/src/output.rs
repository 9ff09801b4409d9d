// Result rendering
//
// *La Sortie* (The Output) - Tier rendering for terminal and JSON consumers

use anyhow::{Context, Result};
use leclassement::{Classification, RankedMethod};
use std::fmt::Write;

/// Render a classification as pretty-printed JSON.
pub fn render_json(classification: &Classification) -> Result<String> {
    serde_json::to_string_pretty(classification).context("Failed to serialize classification")
}

/// Render a classification as a human-readable tier listing.
///
/// Suggestion tiers show percentage and matched categories; the excluded
/// tier shows its reasons instead, since its scores are not suggestions.
/// Unlisted methods are summarized by count only.
pub fn render_text(classification: &Classification) -> String {
    let mut out = String::new();

    render_tier(&mut out, "Best Fit", &classification.best_fit);
    render_tier(&mut out, "Good Alternatives", &classification.good_alternatives);
    render_tier(&mut out, "Stretch Options", &classification.stretch_options);

    let _ = writeln!(out, "Excluded ({})", classification.excluded.len());
    for entry in &classification.excluded {
        let _ = writeln!(out, "  {}", entry.method.name);
        for reason in &entry.exclusion_reasons {
            let _ = writeln!(out, "    - {reason}");
        }
    }
    let _ = writeln!(out);

    if !classification.unlisted.is_empty() {
        let _ = writeln!(
            out,
            "{} method(s) matched none of the selected filters and are not listed.",
            classification.unlisted.len()
        );
    }

    out
}

fn render_tier(out: &mut String, title: &str, entries: &[RankedMethod]) {
    let _ = writeln!(out, "{} ({})", title, entries.len());
    for entry in entries {
        let _ = writeln!(
            out,
            "  [{:>3.0}%] {}",
            entry.match_percentage * 100.0,
            entry.method.name
        );
        if !entry.matched_categories.is_empty() {
            let _ = writeln!(out, "         matched: {}", entry.matched_categories.join(", "));
        }
    }
    let _ = writeln!(out);
}
