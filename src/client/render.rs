use crate::models::{DualResponse, Prompt};
use std::fmt::Write;

const QUERY_PREVIEW_CHARS: usize = 30;
const RESPONSE_PREVIEW_CHARS: usize = 100;

/// Cuts `text` to `max_chars` characters, marking the cut with "...".
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn render_responses(query: &str, responses: &DualResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Responses for: {}", query);
    let _ = writeln!(out);
    let _ = writeln!(out, "== Casual/Creative Style ==");
    let _ = writeln!(out, "{}", responses.casual_response);
    let _ = writeln!(out);
    let _ = writeln!(out, "== Formal/Analytical Style ==");
    let _ = writeln!(out, "{}", responses.formal_response);
    out
}

pub fn render_history(items: &[Prompt]) -> String {
    if items.is_empty() {
        return "No history found for this user.\n".to_string();
    }

    let mut out = String::from("Past Interactions\n");
    for item in items {
        let _ = writeln!(out);
        let _ = writeln!(out, "Query: {}", truncate(&item.query, QUERY_PREVIEW_CHARS));
        let _ = writeln!(out, "  Time: {}", item.created_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(
            out,
            "  Casual: {}",
            truncate(&item.casual_response, RESPONSE_PREVIEW_CHARS)
        );
        let _ = writeln!(
            out,
            "  Formal: {}",
            truncate(&item.formal_response, RESPONSE_PREVIEW_CHARS)
        );
    }
    out
}
