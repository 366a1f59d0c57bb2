//! Reply text rendering for command handlers.

use chrono::NaiveDateTime;

use crate::adapter::outbound::sqlite::{CitationRow, OffenderRow};

const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a stored timestamp as a short date, falling back to the raw text.
#[must_use]
pub fn format_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, STORED_FORMAT)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Offender name with alliance tag, e.g. `Alice [Red]`.
#[must_use]
pub fn offender_label(offender: &OffenderRow) -> String {
    match offender.alliance.as_deref() {
        Some(alliance) if !alliance.is_empty() => format!("{} [{alliance}]", offender.name),
        _ => offender.name.clone(),
    }
}

/// `1 citation`, `3 citations`.
#[must_use]
pub fn citation_count(count: usize) -> String {
    if count == 1 {
        "1 citation".to_string()
    } else {
        format!("{count} citations")
    }
}

/// Full record for one offender and its citations.
#[must_use]
pub fn format_offender(offender: &OffenderRow, citations: &[CitationRow]) -> String {
    let mut lines = vec![
        format!("🚨 {}", offender_label(offender)),
        format!("On record since {}", format_date(&offender.created_at)),
        citation_count(citations.len()),
    ];

    for citation in citations {
        lines.push(format_citation_line(citation));
    }

    lines.join("\n")
}

/// One line per citation: `#3 Jan 5, 2024: spam`.
#[must_use]
pub fn format_citation_line(citation: &CitationRow) -> String {
    let date = format_date(&citation.created_at);
    match citation.note.as_deref() {
        Some(note) if !note.is_empty() => format!("  #{} {date}: {note}", citation.id),
        _ => format!("  #{} {date}", citation.id),
    }
}

/// Longest message Telegram accepts, in UTF-16 code units.
pub const MESSAGE_LIMIT: usize = 4096;

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn omitted_lines(count: usize) -> String {
    if count == 1 {
        "\n… and 1 more line".to_string()
    } else {
        format!("\n… and {count} more lines")
    }
}

/// Cut `text` to at most `limit` UTF-16 code units.
///
/// Whole trailing lines are dropped and replaced by a count of what was
/// left out. A first line that is too long on its own is clipped.
#[must_use]
pub fn fit_reply(text: &str, limit: usize) -> String {
    if utf16_len(text) <= limit {
        return text.to_string();
    }

    let lines: Vec<&str> = text.lines().collect();
    let reserve = utf16_len(&format!("…{}", omitted_lines(lines.len())));
    let budget = limit.saturating_sub(reserve);

    let mut kept = 0;
    let mut used = 0;
    for line in &lines {
        let needed = utf16_len(line) + usize::from(kept > 0);
        if used + needed > budget {
            break;
        }
        used += needed;
        kept += 1;
    }

    let mut reply = if kept == 0 {
        let mut clipped = clip(lines.first().copied().unwrap_or_default(), budget);
        clipped.push('…');
        kept = 1;
        clipped
    } else {
        lines[..kept].join("\n")
    };
    let omitted = lines.len().saturating_sub(kept);
    if omitted > 0 {
        reply.push_str(&omitted_lines(omitted));
    }
    reply
}

fn clip(line: &str, budget: usize) -> String {
    let mut clipped = String::new();
    let mut used = 0;
    for c in line.chars() {
        used += c.len_utf16();
        if used > budget {
            break;
        }
        clipped.push(c);
    }
    clipped
}
