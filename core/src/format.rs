//! Message formatting.
//!
//! Assistant replies use a small fixed markup: `**bold**` emphasis, literal
//! newlines, and status lines opened by a known emoji glyph. The formatter
//! turns raw content into structured spans so the renderer never has to
//! interpret markup strings itself.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Non-greedy, no nesting: `**a** and **b**` yields two bold spans.
    static ref BOLD_RE: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
}

/// One styled fragment of a formatted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Break,
}

/// Glyphs the backend uses to open task, priority and contact lines.
/// Lines starting with one of these pass through formatting untouched.
pub const STATUS_GLYPHS: [&str; 16] = [
    "✅", "⏳", "🔴", "🟡", "🟢", "📧", "📞", "💬", "⚠️", "📋", "📅", "📶", "🏖️", "📚", "💰",
    "📊",
];

/// Whether a line opens with one of the recognized status glyphs
pub fn starts_with_status_glyph(line: &str) -> bool {
    STATUS_GLYPHS.iter().any(|glyph| line.starts_with(glyph))
}

/// Formats raw message content into styled spans.
///
/// Empty input yields no spans; malformed markup is passed through as plain
/// text rather than failing.
pub fn format_message(content: &str) -> Vec<Span> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            spans.push(Span::Break);
        }
        push_line_spans(line, &mut spans);
    }
    spans
}

/// Formats content that may be absent. `None` and `""` both yield no spans.
pub fn format_opt(content: Option<&str>) -> Vec<Span> {
    content.map(format_message).unwrap_or_default()
}

/// Flattens spans back to unstyled text; breaks become newlines
pub fn to_plain(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Plain(text) | Span::Bold(text) => out.push_str(text),
            Span::Break => out.push('\n'),
        }
    }
    out
}

fn push_line_spans(line: &str, spans: &mut Vec<Span>) {
    let mut last = 0;
    for caps in BOLD_RE.captures_iter(line) {
        // group 0 always exists on a match
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            spans.push(Span::Plain(line[last..whole.start()].to_string()));
        }
        spans.push(Span::Bold(caps[1].to_string()));
        last = whole.end();
    }
    if last < line.len() {
        spans.push(Span::Plain(line[last..].to_string()));
    }
}
