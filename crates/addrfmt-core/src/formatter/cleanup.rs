// crates/addrfmt-core/src/formatter/cleanup.rs

//! Normalization of rendered template text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Ordered `(pattern, replacement)` rules. Order matters: later rules rely on
/// the shape left behind by earlier ones.
static CLEANUP_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"[\},\s]+$", ""),
        (r"(?m)^[,\s]+", ""),
        // line starting with a dash left over from an empty placeholder
        (r"(?m)^- ", ""),
        (r",\s*,", ", "),
        // deliberately has no trailing `/`: "A , B" collapses to "A, B"
        (r"[[:blank:]]+,[[:blank:]]+", ", "),
        (r"[[:blank:]][[:blank:]]+", " "),
        (r"[[:blank:]]\n", "\n"),
        (r"\n,", "\n"),
        (r",,+", ","),
        (r",\n", "\n"),
        (r"\n[[:blank:]]+", "\n"),
        (r"\n\n+", "\n"),
    ]
    .into_iter()
    .map(|(p, r)| (Regex::new(p).expect("static regex"), r))
    .collect()
});

/// Chunk that survives deduplication however often it appears.
const NEVER_DEDUPED: &str = "new york";

/// Normalizes whitespace and punctuation of rendered text and removes
/// duplicated lines and comma segments.
///
/// ```rust
/// use addrfmt_core::formatter::cleanup_render;
///
/// assert_eq!(cleanup_render("Main St,, Springfield"), "Main St, Springfield");
/// assert_eq!(cleanup_render("  12 Main St  \n\n, Springfield,\n"), "12 Main St\nSpringfield");
/// ```
pub fn cleanup_render(render: &str) -> String {
    let mut out = render.to_owned();
    for (pattern, replacement) in CLEANUP_RULES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
        out = dedupe(&out);
    }
    out.trim().to_owned()
}

fn never_deduped(chunk: &str) -> bool {
    chunk.to_lowercase() == NEVER_DEDUPED
}

/// Drops repeated lines, and comma segments already seen anywhere earlier
/// in the text. Chunks are compared trimmed.
pub fn dedupe(text: &str) -> String {
    let mut seen_lines: HashSet<&str> = HashSet::new();
    let mut seen_segments: HashSet<&str> = HashSet::new();
    let mut lines: Vec<String> = Vec::new();

    for line in text.split('\n').map(str::trim) {
        if never_deduped(line) {
            lines.push(line.to_owned());
            continue;
        }
        if !seen_lines.insert(line) {
            continue;
        }
        let segments: Vec<&str> = line
            .split(", ")
            .map(str::trim)
            .filter(|s| s.is_empty() || never_deduped(s) || seen_segments.insert(*s))
            .collect();
        let kept = segments.join(", ");
        if kept.is_empty() && !line.is_empty() {
            continue;
        }
        lines.push(kept);
    }

    lines.join("\n")
}
