//! Layout-risk detection over the assembled lines.
//!
//! These heuristics operate on raw line text, independent of section
//! detection, and feed the additive parse-failure risk score. The
//! per-flag weights are deliberately fixed, hand-tuned constants: the
//! scoring stays auditable and testable, and parity matters more than
//! optimality.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Line;

use super::sections::{is_decorative_glyph, match_header};

/// Risk weight: multi-column layout.
pub const RISK_MULTI_COLUMN: u8 = 25;
/// Risk weight: table-like separators.
pub const RISK_TABLES: u8 = 20;
/// Risk weight: icon/image glyphs.
pub const RISK_ICON_GLYPHS: u8 = 10;
/// Risk weight: repeated header/footer furniture.
pub const RISK_HEADER_FOOTER: u8 = 15;
/// Risk weight: bullet glyphs outside the conventional set.
pub const RISK_NONSTANDARD_BULLETS: u8 = 10;
/// Risk weight: unconventional date formats.
pub const RISK_NONSTANDARD_DATES: u8 = 10;
/// Risk weight: fewer than two recognized section headers.
pub const RISK_NO_SECTION_HEADERS: u8 = 10;

/// Decorative glyphs that ATS text extraction tends to mangle.
const ICON_GLYPHS: &[char] = &[
    '✉', '☎', '✆', '📧', '📱', '📞', '📍', '🔗', '🌐', '💼', '🎓', '🏠', '⚙', '🛠',
];

/// Lines this short near the page edge are header/footer candidates.
const FURNITURE_MAX_CHARS: usize = 48;

/// How many lines from the top and bottom count as the page edge.
const FURNITURE_EDGE_LINES: usize = 3;

fn furniture_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(page\s+\d+|\d+\s*/\s*\d+|confidential|r[ée]sum[ée]|curriculum\s+vitae|cv)\b")
            .unwrap()
    })
}

/// Unconventional date shapes: ordinal days, fully dotted numeric dates,
/// or spelled-out "1st of January" forms.
fn nonstandard_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?ix)
            \b\d{1,2}(?:st|nd|rd|th)\s+(?:of\s+)?[a-z]{3,9}\.?\s+\d{4}\b
            | \b\d{1,2}\.\d{1,2}\.\d{4}\b
        ")
        .unwrap()
    })
}

/// Output of the layout scan.
pub struct LayoutScan {
    pub multi_column: bool,
    pub tables: bool,
    pub icon_glyphs: bool,
    pub header_footer_repetition: bool,
    pub nonstandard_bullets: bool,
    pub nonstandard_dates: bool,
    /// Additive risk in `[0,100]`, saturating.
    pub risk_score: u8,
}

/// Assess layout risk across the assembled lines.
pub fn assess(lines: &[Line], headers_recognized: bool) -> LayoutScan {
    let multi_column = detect_multi_column(lines);
    let tables = detect_tables(lines);
    let icon_glyphs = lines
        .iter()
        .any(|l| l.text.chars().any(|c| ICON_GLYPHS.contains(&c)));
    let header_footer_repetition = detect_furniture(lines);
    let nonstandard_bullets = lines.iter().any(|l| {
        l.text
            .trim_start()
            .chars()
            .next()
            .is_some_and(is_decorative_glyph)
    });
    let nonstandard_dates = lines
        .iter()
        .any(|l| nonstandard_date_regex().is_match(&l.text));

    let mut risk: u32 = 0;
    if multi_column {
        risk += RISK_MULTI_COLUMN as u32;
    }
    if tables {
        risk += RISK_TABLES as u32;
    }
    if icon_glyphs {
        risk += RISK_ICON_GLYPHS as u32;
    }
    if header_footer_repetition {
        risk += RISK_HEADER_FOOTER as u32;
    }
    if nonstandard_bullets {
        risk += RISK_NONSTANDARD_BULLETS as u32;
    }
    if nonstandard_dates {
        risk += RISK_NONSTANDARD_DATES as u32;
    }
    if !headers_recognized {
        risk += RISK_NO_SECTION_HEADERS as u32;
    }

    LayoutScan {
        multi_column,
        tables,
        icon_glyphs,
        header_footer_repetition,
        nonstandard_bullets,
        nonstandard_dates,
        risk_score: risk.min(100) as u8,
    }
}

/// Multi-column: two or more lines broken into column-like runs, i.e.
/// containing at least two runs of 3+ consecutive whitespace characters.
fn detect_multi_column(lines: &[Line]) -> bool {
    lines
        .iter()
        .filter(|l| whitespace_runs(l.text.trim(), 3) >= 2)
        .count()
        >= 2
}

/// Count interior whitespace runs of at least `min_len` characters.
fn whitespace_runs(text: &str, min_len: usize) -> usize {
    let mut runs = 0;
    let mut current = 0;
    for c in text.chars() {
        if c.is_whitespace() {
            current += 1;
        } else {
            if current >= min_len {
                runs += 1;
            }
            current = 0;
        }
    }
    runs
}

/// Tables: pipe/tab/double-comma separated rows. Either several separator
/// lines, or one line that is unambiguously a row.
fn detect_tables(lines: &[Line]) -> bool {
    let separator_count = |text: &str| {
        text.matches('|').count() + text.matches('\t').count() + text.matches(",,").count()
    };
    let separator_lines = lines
        .iter()
        .filter(|l| separator_count(&l.text) >= 1)
        .count();
    let dense_line = lines.iter().any(|l| separator_count(&l.text) >= 2);

    separator_lines >= 2 || dense_line
}

/// Header/footer furniture: short "page N / confidential / résumé" lines
/// within the top or bottom edge of the document.
fn detect_furniture(lines: &[Line]) -> bool {
    let edge = |index: usize| {
        index < FURNITURE_EDGE_LINES || index + FURNITURE_EDGE_LINES >= lines.len()
    };

    lines.iter().enumerate().any(|(index, line)| {
        let trimmed = line.text.trim();
        edge(index)
            && trimmed.chars().count() <= FURNITURE_MAX_CHARS
            && match_header(trimmed).is_none()
            && furniture_regex().is_match(trimmed)
    })
}
