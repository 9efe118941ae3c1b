//! Section and bullet detection.
//!
//! Headers are matched against a fixed vocabulary, case-insensitive and
//! anchored at line start. Two or more recognized headers is the
//! threshold for reliable section structure; below that the layout
//! assessment raises a structural-risk flag.

use crate::model::{Bullet, Confidence, Line, Section, SectionKind};

/// Heuristic section detection runs at this fraction of the source's
/// base confidence.
const HEADER_CONFIDENCE_FACTOR: f32 = 0.75;

/// Recognized headers must fit on a short line.
const MAX_HEADER_CHARS: usize = 40;

/// Conventional bullet glyphs stripped from the front of a bullet line.
pub(crate) const BULLET_GLYPHS: &[char] = &['•', '-', '*', '·', '◦', '‣', '–'];

/// Header vocabulary: phrase → section kind. Longer phrases first so
/// "work experience" wins over "work".
const HEADER_VOCABULARY: &[(&str, SectionKind)] = &[
    ("professional experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("experience", SectionKind::Experience),
    ("professional summary", SectionKind::Summary),
    ("executive summary", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("summary", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("academic background", SectionKind::Education),
    ("education", SectionKind::Education),
    ("technical skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("skills", SectionKind::Skills),
    ("personal projects", SectionKind::Projects),
    ("selected projects", SectionKind::Projects),
    ("projects", SectionKind::Projects),
    ("contact information", SectionKind::Contact),
    ("contact", SectionKind::Contact),
    ("certifications", SectionKind::Other),
    ("publications", SectionKind::Other),
    ("awards", SectionKind::Other),
    ("languages", SectionKind::Other),
    ("volunteering", SectionKind::Other),
    ("interests", SectionKind::Other),
];

/// Strong action verbs; a bullet "has" one when its first tokens match.
const ACTION_VERBS: &[&str] = &[
    "accelerated",
    "achieved",
    "analyzed",
    "architected",
    "automated",
    "boosted",
    "built",
    "championed",
    "consolidated",
    "created",
    "cut",
    "decreased",
    "delivered",
    "designed",
    "developed",
    "directed",
    "doubled",
    "drove",
    "eliminated",
    "engineered",
    "established",
    "expanded",
    "generated",
    "grew",
    "implemented",
    "improved",
    "increased",
    "initiated",
    "launched",
    "led",
    "maintained",
    "managed",
    "mentored",
    "migrated",
    "modernized",
    "negotiated",
    "optimized",
    "orchestrated",
    "overhauled",
    "owned",
    "pioneered",
    "produced",
    "redesigned",
    "reduced",
    "refactored",
    "released",
    "resolved",
    "scaled",
    "secured",
    "shipped",
    "simplified",
    "spearheaded",
    "standardized",
    "streamlined",
    "strengthened",
    "transformed",
    "tripled",
    "won",
];

/// Output of the section scan.
pub struct SectionScan {
    pub sections: Vec<Section>,
    /// Two or more recognized headers were found.
    pub headers_recognized: bool,
}

/// Detect sections and their bullets across the assembled lines.
pub fn detect(lines: &[Line], base: Confidence) -> SectionScan {
    let confidence = base.scaled(HEADER_CONFIDENCE_FACTOR);

    let mut sections: Vec<Section> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if let Some(kind) = match_header(&line.text) {
            if let Some(open) = sections.last_mut() {
                open.end_line = index;
            }
            sections.push(Section::new(kind, line.text.trim(), confidence, index + 1));
        }
    }
    if let Some(open) = sections.last_mut() {
        open.end_line = lines.len();
    }

    let headers_recognized = sections.len() >= 2;

    for section_index in 0..sections.len() {
        let (start, end, kind) = {
            let s = &sections[section_index];
            (s.start_line, s.end_line, s.kind)
        };
        let mut bullets = Vec::new();
        for line in &lines[start..end.min(lines.len())] {
            if let Some(text) = bullet_text(&line.text, kind) {
                bullets.push(Bullet {
                    has_metric: has_metric(&text),
                    has_action_verb: has_action_verb(&text),
                    text,
                    section: section_index,
                });
            }
        }
        sections[section_index].bullets = bullets;
    }

    SectionScan {
        sections,
        headers_recognized,
    }
}

/// Match a line against the header vocabulary, anchored at line start.
pub fn match_header(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim().trim_end_matches(':').trim_end();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_HEADER_CHARS {
        return None;
    }

    let normalized = trimmed.to_lowercase();
    for (phrase, kind) in HEADER_VOCABULARY {
        if let Some(rest) = normalized.strip_prefix(phrase) {
            // Nothing after the phrase but punctuation/whitespace: this
            // line is a header, not a sentence that happens to start with
            // the word.
            if rest.trim_start_matches([' ', '\t', '-', '–', '&']).is_empty() {
                return Some(*kind);
            }
        }
    }
    None
}

/// Classify a line as a bullet and strip its leading glyph.
///
/// A line is a bullet when it starts with a recognized glyph or dash, or
/// when it is a short declarative line under a section whose children are
/// achievements (experience, projects).
fn bullet_text(line: &str, kind: SectionKind) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || match_header(trimmed).is_some() {
        return None;
    }

    let mut chars = trimmed.chars();
    let first = chars.next()?;
    if BULLET_GLYPHS.contains(&first) || is_decorative_glyph(first) {
        let rest = chars.as_str().trim_start();
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
        return None;
    }

    if kind.carries_bullets() && is_declarative(trimmed) {
        return Some(trimmed.to_string());
    }
    None
}

/// Bullet-like symbol outside the conventional set. Still a bullet for
/// content purposes; the layout scan flags it as a parse risk separately.
pub(crate) fn is_decorative_glyph(c: char) -> bool {
    matches!(
        c,
        '➤' | '➢' | '»' | '→' | '▶' | '▸' | '●' | '■' | '▪' | '❖' | '♦' | '✓' | '✔' | '★' | '✦'
    )
}

/// Short declarative line: plausible achievement text rather than a
/// company/date header line.
fn is_declarative(line: &str) -> bool {
    let chars = line.chars().count();
    if !(15..=220).contains(&chars) || !line.contains(' ') {
        return false;
    }
    // Employer lines are dominated by names, dates, and separators.
    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    if letters * 2 < chars {
        return false;
    }
    // "Company, Title, Jan 2020 - Present" style lines are not bullets.
    !looks_like_date_line(line)
}

/// Heuristic for employment-range lines.
fn looks_like_date_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    let has_year = lower
        .split(|c: char| !c.is_ascii_digit())
        .any(|run| run.len() == 4 && (run.starts_with("19") || run.starts_with("20")));
    has_year && (lower.contains("present") || lower.contains(" - ") || lower.contains(" – "))
}

/// A bullet has a metric when it carries a number, percent sign, or
/// currency symbol.
pub fn has_metric(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£' | '₹'))
}

/// A bullet has an action verb when its first one or two tokens match the
/// curated list.
pub fn has_action_verb(text: &str) -> bool {
    text.split_whitespace()
        .take(2)
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .any(|token| {
            ACTION_VERBS.contains(&token.as_str())
                || token
                    .split_once('-')
                    .is_some_and(|(_, suffix)| ACTION_VERBS.contains(&suffix))
        })
}
