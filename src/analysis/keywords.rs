//! Keyword alignment against a role table and, when available, the job
//! description.
//!
//! Two-mode design: with no job description the static role table alone
//! drives the score; with one, term extraction from the description takes
//! over most of the weight through an explicit, named blend parameter.
//! Pure Rust throughout — no semantic model is consulted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::JobContext;
use crate::model::DocumentModel;

use super::issue::{Evidence, Issue, IssueCategory};

/// Below this fraction of matched role keywords a keyword-gap warning is
/// raised.
const KEYWORD_GAP_THRESHOLD: f32 = 0.5;

/// How many missing terms an issue cites as evidence at most.
const MAX_CITED_TERMS: usize = 5;

/// Job-description terms shorter than this are ignored.
const MIN_JD_TERM_CHARS: usize = 3;

/// A job-description term must appear this often to count.
const MIN_JD_TERM_FREQUENCY: u32 = 2;

/// Cap on extracted job-description terms.
const MAX_JD_TERMS: usize = 20;

/// Which keyword source drove the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMode {
    /// Static role table only.
    RoleOnly,
    /// Role table blended with terms extracted from the job description.
    JdAware,
}

/// Outcome of the keyword checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAssessment {
    /// Raw role-alignment sub-score, `[0,100]`, uncalibrated.
    pub role_alignment: f32,
    /// Scoring mode used.
    pub mode: KeywordMode,
    /// Role/JD terms found in the document.
    pub matched: Vec<String>,
    /// Role/JD terms absent from the document.
    pub missing: Vec<String>,
    /// Findings raised by this check.
    pub issues: Vec<Issue>,
}

/// Role keyword table. Lookup is by normalized substring so free-form
/// role strings ("Senior Backend Engineer") land on the right row.
fn role_keywords(role: &str) -> &'static [&'static str] {
    const SOFTWARE: &[&str] = &[
        "software", "engineering", "api", "testing", "debugging", "architecture", "code review",
        "agile", "git", "ci/cd", "cloud", "database", "scalability", "microservices",
    ];
    const DATA: &[&str] = &[
        "python", "sql", "statistics", "machine learning", "visualization", "pandas", "modeling",
        "experimentation", "etl", "dashboards", "analytics", "regression",
    ];
    const PRODUCT: &[&str] = &[
        "roadmap", "stakeholders", "metrics", "user research", "prioritization", "launch",
        "strategy", "a/b testing", "requirements", "cross-functional", "okrs", "discovery",
    ];
    const DEVOPS: &[&str] = &[
        "kubernetes", "docker", "terraform", "ci/cd", "monitoring", "incident", "automation",
        "linux", "cloud", "reliability", "infrastructure", "observability",
    ];
    const DESIGN: &[&str] = &[
        "figma", "prototyping", "user research", "wireframes", "accessibility", "design system",
        "usability", "interaction", "visual design", "ux",
    ];
    const MARKETING: &[&str] = &[
        "campaigns", "seo", "analytics", "content", "brand", "conversion", "engagement",
        "social media", "email marketing", "growth", "segmentation",
    ];
    const GENERAL: &[&str] = &[
        "leadership", "communication", "collaboration", "project management", "analysis",
        "planning", "problem solving", "results", "strategy", "teamwork",
    ];

    let normalized = role.to_lowercase();
    let matches_any = |needles: &[&str]| needles.iter().any(|n| normalized.contains(n));

    if matches_any(&["data scien", "data analy", "machine learning", "ml engineer"]) {
        DATA
    } else if matches_any(&["devops", "sre", "site reliability", "platform engineer"]) {
        DEVOPS
    } else if matches_any(&["product manager", "product owner"]) {
        PRODUCT
    } else if matches_any(&["designer", "ux", "ui "]) {
        DESIGN
    } else if matches_any(&["marketing", "growth"]) {
        MARKETING
    } else if matches_any(&["engineer", "developer", "software", "programmer"]) {
        SOFTWARE
    } else {
        GENERAL
    }
}

/// Run the keyword alignment check.
pub fn check_keywords(model: &DocumentModel, context: &JobContext, jd_weight: f32) -> KeywordAssessment {
    let haystack = build_haystack(model);

    let role_terms = role_keywords(&context.target_role);
    let (role_matched, role_missing) = partition_terms(
        role_terms.iter().map(|t| (t.to_string(), 1u32)),
        &haystack,
    );
    let role_score = fraction_score(&role_matched, &role_missing);

    let jd_terms = context
        .job_description
        .as_deref()
        .map(extract_jd_terms)
        .unwrap_or_default();

    let (mode, score, matched, missing) = if jd_terms.is_empty() {
        (KeywordMode::RoleOnly, role_score, role_matched, role_missing)
    } else {
        let (jd_matched, jd_missing) = partition_terms(jd_terms.into_iter(), &haystack);
        let jd_score = weighted_score(&jd_matched, &jd_missing);
        let blended = jd_weight * jd_score + (1.0 - jd_weight) * role_score;

        // Surface the union so callers see both vocabularies.
        let mut matched = jd_matched;
        matched.extend(role_matched);
        let mut missing = jd_missing;
        missing.extend(role_missing);
        dedup_terms(&mut matched);
        dedup_terms(&mut missing);
        missing.retain(|(t, _)| !matched.iter().any(|(m, _)| m == t));

        (KeywordMode::JdAware, blended, matched, missing)
    };

    let total_weight: u32 = matched.iter().chain(missing.iter()).map(|(_, w)| w).sum();
    let matched_weight: u32 = matched.iter().map(|(_, w)| w).sum();
    let matched_fraction = if total_weight > 0 {
        matched_weight as f32 / total_weight as f32
    } else {
        0.0
    };

    let mut issues = Vec::new();
    if matched_fraction < KEYWORD_GAP_THRESHOLD && !missing.is_empty() {
        let mut cited = missing.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>();
        cited.truncate(MAX_CITED_TERMS);

        let mut issue = Issue::warning(
            IssueCategory::Keywords,
            format!(
                "keyword gap: {} of {} expected terms missing",
                missing.len(),
                matched.len() + missing.len()
            ),
            Evidence::Keyword {
                term: cited[0].clone(),
            },
        );
        for term in cited.into_iter().skip(1) {
            issue = issue.with_evidence(Evidence::Keyword { term });
        }
        issues.push(issue);
    }

    KeywordAssessment {
        role_alignment: score.clamp(0.0, 100.0),
        mode,
        matched: matched.into_iter().map(|(t, _)| t).collect(),
        missing: missing.into_iter().map(|(t, _)| t).collect(),
        issues,
    }
}

/// Lowercased search text: canonical document text plus skill names.
fn build_haystack(model: &DocumentModel) -> String {
    let mut haystack = model.plain_text().to_lowercase();
    for skill in &model.skills {
        haystack.push('\n');
        haystack.push_str(&skill.name);
    }
    haystack
}

/// Split weighted terms into (matched, missing) against the haystack.
fn partition_terms(
    terms: impl Iterator<Item = (String, u32)>,
    haystack: &str,
) -> (Vec<(String, u32)>, Vec<(String, u32)>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for (term, weight) in terms {
        if contains_term(haystack, &term) {
            matched.push((term, weight));
        } else {
            missing.push((term, weight));
        }
    }
    (matched, missing)
}

fn fraction_score(matched: &[(String, u32)], missing: &[(String, u32)]) -> f32 {
    let total = matched.len() + missing.len();
    if total == 0 {
        return 0.0;
    }
    100.0 * matched.len() as f32 / total as f32
}

fn weighted_score(matched: &[(String, u32)], missing: &[(String, u32)]) -> f32 {
    let total: u32 = matched.iter().chain(missing.iter()).map(|(_, w)| w).sum();
    if total == 0 {
        return 0.0;
    }
    let hit: u32 = matched.iter().map(|(_, w)| w).sum();
    100.0 * hit as f32 / total as f32
}

fn dedup_terms(terms: &mut Vec<(String, u32)>) {
    let mut seen = std::collections::HashSet::new();
    terms.retain(|(t, _)| seen.insert(t.clone()));
}

/// Extract weighted terms from a job description: frequency-counted
/// tokens with stop words removed, most frequent first.
fn extract_jd_terms(jd: &str) -> Vec<(String, u32)> {
    const STOP_WORDS: &[&str] = &[
        "the", "and", "for", "with", "you", "will", "our", "are", "that", "this", "have", "from",
        "your", "who", "what", "their", "they", "about", "into", "work", "team", "role", "years",
        "experience", "ability", "strong", "plus", "must", "required", "preferred", "including",
        "etc", "were", "been", "being", "more", "than", "such", "other", "across", "within",
        "using", "able", "well", "join", "help", "per", "all", "any", "can", "not", "job",
    ];

    let mut frequencies: BTreeMap<String, u32> = BTreeMap::new();
    for token in jd
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '/' | '-')))
    {
        let token = token.trim_matches(|c: char| matches!(c, '.' | '-' | '/'));
        if token.chars().count() < MIN_JD_TERM_CHARS
            || token.chars().all(|c| c.is_ascii_digit())
            || STOP_WORDS.contains(&token)
        {
            continue;
        }
        *frequencies.entry(token.to_string()).or_insert(0) += 1;
    }

    let mut terms: Vec<(String, u32)> = frequencies
        .into_iter()
        .filter(|(_, freq)| *freq >= MIN_JD_TERM_FREQUENCY)
        .collect();
    // Most frequent first; the BTreeMap already fixed the tie order.
    terms.sort_by(|a, b| b.1.cmp(&a.1));
    terms.truncate(MAX_JD_TERMS);
    terms
}

/// Word-boundary containment check.
fn contains_term(text: &str, term: &str) -> bool {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find(term) {
        let start = search_from + found;
        let end = start + term.len();
        let before_ok = start == 0
            || !text[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let after_ok = end == text.len()
            || !text[end..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        search_from = end;
    }
    false
}
