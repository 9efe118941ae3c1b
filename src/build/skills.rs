//! Skill extraction.
//!
//! Explicit skills are tokenized out of the skills section; implicit
//! skills are recovered from bullet text against a fixed technology
//! vocabulary at reduced confidence. Explicit evidence wins on dedup.

use std::collections::HashMap;

use crate::model::{Confidence, Line, Section, SectionKind, Skill, SkillEvidence};

/// Explicit skill tokens run at this fraction of the source confidence.
const EXPLICIT_CONFIDENCE_FACTOR: f32 = 0.9;
/// Implicit (inferred) skills are derated further.
const IMPLICIT_CONFIDENCE_FACTOR: f32 = 0.6;

/// Longest token accepted as a single skill.
const MAX_SKILL_CHARS: usize = 40;

/// Fixed technology vocabulary for implicit skill recovery.
const TECH_VOCABULARY: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "ruby", "php",
    "swift", "kotlin", "scala", "sql", "html", "css", "react", "angular", "vue", "node.js",
    "django", "flask", "spring", "rails", ".net", "aws", "azure", "gcp", "docker", "kubernetes",
    "terraform", "ansible", "jenkins", "git", "linux", "postgresql", "mysql", "mongodb", "redis",
    "elasticsearch", "kafka", "rabbitmq", "graphql", "rest", "grpc", "spark", "hadoop", "airflow",
    "pandas", "numpy", "tensorflow", "pytorch", "scikit-learn", "tableau", "excel", "figma",
    "jira", "ci/cd", "microservices", "agile", "scrum",
];

/// Extract skills from the skills section and from bullet text.
pub fn extract(lines: &[Line], sections: &[Section], base: Confidence) -> Vec<Skill> {
    let mut by_name: HashMap<String, Skill> = HashMap::new();

    for section in sections.iter().filter(|s| s.kind == SectionKind::Skills) {
        let explicit_confidence = base.scaled(EXPLICIT_CONFIDENCE_FACTOR);
        for line in &lines[section.start_line..section.end_line.min(lines.len())] {
            for token in tokenize_skill_line(&line.text) {
                insert(
                    &mut by_name,
                    Skill::new(token, SkillEvidence::Explicit, explicit_confidence),
                );
            }
        }
    }

    let implicit_confidence = base.scaled(IMPLICIT_CONFIDENCE_FACTOR);
    for section in sections {
        for bullet in &section.bullets {
            let lower = bullet.text.to_lowercase();
            for term in TECH_VOCABULARY {
                if contains_term(&lower, term) {
                    insert(
                        &mut by_name,
                        Skill::new(*term, SkillEvidence::Implicit, implicit_confidence),
                    );
                }
            }
        }
    }

    let mut skills: Vec<Skill> = by_name.into_values().collect();
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    skills
}

/// Split a skills-section line into candidate tokens.
fn tokenize_skill_line(line: &str) -> Vec<&str> {
    line.split(|c: char| matches!(c, ',' | ';' | '|' | '•' | '·' | '/' | '\t'))
        .map(|t| t.trim().trim_start_matches(['-', '–']).trim())
        .filter(|t| {
            let chars = t.chars().count();
            (1..=MAX_SKILL_CHARS).contains(&chars)
                && t.chars().any(|c| c.is_alphabetic())
        })
        .collect()
}

/// Word-ish containment: the term must not be embedded in a larger
/// alphanumeric token ("java" must not match "javascript").
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

/// Insert keeping the stronger evidence: explicit beats implicit, higher
/// confidence beats lower.
fn insert(by_name: &mut HashMap<String, Skill>, skill: Skill) {
    match by_name.get(&skill.name) {
        Some(existing)
            if existing.evidence == SkillEvidence::Explicit
                || (existing.evidence == skill.evidence
                    && existing.confidence >= skill.confidence) => {}
        _ => {
            by_name.insert(skill.name.clone(), skill);
        }
    }
}
