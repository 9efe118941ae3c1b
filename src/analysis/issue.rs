//! Typed, evidence-backed findings.
//!
//! Issues are never bare strings: construction requires at least one
//! evidence pointer into the document model, so every finding can be
//! traced back to the fact (or absence) that produced it.

use serde::{Deserialize, Serialize};

use crate::model::{ChannelKind, SectionKind};

/// Severity class of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Blocks an ATS pass outright (e.g. missing email).
    HardFailure,
    /// Hurts screening odds; fix recommended.
    Warning,
    /// Worth knowing; no score damage by itself.
    Info,
}

/// Rule-engine category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Contact,
    Sections,
    Keywords,
    Content,
    Parsing,
}

/// A typed pointer into the document model, or at a named absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// A detected section, by index into `DocumentModel::sections`.
    Section { index: usize },
    /// A section that should exist but was not detected.
    MissingSection { section: SectionKind },
    /// A bullet, by section and bullet index.
    Bullet { section: usize, bullet: usize },
    /// An assembled line, by index into `DocumentModel::lines`.
    Line { index: usize },
    /// A detected email, by index.
    Email { index: usize },
    /// A detected phone, by index.
    Phone { index: usize },
    /// A detected link, by index.
    Link { index: usize },
    /// A contact channel that should exist but was not detected.
    MissingChannel { channel: ChannelKind },
    /// A role or job-description keyword term.
    Keyword { term: String },
    /// A whole-document signal (layout flags, rates).
    Document,
}

/// A typed finding with its evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Severity class.
    pub kind: IssueKind,
    /// Rule category.
    pub category: IssueCategory,
    /// Internal message; the interpretation layer rewrites this for
    /// users.
    pub message: String,
    /// At least one pointer into the model. Never empty.
    pub evidence: Vec<Evidence>,
}

impl Issue {
    /// Create an issue. The signature requires one evidence pointer up
    /// front; more can be attached with [`Issue::with_evidence`].
    pub fn new(
        kind: IssueKind,
        category: IssueCategory,
        message: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        Self {
            kind,
            category,
            message: message.into(),
            evidence: vec![evidence],
        }
    }

    /// Attach an additional evidence pointer.
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    /// Shorthand for a hard failure.
    pub fn hard_failure(
        category: IssueCategory,
        message: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        Self::new(IssueKind::HardFailure, category, message, evidence)
    }

    /// Shorthand for a warning.
    pub fn warning(
        category: IssueCategory,
        message: impl Into<String>,
        evidence: Evidence,
    ) -> Self {
        Self::new(IssueKind::Warning, category, message, evidence)
    }

    /// Shorthand for an informational finding.
    pub fn info(category: IssueCategory, message: impl Into<String>, evidence: Evidence) -> Self {
        Self::new(IssueKind::Info, category, message, evidence)
    }
}
