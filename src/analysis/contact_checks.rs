//! Contact channel validity.
//!
//! A reachable email is non-negotiable for an ATS: missing it is a hard
//! failure. Unprofessional-looking addresses and absent profile links are
//! advisory.

use serde::{Deserialize, Serialize};

use crate::model::{ChannelKind, DocumentModel};

use super::issue::{Evidence, Issue, IssueCategory};

/// Sub-score deduction when the email looks unprofessional.
const UNPROFESSIONAL_EMAIL_PENALTY: f32 = 20.0;
/// Sub-score deduction when no phone number was found.
const MISSING_PHONE_PENALTY: f32 = 20.0;
/// Sub-score deduction when no profile/portfolio link was found.
const MISSING_LINK_PENALTY: f32 = 10.0;

/// Digit runs this long in the local part read as vanity numbers.
const VANITY_DIGIT_RUN: usize = 4;

/// Providers that date an address regardless of the local part.
const LEGACY_PROVIDERS: &[&str] = &["aol.com", "hotmail.com", "msn.com", "yandex.ru"];

/// Local-part fragments that read as novelty addresses.
const NOVELTY_FRAGMENTS: &[&str] = &["xoxo", "cool", "cute", "sexy", "420", "69", "dude", "babe"];

/// Outcome of the contact checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAssessment {
    /// Raw contact sub-score, `[0,100]`, uncalibrated.
    pub contact_score: f32,
    /// An email address was found.
    pub has_email: bool,
    /// A phone number was found.
    pub has_phone: bool,
    /// A LinkedIn profile link was found.
    pub has_linkedin: bool,
    /// Findings raised by this check.
    pub issues: Vec<Issue>,
}

/// Run the contact validity checks.
pub fn check_contacts(model: &DocumentModel) -> ContactAssessment {
    let mut issues = Vec::new();
    let mut score: f32 = 100.0;

    let has_email = !model.emails.is_empty();
    if has_email {
        for (index, email) in model.emails.iter().enumerate() {
            if let Some(reason) = unprofessional_reason(email.local_part(), email.domain()) {
                score -= UNPROFESSIONAL_EMAIL_PENALTY;
                issues.push(Issue::warning(
                    IssueCategory::Contact,
                    format!("email address may read as unprofessional ({reason})"),
                    Evidence::Email { index },
                ));
                break;
            }
        }
    } else {
        score = 0.0;
        issues.push(Issue::hard_failure(
            IssueCategory::Contact,
            "no email address found",
            Evidence::MissingChannel {
                channel: ChannelKind::Email,
            },
        ));
    }

    let has_phone = !model.phones.is_empty();
    if has_email && !has_phone {
        score -= MISSING_PHONE_PENALTY;
        issues.push(Issue::warning(
            IssueCategory::Contact,
            "no phone number found",
            Evidence::MissingChannel {
                channel: ChannelKind::Phone,
            },
        ));
    }

    let has_linkedin = model.link(ChannelKind::LinkedIn).is_some();
    let has_portfolio = model.link(ChannelKind::Portfolio).is_some()
        || model.link(ChannelKind::GitHub).is_some();

    if has_email && !has_linkedin {
        score -= MISSING_LINK_PENALTY;
        issues.push(Issue::info(
            IssueCategory::Contact,
            "no LinkedIn profile link found",
            Evidence::MissingChannel {
                channel: ChannelKind::LinkedIn,
            },
        ));
    }
    if has_email && !has_portfolio {
        issues.push(Issue::info(
            IssueCategory::Contact,
            "no portfolio or code-hosting link found",
            Evidence::MissingChannel {
                channel: ChannelKind::Portfolio,
            },
        ));
    }

    ContactAssessment {
        contact_score: score.max(0.0),
        has_email,
        has_phone,
        has_linkedin,
        issues,
    }
}

/// Why an address reads as unprofessional, if it does.
fn unprofessional_reason(local: Option<&str>, domain: Option<&str>) -> Option<&'static str> {
    if let Some(local) = local {
        let mut digit_run = 0usize;
        for c in local.chars() {
            if c.is_ascii_digit() {
                digit_run += 1;
                if digit_run >= VANITY_DIGIT_RUN {
                    return Some("long digit run");
                }
            } else {
                digit_run = 0;
            }
        }
        if NOVELTY_FRAGMENTS.iter().any(|f| local.contains(f)) {
            return Some("novelty wording");
        }
    }
    if let Some(domain) = domain {
        if LEGACY_PROVIDERS.contains(&domain) {
            return Some("dated provider");
        }
    }
    None
}
