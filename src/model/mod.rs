//! Canonical document model for resume content.
//!
//! This module defines the single structured representation all analysis
//! reads. It is built once per upload from the extractor's intermediate
//! records and is immutable thereafter; every extracted fact carries a
//! provenance-based confidence.

mod confidence;
mod contact;
mod document;
mod section;
mod skill;

pub use confidence::Confidence;
pub use contact::{ChannelKind, Email, Link, Phone};
pub use document::{DocumentMetadata, DocumentModel, Line};
pub use section::{Bullet, Section, SectionKind};
pub use skill::{Skill, SkillEvidence};
