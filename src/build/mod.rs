//! Document model builder.
//!
//! Consumes the extractor's intermediate records and constructs the
//! canonical [`DocumentModel`]: assembled lines, detected sections and
//! bullets, contact channels, skills, and the layout-risk signals. Every
//! derived fact inherits a confidence from its source's base tier; the
//! builder never re-reads the original bytes.

mod contacts;
mod layout;
mod lines;
mod sections;
mod skills;

pub use layout::{RISK_HEADER_FOOTER, RISK_ICON_GLYPHS, RISK_MULTI_COLUMN, RISK_TABLES};

use crate::extract::IntermediateDocument;
use crate::model::{DocumentMetadata, DocumentModel};

/// Build the canonical document model from intermediate records.
///
/// Total function: even an empty intermediate document produces a valid
/// (empty) model; downstream stages score it accordingly.
pub fn build(intermediate: IntermediateDocument) -> DocumentModel {
    let base = intermediate.base_confidence();

    let raw_source_text = if intermediate.items.is_empty() {
        None
    } else {
        Some(
            intermediate
                .items
                .iter()
                .map(|i| i.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    };

    let assembled = lines::assemble(&intermediate.items);

    let section_scan = sections::detect(&assembled, base);
    let contact_scan = contacts::extract(&assembled, &intermediate.link_annotations, base);
    let skills = skills::extract(&assembled, &section_scan.sections, base);
    let layout_scan = layout::assess(&assembled, section_scan.headers_recognized);

    let mut metadata = DocumentMetadata::new(
        intermediate.source.file_name.clone(),
        intermediate.source.format,
    );
    metadata.page_count = intermediate.source.page_count;
    metadata.paragraph_count = assembled.len() as u32;
    metadata.multi_column = layout_scan.multi_column;
    metadata.tables = layout_scan.tables;
    metadata.icon_glyphs = layout_scan.icon_glyphs;
    metadata.header_footer_repetition = layout_scan.header_footer_repetition;
    metadata.nonstandard_bullets = layout_scan.nonstandard_bullets;
    metadata.nonstandard_dates = layout_scan.nonstandard_dates;
    metadata.section_headers_recognized = section_scan.headers_recognized;
    metadata.ats_parse_failure_risk = layout_scan.risk_score;

    log::debug!(
        "built model: {} lines, {} sections, risk {}",
        assembled.len(),
        section_scan.sections.len(),
        layout_scan.risk_score
    );

    DocumentModel {
        metadata,
        lines: assembled,
        sections: section_scan.sections,
        emails: contact_scan.emails,
        phones: contact_scan.phones,
        links: contact_scan.links,
        skills,
        raw_source_text,
    }
}
