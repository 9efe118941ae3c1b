//! Extractor integration tests over synthesized PDF and DOCX fixtures.

use std::io::{Cursor, Write};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as LopdfDocument, Object, Stream};
use zip::write::SimpleFileOptions;

use atslens::extract::{ExtractorRegistry, SourceTag};
use atslens::{build, ChannelKind, SourceFormat};

/// Build a one-page PDF with a few text lines and a native LinkedIn link
/// annotation.
fn pdf_fixture() -> Vec<u8> {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let lines = [
        "Jane Doe",
        "jane.doe@example.com",
        "Experience",
        "- Reduced latency by 30%",
        "- Led a team of 5 engineers",
        "Education",
        "BS Computer Science, 2016",
        "Skills",
        "Rust, Kubernetes, SQL",
    ];
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-16).into()]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(*line)],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("content encodes"),
    ));

    let annotation_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![72.into(), 700.into(), 200.into(), 712.into()],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal("https://linkedin.com/in/janedoe"),
        },
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Annots" => vec![annotation_id.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut Cursor::new(&mut bytes)).expect("pdf saves");
    bytes
}

/// Build a minimal DOCX with the same resume content.
fn docx_fixture() -> Vec<u8> {
    let body: String = [
        "Jane Doe",
        "jane.doe@example.com",
        "Experience",
        "- Reduced latency by 30%",
        "- Led a team of 5 engineers",
        "Education",
        "BS Computer Science, 2016",
        "Skills",
        "Rust, Kubernetes, SQL",
    ]
    .iter()
    .map(|line| format!("<w:p><w:r><w:t>{line}</w:t></w:r></w:p>"))
    .collect();

    let document_xml = format!(
        r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{body}</w:body>
</w:document>"#
    );

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn pdf_fixture_extracts_positioned_text_and_annotation() {
    let bytes = pdf_fixture();
    let registry = ExtractorRegistry::with_defaults();
    let intermediate = registry.extract_bytes(&bytes, "resume.pdf").unwrap();

    assert_eq!(intermediate.source.format, SourceFormat::Pdf);
    assert_eq!(intermediate.source.page_count, 1);
    assert!(intermediate
        .items
        .iter()
        .any(|i| i.text.contains("Reduced latency")));
    assert!(intermediate
        .items
        .iter()
        .all(|i| i.source == SourceTag::PdfText));
    assert_eq!(intermediate.link_annotations.len(), 1);
    assert!(intermediate.link_annotations[0]
        .url
        .contains("linkedin.com"));
}

#[test]
fn pdf_fixture_builds_full_model() {
    let bytes = pdf_fixture();
    let registry = ExtractorRegistry::with_defaults();
    let intermediate = registry.extract_bytes(&bytes, "resume.pdf").unwrap();
    let model = build::build(intermediate);

    assert!(model.metadata.section_headers_recognized);
    assert_eq!(model.emails.len(), 1);

    // The annotation-sourced link must outrank any regex-recovered fact.
    let linkedin = model.link(ChannelKind::LinkedIn).expect("annotation link");
    assert!(linkedin.confidence >= SourceTag::PdfAnnotation.base_confidence());
    assert!(model.emails[0].confidence < linkedin.confidence);
}

#[test]
fn docx_fixture_builds_capped_confidence_model() {
    let bytes = docx_fixture();
    let registry = ExtractorRegistry::with_defaults();
    let intermediate = registry.extract_bytes(&bytes, "resume.docx").unwrap();

    assert_eq!(intermediate.source.format, SourceFormat::Docx);
    assert!(intermediate.link_annotations.is_empty());
    assert!(intermediate
        .items
        .iter()
        .all(|i| i.source == SourceTag::DocxText));

    let model = build::build(intermediate);
    assert!(model.metadata.section_headers_recognized);
    assert_eq!(model.emails.len(), 1);

    // Everything recovered from a flat paragraph stream sits at or below
    // the format's confidence ceiling.
    let ceiling = SourceTag::DocxText.base_confidence();
    assert!(model.emails[0].confidence <= ceiling);
    for section in &model.sections {
        assert!(section.confidence <= ceiling);
    }
}

#[test]
fn pdf_and_docx_fixtures_agree_on_content_facts() {
    let registry = ExtractorRegistry::with_defaults();

    let pdf_model = build::build(registry.extract_bytes(&pdf_fixture(), "resume.pdf").unwrap());
    let docx_model =
        build::build(registry.extract_bytes(&docx_fixture(), "resume.docx").unwrap());

    assert_eq!(pdf_model.emails[0].normalized, docx_model.emails[0].normalized);
    assert_eq!(pdf_model.bullet_count(), docx_model.bullet_count());
    assert_eq!(
        pdf_model.sections.len(),
        docx_model.sections.len()
    );

    // Same facts, but the PDF path is the more trusted source.
    assert!(pdf_model.emails[0].confidence > docx_model.emails[0].confidence);
}
