//! Line assembly from extracted text runs.
//!
//! Positioned runs (PDF) are grouped onto baselines and joined left to
//! right; unpositioned runs (DOCX, plain text) already are lines. Wide
//! horizontal gaps between runs are rendered as multi-space runs so the
//! layout heuristics can see column structure in the assembled text.

use crate::extract::{SourceTag, TextItem};
use crate::model::Line;

/// Two spans within this vertical distance share a baseline.
const BASELINE_TOLERANCE: f32 = 2.5;

/// Gap wider than this many average character widths marks a column
/// boundary and is rendered as a spacer run.
const WIDE_GAP_CHARS: f32 = 3.0;

/// Gap wider than this fraction of a character width gets a single space.
const SPACE_GAP_FRACTION: f32 = 0.2;

/// Spacer inserted at column boundaries; long enough for the whitespace-
/// run heuristics to notice.
const COLUMN_SPACER: &str = "    ";

/// Assemble extraction-ordered text items into document lines.
pub fn assemble(items: &[TextItem]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut positioned: Vec<&TextItem> = Vec::new();

    for item in items {
        if item.position.is_some() {
            positioned.push(item);
        } else {
            // Interleaved unpositioned content (e.g. a fallback page in
            // the middle of a PDF): flush what came before, keep order.
            flush_positioned(&mut positioned, &mut lines);
            lines.push(Line {
                text: item.text.trim_end().to_string(),
                page: 1,
                source: item.source,
            });
        }
    }
    flush_positioned(&mut positioned, &mut lines);

    lines.retain(|l| !l.text.trim().is_empty());
    lines
}

/// Group buffered positioned spans into baseline lines and append them.
fn flush_positioned(buffer: &mut Vec<&TextItem>, lines: &mut Vec<Line>) {
    if buffer.is_empty() {
        return;
    }

    let mut spans = std::mem::take(buffer);
    // Reading order: page, then top-to-bottom (PDF y grows upward), then
    // left-to-right.
    spans.sort_by(|a, b| {
        let pa = a.position.unwrap();
        let pb = b.position.unwrap();
        pa.page
            .cmp(&pb.page)
            .then(
                pb.y.partial_cmp(&pa.y)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(pa.x.partial_cmp(&pb.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut current: Vec<&TextItem> = Vec::new();
    for span in spans {
        let same_line = current.last().is_some_and(|prev| {
            let pp = prev.position.unwrap();
            let sp = span.position.unwrap();
            pp.page == sp.page && (pp.y - sp.y).abs() <= BASELINE_TOLERANCE
        });

        if same_line {
            current.push(span);
        } else {
            if !current.is_empty() {
                lines.push(join_line(&current));
            }
            current = vec![span];
        }
    }
    if !current.is_empty() {
        lines.push(join_line(&current));
    }
}

/// Join one baseline's spans, inserting spaces scaled to the gaps.
fn join_line(spans: &[&TextItem]) -> Line {
    let page = spans[0].position.unwrap().page;
    let mut text = String::new();

    for (i, span) in spans.iter().enumerate() {
        if i == 0 {
            text.push_str(&span.text);
            continue;
        }

        let prev = spans[i - 1].position.unwrap();
        let pos = span.position.unwrap();
        let gap = pos.x - (prev.x + prev.width);

        let char_count = span.text.chars().count();
        let avg_char_width = if char_count > 0 && pos.width > 0.0 {
            pos.width / char_count as f32
        } else {
            pos.height * 0.5
        };

        if gap > avg_char_width * WIDE_GAP_CHARS {
            text.push_str(COLUMN_SPACER);
        } else if gap > avg_char_width * SPACE_GAP_FRACTION
            && !text.ends_with(' ')
            && !span.text.starts_with(' ')
        {
            text.push(' ');
        }
        text.push_str(&span.text);
    }

    Line {
        text: text.trim_end().to_string(),
        page,
        source: SourceTag::PdfText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Position;

    fn span(text: &str, page: u32, x: f32, y: f32) -> TextItem {
        let width = 6.0 * text.chars().count() as f32;
        TextItem::positioned(
            text,
            SourceTag::PdfText,
            Position {
                page,
                x,
                y,
                width,
                height: 12.0,
            },
        )
    }

    #[test]
    fn test_assemble_unpositioned_passthrough() {
        let items = vec![
            TextItem::new("first", SourceTag::DocxText),
            TextItem::new("second", SourceTag::DocxText),
        ];
        let lines = assemble(&items);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
    }

    #[test]
    fn test_assemble_groups_baselines() {
        let items = vec![
            span("Jane", 1, 10.0, 700.0),
            span("Doe", 1, 40.0, 700.5),
            span("Engineer", 1, 10.0, 680.0),
        ];
        let lines = assemble(&items);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Jane Doe");
        assert_eq!(lines[1].text, "Engineer");
    }

    #[test]
    fn test_assemble_orders_top_to_bottom() {
        let items = vec![span("bottom", 1, 10.0, 100.0), span("top", 1, 10.0, 700.0)];
        let lines = assemble(&items);
        assert_eq!(lines[0].text, "top");
        assert_eq!(lines[1].text, "bottom");
    }

    #[test]
    fn test_assemble_wide_gap_becomes_spacer() {
        // Right-hand column far beyond the left span's extent.
        let items = vec![span("Left", 1, 10.0, 700.0), span("Right", 1, 300.0, 700.0)];
        let lines = assemble(&items);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].text.contains(&format!("Left{COLUMN_SPACER}Right")));
    }

    #[test]
    fn test_assemble_adjacent_spans_no_space() {
        let mut left = span("Hel", 1, 10.0, 700.0);
        left.position.as_mut().unwrap().width = 18.0;
        let items = vec![left, span("lo", 1, 28.0, 700.0)];
        let lines = assemble(&items);
        assert_eq!(lines[0].text, "Hello");
    }

    #[test]
    fn test_assemble_pages_in_order() {
        let items = vec![span("page two", 2, 10.0, 700.0), span("page one", 1, 10.0, 50.0)];
        let lines = assemble(&items);
        assert_eq!(lines[0].text, "page one");
        assert_eq!(lines[0].page, 1);
        assert_eq!(lines[1].text, "page two");
    }
}
