use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild,
    StructuredDataTagChild, read_docx,
};

use crate::errors::BotError;

/// Separator placed between consecutive paragraphs.
const PARAGRAPH_SEPARATOR: &str = "\n";

/// Extract body paragraphs in document order, one per line.
///
/// Tables, headers and footers are not part of the body paragraph list and
/// are skipped.
pub fn extract_docx(bytes: &[u8]) -> Result<String, BotError> {
    let docx = read_docx(bytes).map_err(|e| BotError::Extraction(format!("DOCX: {e}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join(PARAGRAPH_SEPARATOR))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

// Hyperlinks, tracked insertions and inline content controls wrap runs of
// their own; deleted text is left out.
fn push_children_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, out),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run_text(run, out);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => {
                for tagged in &tag.children {
                    if let StructuredDataTagChild::Run(run) = tagged {
                        push_run_text(run, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Hyperlink, HyperlinkType, Insert};

    fn build_docx(paragraphs: &[&[&str]]) -> Vec<u8> {
        let mut docx = Docx::new();
        for runs in paragraphs {
            let mut paragraph = Paragraph::new();
            for run in *runs {
                paragraph = paragraph.add_run(Run::new().add_text(*run));
            }
            docx = docx.add_paragraph(paragraph);
        }
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).expect("pack docx");
        buf.into_inner()
    }

    #[test]
    fn paragraphs_are_joined_with_a_newline() {
        let bytes = build_docx(&[&["Hello, ", "world."], &[], &["Second paragraph"]]);
        assert_eq!(extract_docx(&bytes).unwrap(), "Hello, world.\n\nSecond paragraph");
    }

    #[test]
    fn tabs_inside_runs_are_kept() {
        let mut paragraph = Paragraph::new().add_run(Run::new().add_text("a").add_tab().add_text("b"));
        paragraph = paragraph.add_run(Run::new().add_text("c"));
        let mut buf = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(paragraph)
            .build()
            .pack(&mut buf)
            .expect("pack docx");

        assert_eq!(extract_docx(&buf.into_inner()).unwrap(), "a\tbc");
    }

    #[test]
    fn hyperlink_text_stays_in_place() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("See "))
            .add_hyperlink(
                Hyperlink::new("https://example.com/docs", HyperlinkType::External)
                    .add_run(Run::new().add_text("the docs")),
            )
            .add_run(Run::new().add_text(" now."));
        let mut buf = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(paragraph)
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Next")))
            .build()
            .pack(&mut buf)
            .expect("pack docx");

        assert_eq!(
            extract_docx(&buf.into_inner()).unwrap(),
            "See the docs now.\nNext"
        );
    }

    #[test]
    fn tracked_insertions_are_kept() {
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_text("Draft "))
            .add_insert(Insert::new(Run::new().add_text("revised")));
        let mut buf = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(paragraph)
            .build()
            .pack(&mut buf)
            .expect("pack docx");

        assert_eq!(extract_docx(&buf.into_inner()).unwrap(), "Draft revised");
    }

    #[test]
    fn not_a_docx() {
        let err = extract_docx(b"plain text").unwrap_err();
        assert!(matches!(err, BotError::Extraction(_)));
    }
}
