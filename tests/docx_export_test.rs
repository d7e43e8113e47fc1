use std::io::{Cursor, Read};
use tailor::{
    export::{export_docx, export_file_name},
    parse_resume,
    resume::{load_resume, SectionKind},
    TemplateSelector, TemplateStyle,
};

const RESUME: &str = "Jane Doe\njane@x.com | NYC\nEXPERIENCE\nEngineer | Acme | 2020\n- Built things\n- Shipped things\nSKILLS\nRust and Go";

fn document_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[test]
fn test_every_template_produces_a_docx() {
    let sections = parse_resume(RESUME);
    for style in TemplateStyle::ALL {
        let document = export_docx(&sections, "Acme Corp", "Site Reliability Engineer", style)
            .expect("export should succeed");
        assert_eq!(
            document.file_name,
            "Resume-Acme-Corp-Site-Reliability-Engineer.docx"
        );
        assert!(document.bytes.starts_with(b"PK"));

        let xml = document_xml(&document.bytes);
        assert!(xml.contains("Built things"), "{style} lost a bullet");
        assert!(xml.contains("EXPERIENCE"), "{style} lost a heading");
    }
}

#[test]
fn test_ats_uses_word_numbering_for_bullets() {
    let sections = parse_resume(RESUME);
    let ats = export_docx(&sections, "", "", TemplateStyle::Ats).unwrap();
    assert!(document_xml(&ats.bytes).contains("w:numPr"));

    let modern = export_docx(&sections, "", "", TemplateStyle::Modern).unwrap();
    let xml = document_xml(&modern.bytes);
    assert!(!xml.contains("w:numPr"));
    assert!(xml.contains("●"));
}

#[test]
fn test_title_bands_and_rules() {
    let sections = parse_resume(RESUME);

    let ats = document_xml(&export_docx(&sections, "", "", TemplateStyle::Ats).unwrap().bytes);
    assert!(ats.contains("<w:pBdr>"));
    assert!(!ats.contains("<w:shd"));

    let modern = document_xml(&export_docx(&sections, "", "", TemplateStyle::Modern).unwrap().bytes);
    assert!(modern.contains(r#"w:fill="1E40AF""#));
    assert!(!modern.contains("<w:pBdr>"));

    let engineering =
        document_xml(&export_docx(&sections, "", "", TemplateStyle::Engineering).unwrap().bytes);
    assert!(engineering.contains(r#"w:fill="1E293B""#));
}

#[test]
fn test_fonts_follow_template() {
    let sections = parse_resume(RESUME);
    let engineering = export_docx(&sections, "", "", TemplateStyle::Engineering).unwrap();
    assert!(document_xml(&engineering.bytes).contains("Courier New"));

    let ats = export_docx(&sections, "", "", TemplateStyle::Ats).unwrap();
    assert!(document_xml(&ats.bytes).contains("Arial"));
}

#[test]
fn test_file_name_from_empty_target() {
    assert_eq!(export_file_name("", ""), "Resume--.docx");
}

#[tokio::test]
async fn test_exported_docx_loads_back() {
    let selector = TemplateSelector::new(RESUME, "Acme", "SRE");
    let document = selector.export_docx().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = document.save_in(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Resume-Acme-SRE.docx");

    let resume = load_resume(&path).await.unwrap();
    let sections = parse_resume(&resume.text);

    assert_eq!(sections[0].kind, SectionKind::Header);
    assert_eq!(sections[0].content, "Jane Doe");
    assert_eq!(sections[1].kind, SectionKind::Contact);

    let experience = sections
        .iter()
        .find(|section| section.content == "EXPERIENCE")
        .unwrap();
    assert_eq!(
        experience.subsections[0].items,
        vec!["Built things", "Shipped things"]
    );
}
