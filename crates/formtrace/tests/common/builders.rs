//! Fixture builders for OCR results and minimal PDF documents.

use formtrace::ocr::{
    AnalyzeResult, OperationStatus, ReadLine, ReadOperationResult, ReadPage,
};

/// Default line bounding box: 1x0.3 inch strip at (1, 1).
pub const LINE_BOX: [f64; 8] = [1.0, 1.0, 2.0, 1.0, 2.0, 1.3, 1.0, 1.3];

pub fn read_line(text: &str) -> ReadLine {
    read_line_with_box(text, LINE_BOX.to_vec())
}

pub fn read_line_with_box(text: &str, bounding_box: Vec<f64>) -> ReadLine {
    ReadLine {
        text: text.to_string(),
        bounding_box,
        words: vec![],
    }
}

pub fn read_page(lines: Vec<ReadLine>) -> ReadPage {
    ReadPage {
        page: 0,
        angle: 0.0,
        width: 8.5,
        height: 11.6806,
        unit: "inch".to_string(),
        lines,
    }
}

pub fn analyze_result(pages: Vec<ReadPage>) -> AnalyzeResult {
    AnalyzeResult {
        version: "3.2.0".to_string(),
        read_results: pages,
    }
}

pub fn succeeded_operation(analyze: AnalyzeResult) -> ReadOperationResult {
    ReadOperationResult {
        status: OperationStatus::Succeeded,
        analyze_result: Some(analyze),
    }
}

/// Build an empty PDF with the given number of pages.
pub fn minimal_pdf(page_count: usize) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..page_count {
        let content = Stream::new(dictionary! {}, b"".to_vec());
        let content_id = doc.add_object(Object::Stream(content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let kids_len = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => kids_len,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
