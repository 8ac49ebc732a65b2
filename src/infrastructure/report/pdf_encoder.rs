//! PDF encoding of report layouts via lopdf

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::domain::report::layout::{
    approx_text_width, Align, Color, Element, Page, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
use crate::domain::report::{DocumentEncoder, ReportError, ReportLayout};

const PDF_VERSION: &str = "1.5";
const FONT_NAME: &str = "F1";
const MM_TO_PT: f64 = 72.0 / 25.4;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Encodes layouts as PDF using the standard Helvetica font
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfEncoder;

impl PdfEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentEncoder for PdfEncoder {
    fn encode(&self, layout: &ReportLayout) -> Result<Vec<u8>, ReportError> {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_NAME => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
        for page in &layout.pages {
            let page_id = add_page(&mut doc, pages_id, page)?;
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => layout.pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(mm(PAGE_WIDTH_MM) as _),
                Object::Real(mm(PAGE_HEIGHT_MM) as _),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(win_ansi(&layout.title)),
            "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| ReportError::encoding(e.to_string()))?;

        debug!(
            title = %layout.title,
            pages = layout.page_count(),
            bytes = buffer.len(),
            "Encoded PDF report"
        );

        Ok(buffer)
    }

    fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }
}

fn add_page(doc: &mut Document, pages_id: ObjectId, page: &Page) -> Result<ObjectId, ReportError> {
    let content = page_content(page)
        .encode()
        .map_err(|e| ReportError::encoding(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::new();

    for element in &page.elements {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                operations.push(fill_color(*fill));
                operations.push(Operation::new(
                    "re",
                    vec![
                        real(mm(*x)),
                        real(mm(PAGE_HEIGHT_MM - y - height)),
                        real(mm(*width)),
                        real(mm(*height)),
                    ],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            Element::Text {
                text,
                x,
                y,
                style,
                align,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - approx_text_width(text, style.size) / 2.0,
                };

                operations.push(fill_color(style.color));
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![FONT_NAME.into(), real(style.size)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![real(mm(left)), real(mm(PAGE_HEIGHT_MM - y))],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(win_ansi(text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }

    Content { operations }
}

fn fill_color(Color(r, g, b): Color) -> Operation {
    let channel = |value: u8| real(f64::from(value) / 255.0);
    Operation::new("rg", vec![channel(r), channel(g), channel(b)])
}

fn mm(value: f64) -> f64 {
    value * MM_TO_PT
}

fn real(value: f64) -> Object {
    Object::Real(value as _)
}

/// Map text to WinAnsiEncoding bytes; unmappable characters become `?`
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            c if c.is_ascii() => c as u8,
            '\u{20AC}' => 0x80,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if ('\u{A0}'..='\u{FF}').contains(&c) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
