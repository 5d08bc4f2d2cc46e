//! PDF rendering of report layouts with lopdf.
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user space
//! is points from the bottom-left corner. Text uses the standard Helvetica
//! faces with `WinAnsiEncoding`, so no fonts are embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use seed_qa_core::error::RenderError;
use seed_qa_core::ports::DocumentRenderer;
use seed_qa_core::report::{Element, FontWeight, Page, ReportLayout, Rgb, REPORT_TITLE};
use tracing::debug;

const MM_TO_PT: f32 = 72.0 / 25.4;
const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = concat!("seed-qa ", env!("CARGO_PKG_VERSION"));

/// Renders a [`ReportLayout`] as an uncompressed PDF document.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(font("Helvetica"));
        let bold = doc.add_object(font("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
            },
        });

        let height = layout.height() * MM_TO_PT;
        let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count());
        for page in layout.pages() {
            let content = page_content(page, height).encode().map_err(RenderError::new)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = i64::try_from(kids.len()).map_err(RenderError::new)?;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(layout.width() * MM_TO_PT),
                Object::Real(height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = info(&mut doc);
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(RenderError::new)?;
        debug!("PDF: {} page(s), {} bytes", layout.page_count(), bytes.len());
        Ok(bytes)
    }
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn info(doc: &mut Document) -> ObjectId {
    doc.add_object(dictionary! {
        "Title" => Object::string_literal(REPORT_TITLE),
        "Producer" => Object::string_literal(PRODUCER),
    })
}

fn page_content(page: &Page, page_height: f32) -> Content {
    let mut ops = Vec::new();

    for element in page.elements() {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    (None, Some(_)) => "S",
                    (None, None) => continue,
                };
                if let Some(c) = fill {
                    ops.push(Operation::new("rg", color(*c)));
                }
                if let Some(c) = stroke {
                    ops.push(Operation::new("RG", color(*c)));
                }
                ops.push(Operation::new(
                    "re",
                    vec![
                        pt(*x),
                        Object::Real(page_height - (y + height) * MM_TO_PT),
                        pt(*width),
                        pt(*height),
                    ],
                ));
                ops.push(Operation::new(paint, vec![]));
            }
            Element::Text {
                x,
                y,
                size,
                weight,
                color: c,
                text,
            } => {
                let font = match weight {
                    FontWeight::Regular => "F1",
                    FontWeight::Bold => "F2",
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("rg", color(*c)));
                ops.push(Operation::new("Tf", vec![font.into(), Object::Real(*size)]));
                ops.push(Operation::new(
                    "Td",
                    vec![pt(*x), Object::Real(page_height - y * MM_TO_PT)],
                ));
                ops.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    Content { operations: ops }
}

fn pt(mm: f32) -> Object {
    Object::Real(mm * MM_TO_PT)
}

fn color(Rgb(r, g, b): Rgb) -> Vec<Object> {
    [r, g, b]
        .into_iter()
        .map(|c| Object::Real(f32::from(c) / 255.0))
        .collect()
}

/// Encodes `text` for a `WinAnsiEncoding` font. Characters outside Latin-1,
/// and the C1 range WinAnsi assigns differently, become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(b) if b >= 0x20 && !(0x7f..0xa0).contains(&b) => b,
            _ => b'?',
        })
        .collect()
}
