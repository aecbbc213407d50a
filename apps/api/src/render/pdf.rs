//! Serialises a [`RenderedDocument`] to PDF bytes with lopdf.
//!
//! Uses the standard Helvetica fonts (nothing embedded) and writes no Info
//! dictionary or file ID, so identical documents give identical bytes.
//!
//! Profile images: a base64 JPEG `data:` URI is passed through as a DCTDecode
//! XObject (pixels untouched, dimensions read from the header). Anything else
//! is drawn as an empty circular frame.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use imagesize::ImageType;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::render::font_metrics::{encode_win_ansi, Font};
use crate::render::model::{Color, Element, ImageShape, RenderedDocument};
use crate::render::theme::{FRAME, FRAME_THICKNESS};

/// Bezier control-point factor for quarter circles.
const KAPPA: f32 = 0.552_284_8;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode page content: {0}")]
    Content(String),

    #[error("failed to write PDF: {0}")]
    Write(String),
}

pub fn to_pdf(document: &RenderedDocument) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_height = document.page_size.height;

    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id);
    }

    let mut images = ImageRegistry::default();
    let mut content_ids = Vec::with_capacity(document.pages.len());

    for page in &document.pages {
        let mut ops = Vec::new();
        for element in &page.elements {
            draw(&mut ops, element, page_height, &mut images, &mut doc);
        }
        let bytes = Content { operations: ops }
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;
        content_ids.push(doc.add_object(Stream::new(Dictionary::new(), bytes)));
    }

    let mut resources = dictionary! { "Font" => fonts };
    if !images.xobjects.is_empty() {
        resources.set("XObject", images.xobjects.clone());
    }
    let resources_id = doc.add_object(resources);

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(document.page_size.width),
        Object::Real(page_height),
    ];
    let kids: Vec<Object> = content_ids
        .into_iter()
        .map(|content_id| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            }))
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(buffer)
}

fn draw(
    ops: &mut Vec<Operation>,
    element: &Element,
    page_height: f32,
    images: &mut ImageRegistry,
    doc: &mut Document,
) {
    match element {
        Element::Text {
            x,
            y,
            text,
            font,
            size,
            color,
        } => {
            ops.push(Operation::new("q", vec![]));
            ops.push(fill_color(*color));
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), Object::Real(*size)],
            ));
            ops.push(Operation::new(
                "Td",
                vec![Object::Real(*x), Object::Real(page_height - y)],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ));
            ops.push(Operation::new("ET", vec![]));
            ops.push(Operation::new("Q", vec![]));
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            fill,
            corner_radius,
        } => {
            let bottom = page_height - y - height;
            ops.push(Operation::new("q", vec![]));
            ops.push(fill_color(*fill));
            if *corner_radius > 0.0 {
                rounded_rect(ops, *x, bottom, *width, *height, *corner_radius);
            } else {
                ops.push(Operation::new(
                    "re",
                    vec![
                        Object::Real(*x),
                        Object::Real(bottom),
                        Object::Real(*width),
                        Object::Real(*height),
                    ],
                ));
            }
            ops.push(Operation::new("f", vec![]));
            ops.push(Operation::new("Q", vec![]));
        }
        Element::Rule {
            x1,
            y1,
            x2,
            y2,
            thickness,
            color,
        } => {
            ops.push(Operation::new("q", vec![]));
            ops.push(stroke_color(*color));
            ops.push(Operation::new("w", vec![Object::Real(*thickness)]));
            ops.push(Operation::new(
                "m",
                vec![Object::Real(*x1), Object::Real(page_height - y1)],
            ));
            ops.push(Operation::new(
                "l",
                vec![Object::Real(*x2), Object::Real(page_height - y2)],
            ));
            ops.push(Operation::new("S", vec![]));
            ops.push(Operation::new("Q", vec![]));
        }
        Element::Image {
            x,
            y,
            width,
            height,
            shape: ImageShape::Circle,
            source,
        } => {
            let bottom = page_height - y - height;
            let radius = width.min(*height) / 2.0;
            let (cx, cy) = (x + width / 2.0, bottom + height / 2.0);

            ops.push(Operation::new("q", vec![]));
            match images.resolve(source, doc) {
                Some(name) => {
                    circle(ops, cx, cy, radius);
                    ops.push(Operation::new("W", vec![]));
                    ops.push(Operation::new("n", vec![]));
                    ops.push(Operation::new(
                        "cm",
                        vec![
                            Object::Real(*width),
                            Object::Integer(0),
                            Object::Integer(0),
                            Object::Real(*height),
                            Object::Real(*x),
                            Object::Real(bottom),
                        ],
                    ));
                    ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
                }
                None => {
                    ops.push(stroke_color(FRAME));
                    ops.push(Operation::new("w", vec![Object::Real(FRAME_THICKNESS)]));
                    circle(ops, cx, cy, radius);
                    ops.push(Operation::new("S", vec![]));
                }
            }
            ops.push(Operation::new("Q", vec![]));
        }
    }
}

fn fill_color(color: Color) -> Operation {
    let [r, g, b] = color.components();
    Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)])
}

fn stroke_color(color: Color) -> Operation {
    let [r, g, b] = color.components();
    Operation::new("RG", vec![Object::Real(r), Object::Real(g), Object::Real(b)])
}

fn move_to(ops: &mut Vec<Operation>, x: f32, y: f32) {
    ops.push(Operation::new("m", vec![Object::Real(x), Object::Real(y)]));
}

fn line_to(ops: &mut Vec<Operation>, x: f32, y: f32) {
    ops.push(Operation::new("l", vec![Object::Real(x), Object::Real(y)]));
}

fn curve_to(ops: &mut Vec<Operation>, points: [f32; 6]) {
    ops.push(Operation::new(
        "c",
        points.into_iter().map(Object::Real).collect(),
    ));
}

/// Closed path; `y` is the bottom edge in PDF space.
fn rounded_rect(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let r = r.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;
    let (right, top) = (x + w, y + h);

    move_to(ops, x + r, y);
    line_to(ops, right - r, y);
    curve_to(ops, [right - r + k, y, right, y + r - k, right, y + r]);
    line_to(ops, right, top - r);
    curve_to(ops, [right, top - r + k, right - r + k, top, right - r, top]);
    line_to(ops, x + r, top);
    curve_to(ops, [x + r - k, top, x, top - r + k, x, top - r]);
    line_to(ops, x, y + r);
    curve_to(ops, [x, y + r - k, x + r - k, y, x + r, y]);
    ops.push(Operation::new("h", vec![]));
}

fn circle(ops: &mut Vec<Operation>, cx: f32, cy: f32, r: f32) {
    let k = r * KAPPA;
    move_to(ops, cx + r, cy);
    curve_to(ops, [cx + r, cy + k, cx + k, cy + r, cx, cy + r]);
    curve_to(ops, [cx - k, cy + r, cx - r, cy + k, cx - r, cy]);
    curve_to(ops, [cx - r, cy - k, cx - k, cy - r, cx, cy - r]);
    curve_to(ops, [cx + k, cy - r, cx + r, cy - k, cx + r, cy]);
    ops.push(Operation::new("h", vec![]));
}

// ────────────────────────────────────────────────────────────────────────────
// Image pass-through
// ────────────────────────────────────────────────────────────────────────────

/// XObjects keyed by image source, named `Im0`, `Im1`, ... in first-use order.
#[derive(Default)]
struct ImageRegistry {
    seen: Vec<(String, Option<String>)>,
    xobjects: Dictionary,
}

impl ImageRegistry {
    /// Resource name for `source`, or `None` when it cannot be embedded.
    fn resolve(&mut self, source: &str, doc: &mut Document) -> Option<String> {
        if let Some((_, name)) = self.seen.iter().find(|(s, _)| s == source) {
            return name.clone();
        }

        let name = jpeg_xobject(source).map(|stream| {
            let name = format!("Im{}", self.xobjects.len());
            let id: ObjectId = doc.add_object(stream);
            self.xobjects.set(name.as_str(), id);
            name
        });
        self.seen.push((source.to_string(), name.clone()));
        name
    }
}

fn jpeg_xobject(source: &str) -> Option<Stream> {
    let (meta, payload) = source.strip_prefix("data:")?.split_once(',')?;
    let mut params = meta.split(';');
    let media_type = params.next()?.trim();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));
    if !is_base64
        || !(media_type.eq_ignore_ascii_case("image/jpeg")
            || media_type.eq_ignore_ascii_case("image/jpg"))
    {
        return None;
    }

    let bytes = STANDARD.decode(payload.trim()).ok()?;
    if !matches!(imagesize::image_type(&bytes), Ok(ImageType::Jpeg)) {
        return None;
    }
    let size = imagesize::blob_size(&bytes).ok()?;

    let color_space = match jpeg_components(&bytes) {
        Some(1) => "DeviceGray",
        Some(4) => "DeviceCMYK",
        _ => "DeviceRGB",
    };
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => size.width as i64,
        "Height" => size.height as i64,
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8_i64,
        "Filter" => "DCTDecode",
    };
    Some(Stream::new(dict, bytes))
}

/// Component count from the first start-of-frame segment.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    let mut i = 2;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        if marker == 0xFF {
            i += 1;
            continue;
        }
        let len = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
        if (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            return bytes.get(i + 9).copied();
        }
        i += 2 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PersonalDetails, ResumeContent, WorkExperienceEntry};
    use crate::render::TemplateVariant;

    /// Smallest JPEG header imagesize accepts: SOI, SOF0 (32x16, 3 components), EOI.
    fn tiny_jpeg() -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x20, 0x03];
        bytes.extend_from_slice(&[0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }

    fn content(picture: Option<String>) -> ResumeContent {
        ResumeContent {
            personal_details: PersonalDetails {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "London".to_string(),
                profile_picture: picture,
                summary: Some("Engineer.".to_string()),
                ..PersonalDetails::default()
            },
            work_experience: vec![WorkExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "London".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "Present".to_string(),
                description: "Engines (analytical).".to_string(),
            }],
            skills: ["Rust", "SQL"].into_iter().collect(),
            ..ResumeContent::default()
        }
    }

    fn image_widths(bytes: &[u8]) -> Vec<i64> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(|v| v.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .filter_map(|s| s.dict.get(b"Width").and_then(|w| w.as_i64()).ok())
            .collect()
    }

    #[test]
    fn test_pdf_is_well_formed() {
        for variant in TemplateVariant::ALL {
            let rendered = variant.render(&content(None));
            let bytes = to_pdf(&rendered).unwrap();
            assert!(bytes.starts_with(b"%PDF-1.7"));
            let doc = Document::load_mem(&bytes).unwrap();
            assert_eq!(doc.get_pages().len(), rendered.pages.len());
        }
    }

    #[test]
    fn test_pdf_bytes_are_deterministic() {
        let picture = format!("data:image/jpeg;base64,{}", STANDARD.encode(tiny_jpeg()));
        for variant in TemplateVariant::ALL {
            let rendered = variant.render(&content(Some(picture.clone())));
            assert_eq!(to_pdf(&rendered).unwrap(), to_pdf(&rendered).unwrap());
        }
    }

    #[test]
    fn test_jpeg_profile_is_embedded() {
        let picture = format!("data:image/jpeg;base64,{}", STANDARD.encode(tiny_jpeg()));
        let rendered = TemplateVariant::SidebarWithProfile.render(&content(Some(picture)));
        let bytes = to_pdf(&rendered).unwrap();
        assert_eq!(image_widths(&bytes), vec![32]);
    }

    #[test]
    fn test_non_jpeg_profile_draws_frame_only() {
        let picture = "data:image/png;base64,iVBORw0KGgo=".to_string();
        let rendered = TemplateVariant::SidebarWithProfile.render(&content(Some(picture)));
        let bytes = to_pdf(&rendered).unwrap();
        assert!(image_widths(&bytes).is_empty());
        assert!(Document::load_mem(&bytes).is_ok());
    }

    #[test]
    fn test_jpeg_components_reads_sof() {
        assert_eq!(jpeg_components(&tiny_jpeg()), Some(3));
        assert_eq!(jpeg_components(&[0xFF, 0xD8, 0x00, 0x00, 0x00]), None);
    }

    #[test]
    fn test_jpeg_xobject_rejects_non_base64_and_bad_payload() {
        assert!(jpeg_xobject("data:image/jpeg,rawbytes").is_none());
        assert!(jpeg_xobject("data:image/jpeg;base64,!!!").is_none());
        assert!(jpeg_xobject("https://example.com/me.jpg").is_none());
    }
}
