//! Versioned byte representation of documents.
//!
//! Documents are stored as UTF-8 JSON:
//!
//! ```json
//! { "format": "strokeink", "version": 1, "elements": [ { "type": "stroke", ... } ] }
//! ```
//!
//! Decoding is all-or-nothing: a payload either yields a complete, valid
//! document or a [`EditorError::Format`].

use crate::document::Document;
use crate::elements::Element;
use crate::error::{EditorError, EditorResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Format tag written into every file.
pub const FORMAT_TAG: &str = "strokeink";
/// Current schema version.
pub const FORMAT_VERSION: u32 = 1;
/// MIME type used for data URLs.
pub const MIME_TYPE: &str = "application/octet-stream";

#[derive(Serialize)]
struct DocumentFileRef<'a> {
    format: &'a str,
    version: u32,
    elements: &'a [Element],
}

#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

#[derive(Deserialize)]
struct DocumentFile {
    elements: Vec<Element>,
}

/// Serialize a document to bytes.
pub fn serialize(document: &Document) -> EditorResult<Vec<u8>> {
    let file = DocumentFileRef {
        format: FORMAT_TAG,
        version: FORMAT_VERSION,
        elements: document.elements(),
    };
    Ok(serde_json::to_vec_pretty(&file)?)
}

/// Deserialize a document from bytes.
pub fn deserialize(bytes: &[u8]) -> EditorResult<Document> {
    let header: Header = serde_json::from_slice(bytes)
        .map_err(|e| EditorError::Format(format!("invalid document header: {}", e)))?;
    if header.format != FORMAT_TAG {
        return Err(EditorError::Format(format!(
            "unknown format tag {:?}",
            header.format
        )));
    }
    if header.version != FORMAT_VERSION {
        return Err(EditorError::Format(format!(
            "unsupported version {} (expected {})",
            header.version, FORMAT_VERSION
        )));
    }

    let file: DocumentFile = serde_json::from_slice(bytes)?;
    let mut ids = HashSet::with_capacity(file.elements.len());
    for (index, element) in file.elements.iter().enumerate() {
        validate_element(element)
            .map_err(|reason| EditorError::Format(format!("element {}: {}", index, reason)))?;
        if !ids.insert(element.id()) {
            return Err(EditorError::Format(format!(
                "element {}: duplicate id {}",
                index,
                element.id()
            )));
        }
    }
    Ok(Document::from_elements(file.elements))
}

/// Encode a document as a `data:` URL for download links.
pub fn to_data_url(document: &Document) -> EditorResult<String> {
    let bytes = serialize(document)?;
    Ok(format!("data:{};base64,{}", MIME_TYPE, BASE64.encode(bytes)))
}

/// Decode a document from a base64 `data:` URL.
pub fn from_data_url(url: &str) -> EditorResult<Document> {
    let payload = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or_else(|| EditorError::Format("not a base64 data URL".into()))?;
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| EditorError::Format(format!("invalid base64: {}", e)))?;
    deserialize(&bytes)
}

/// Check the invariants an element must hold to be stored losslessly.
pub(crate) fn validate_element(element: &Element) -> Result<(), String> {
    element.style().validate().map_err(|e| e.to_string())?;
    match element {
        Element::Stroke(stroke) => {
            if stroke.is_empty() {
                return Err("stroke has no points".into());
            }
            if !stroke.points().iter().all(|p| is_finite(*p)) {
                return Err("stroke has non-finite coordinates".into());
            }
        }
        Element::Shape(shape) => {
            if !is_finite(shape.center()) {
                return Err("shape center is not finite".into());
            }
            if !shape.radius().is_finite() || shape.radius() < 0.0 {
                return Err(format!("invalid shape radius {}", shape.radius()));
            }
            if !shape.start_angle().is_finite() || !shape.end_angle().is_finite() {
                return Err("shape angles are not finite".into());
            }
        }
        Element::Text(text) => {
            if !is_finite(text.position()) {
                return Err("text position is not finite".into());
            }
        }
    }
    Ok(())
}

fn is_finite(point: Point) -> bool {
    point.x.is_finite() && point.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Shape, ShapeKind, Stroke, Text};
    use crate::style::Style;

    fn sample() -> Document {
        let red = Style::new("red", 0.1 + 0.2, "800px KaiTi").unwrap();
        let blue = Style::new("rgba(0, 0, 255, 0.5)", 1e-3, "12px serif").unwrap();
        let mut doc = Document::new();
        doc.append(
            Stroke::from_points(
                vec![Point::new(0.0, 0.0), Point::new(1.0 / 3.0, 2.0f64.sqrt()), Point::new(-5e-300, 1e300)],
                red.clone(),
            )
            .into(),
        );
        doc.append(Stroke::eraser(vec![Point::new(7.25, 8.5)], blue.clone()).into());
        doc.append(
            Shape::from_drag(ShapeKind::Arc, Point::new(10.0, 10.0), Point::new(13.3, 7.1), true, blue).into(),
        );
        doc.append(Text::new(Point::new(3.0, 4.0), "永 \"quoted\" ✓", red).into());
        doc
    }

    #[test]
    fn test_round_trip_exact() {
        let doc = sample();
        let bytes = serialize(&doc).unwrap();
        let decoded = deserialize(&bytes).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_empty_round_trip() {
        let doc = Document::new();
        assert_eq!(deserialize(&serialize(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_corrupt_bytes() {
        assert!(matches!(deserialize(b"\x00\xffgarbage"), Err(EditorError::Format(_))));
        assert!(matches!(deserialize(b""), Err(EditorError::Format(_))));

        let bytes = serialize(&sample()).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(deserialize(truncated), Err(EditorError::Format(_))));
    }

    #[test]
    fn test_version_mismatch() {
        let json = br#"{"format":"strokeink","version":2,"elements":[]}"#;
        let err = deserialize(json).unwrap_err();
        assert_eq!(
            err,
            EditorError::Format("unsupported version 2 (expected 1)".into())
        );
    }

    #[test]
    fn test_wrong_tag() {
        let json = br#"{"format":"excalidraw","version":1,"elements":[]}"#;
        assert!(matches!(deserialize(json), Err(EditorError::Format(_))));
    }

    #[test]
    fn test_semantic_validation() {
        let json = br#"{"format":"strokeink","version":1,"elements":[
            {"type":"stroke","id":"67e55044-10b1-426f-9247-bb680e5fe0c8","points":[],
             "style":{"color":"red","line_width":1.0,"font":"1px a"}}
        ]}"#;
        assert!(matches!(deserialize(json), Err(EditorError::Format(_))));

        let json = br#"{"format":"strokeink","version":1,"elements":[
            {"type":"text","id":"67e55044-10b1-426f-9247-bb680e5fe0c8","position":{"x":1.0,"y":2.0},
             "content":"a","style":{"color":"red","line_width":-1.0,"font":"1px a"}}
        ]}"#;
        assert!(matches!(deserialize(json), Err(EditorError::Format(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut doc = Document::new();
        let stroke = Stroke::from_points(vec![Point::ZERO], Style::default());
        doc.append(stroke.clone().into());
        doc.append(stroke.into());

        let bytes = serialize(&doc).unwrap();
        assert!(matches!(deserialize(&bytes), Err(EditorError::Format(_))));
    }

    #[test]
    fn test_data_url_round_trip() {
        let doc = sample();
        let url = to_data_url(&doc).unwrap();
        assert!(url.starts_with("data:application/octet-stream;base64,"));
        assert_eq!(from_data_url(&url).unwrap(), doc);

        assert!(from_data_url("https://example.com/doc").is_err());
        assert!(from_data_url("data:application/octet-stream;base64,@@@").is_err());
    }
}
