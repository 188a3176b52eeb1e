//! Text element.

use super::ElementId;
use crate::style::Style;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A run of text anchored at the left end of its alphabetic baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    pub(crate) position: Point,
    pub(crate) content: String,
    pub(crate) style: Style,
}

impl Text {
    /// Font size used when the style's font has no pixel size.
    pub const FALLBACK_FONT_SIZE: f64 = 16.0;

    /// Create a new text element.
    pub fn new(position: Point, content: impl Into<String>, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            style,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Pixel size parsed from the CSS font shorthand (e.g. `bold 24px serif`).
    pub fn font_size(&self) -> f64 {
        font_size_px(self.style.font()).unwrap_or(Self::FALLBACK_FONT_SIZE)
    }

    /// Approximate bounds (no shaping is done in the core).
    pub fn bounds(&self) -> Rect {
        let size = self.font_size();
        let width = self.content.chars().count() as f64 * size * 0.6;
        Rect::new(
            self.position.x,
            self.position.y - size,
            self.position.x + width,
            self.position.y + size * 0.25,
        )
    }
}

fn font_size_px(font: &str) -> Option<f64> {
    font.split_whitespace()
        .filter_map(|token| token.strip_suffix("px"))
        // "16px/1.2" line-height form is not split by whitespace
        .chain(
            font.split_whitespace()
                .filter_map(|token| token.split_once("px/").map(|(size, _)| size)),
        )
        .find_map(|size| size.parse::<f64>().ok())
        .filter(|size| *size > 0.0)
}
