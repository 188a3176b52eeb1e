//! Implementations of the `strokeink` subcommands.

use crate::script::Script;
use anyhow::{Context, Result, bail};
use kurbo::Size;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use strokeink_core::{Document, Editor, EditorConfig, EditorEvent, Element};
use strokeink_render::{Renderer, SurfaceViewer, SvgSurface};

/// Load the editor config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// Open a document file (raw bytes or a base64 data URL) in a new editor.
pub fn open_document(path: &Path, config: &EditorConfig) -> Result<Editor> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut editor = Editor::with_config(config.clone());
    let imported = if bytes.trim_ascii_start().starts_with(b"data:") {
        let url = std::str::from_utf8(&bytes).context("Data URL is not valid UTF-8")?;
        editor.import_data_url(url.trim())
    } else {
        editor.import_bytes(&bytes)
    };
    imported.with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(editor)
}

/// Render a document to a standalone SVG string.
pub fn render_svg(document: &Document, config: &EditorConfig) -> Result<String> {
    let mut surface = SvgSurface::new(
        Size::new(config.canvas_width, config.canvas_height),
        config.background.as_str(),
    );
    Renderer::new()
        .render(document, &mut surface)
        .context("Failed to render document")?;
    Ok(surface.to_svg_string())
}

/// Result of replaying a script.
pub struct Replay {
    pub editor: Editor,
    /// The last frame the editor presented, including any unfinished element.
    pub svg: String,
    pub frames: usize,
    /// Recoverable errors that were skipped.
    pub notices: usize,
}

/// Replay `script` in a fresh editor with a live SVG viewer attached.
pub fn replay(script: &Script, config: &EditorConfig) -> Result<Replay> {
    let viewer = Rc::new(RefCell::new(SurfaceViewer::new(SvgSurface::new(
        Size::new(config.canvas_width, config.canvas_height),
        config.background.as_str(),
    ))));
    let notices = Rc::new(RefCell::new(0usize));

    let mut editor = Editor::with_config(config.clone());
    editor.set_viewer(Box::new(Rc::clone(&viewer)));
    let counter = Rc::clone(&notices);
    editor.set_listener(move |event| {
        if let EditorEvent::Notice(_) = event {
            *counter.borrow_mut() += 1;
        }
    });

    for (index, step) in script.steps.iter().enumerate() {
        if let Err(err) = step.apply(&mut editor) {
            if !err.is_recoverable() {
                bail!("Step {} ({:?}) failed: {}", index, step, err);
            }
            log::info!("step {} skipped", index);
        }
    }

    // drop the editor's handle so the viewer can be read back
    editor.take_viewer();
    let viewer = viewer.borrow();
    let notices = *notices.borrow();
    Ok(Replay {
        svg: viewer.surface().to_svg_string(),
        frames: viewer.frames_presented(),
        notices,
        editor,
    })
}

/// Element statistics for `strokeink info`.
#[derive(Debug, Default, Serialize)]
pub struct DocumentInfo {
    pub elements: usize,
    pub strokes: usize,
    pub erasers: usize,
    pub shapes: usize,
    pub texts: usize,
    pub points: usize,
    /// `[x0, y0, x1, y1]`
    pub bounds: Option<[f64; 4]>,
}

impl DocumentInfo {
    pub fn of(document: &Document) -> Self {
        let mut info = Self {
            elements: document.len(),
            bounds: document.bounds().map(|r| [r.x0, r.y0, r.x1, r.y1]),
            ..Self::default()
        };
        for element in document.iter() {
            match element {
                Element::Stroke(stroke) if stroke.is_eraser() => {
                    info.erasers += 1;
                    info.points += stroke.len();
                }
                Element::Stroke(stroke) => {
                    info.strokes += 1;
                    info.points += stroke.len();
                }
                Element::Shape(_) => info.shapes += 1,
                Element::Text(_) => info.texts += 1,
            }
        }
        info
    }
}

impl fmt::Display for DocumentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "elements: {}", self.elements)?;
        writeln!(f, "  strokes: {} ({} erasers)", self.strokes + self.erasers, self.erasers)?;
        writeln!(f, "  shapes:  {}", self.shapes)?;
        writeln!(f, "  texts:   {}", self.texts)?;
        writeln!(f, "points: {}", self.points)?;
        match self.bounds {
            Some([x0, y0, x1, y1]) => writeln!(f, "bounds: ({}, {}) - ({}, {})", x0, y0, x1, y1),
            None => writeln!(f, "bounds: none"),
        }
    }
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content).context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{"steps": [
        {"action": "color", "value": "red"},
        {"action": "down", "x": 0, "y": 0},
        {"action": "move", "x": 10, "y": 10},
        {"action": "up", "x": 10, "y": 10},
        {"action": "tool", "tool": "shape"},
        {"action": "down", "x": 50, "y": 50},
        {"action": "move", "x": 60, "y": 50},
        {"action": "up", "x": 60, "y": 50},
        {"action": "move", "x": 1, "y": 1},
        {"action": "line_width", "value": -3},
        {"action": "undo"},
        {"action": "redo"}
    ]}"#;

    #[test]
    fn test_replay_script() {
        let script = Script::from_json(SCRIPT).unwrap();
        let replay = replay(&script, &EditorConfig::default()).unwrap();

        assert_eq!(replay.editor.document().len(), 2);
        assert_eq!(replay.notices, 1);
        assert!(replay.frames > 0);
        assert!(replay.svg.contains(r#"stroke="red""#));
        assert_eq!(replay.svg, render_svg(replay.editor.document(), &EditorConfig::default()).unwrap());
    }

    #[test]
    fn test_replay_stops_on_index_error() {
        let script = Script::from_json(r#"{"steps": [{"action": "move_element", "from": 0, "to": 1}]}"#)
            .unwrap();
        assert!(replay(&script, &EditorConfig::default()).is_err());
    }

    #[test]
    fn test_saved_document_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::default();
        let script = Script::from_json(SCRIPT).unwrap();
        let replay = replay(&script, &config).unwrap();

        let raw = dir.path().join("drawing.json");
        write_output(Some(&raw), &replay.editor.export_bytes().unwrap()).unwrap();
        let opened = open_document(&raw, &config).unwrap();
        assert_eq!(opened.document(), replay.editor.document());

        let url = dir.path().join("drawing.txt");
        write_output(Some(&url), replay.editor.export_data_url().unwrap().as_bytes()).unwrap();
        let opened = open_document(&url, &config).unwrap();
        assert_eq!(opened.document(), replay.editor.document());
    }

    #[test]
    fn test_open_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"format\": \"strokeink\"").unwrap();
        assert!(open_document(&path, &EditorConfig::default()).is_err());
    }

    #[test]
    fn test_document_info() {
        let script = Script::from_json(SCRIPT).unwrap();
        let replay = replay(&script, &EditorConfig::default()).unwrap();
        let info = DocumentInfo::of(replay.editor.document());

        assert_eq!(info.elements, 2);
        assert_eq!(info.strokes, 1);
        assert_eq!(info.shapes, 1);
        assert_eq!(info.points, 2);
        assert_eq!(info.bounds, Some([-1.0, -1.0, 61.0, 61.0]));
        assert!(info.to_string().starts_with("elements: 2\n"));
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"canvas_width": 300, "background": "black"}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.canvas_width, 300.0);
        assert_eq!(config.background, "black");
        assert_eq!(load_config(None).unwrap(), EditorConfig::default());
    }
}
