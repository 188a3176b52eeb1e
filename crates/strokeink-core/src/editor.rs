//! Editor session: the value a host drives with pointer input and UI commands.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::elements::{Element, ShapeKind};
use crate::error::{EditorError, EditorResult};
use crate::format;
use crate::history::{History, HistoryEntry};
use crate::input::PointerEvent;
use crate::style::{Style, StyleState};
use crate::tools::{InputTracker, ToolKind};
use kurbo::Point;
use std::cell::RefCell;
use std::rc::Rc;

/// What a viewer needs to repaint: committed elements plus the live preview.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub document: &'a Document,
    pub preview: Option<&'a Element>,
}

/// Repaint hook. Called after every visible change.
pub trait Viewer {
    fn present(&mut self, frame: &Frame<'_>);
}

impl<V: Viewer + ?Sized> Viewer for Rc<RefCell<V>> {
    fn present(&mut self, frame: &Frame<'_>) {
        self.borrow_mut().present(frame);
    }
}

/// Kind of committed document change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Append,
    Undo,
    Redo,
    Clear,
    Import,
    EditPoints,
    Reorder,
}

/// Notification sent to the host listener.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The document changed.
    Changed {
        kind: ChangeKind,
        len: usize,
        can_undo: bool,
        can_redo: bool,
    },
    /// A recoverable error was ignored.
    Notice(EditorError),
}

type Listener = Box<dyn FnMut(&EditorEvent)>;

/// One editing session.
pub struct Editor {
    config: EditorConfig,
    style: StyleState,
    tracker: InputTracker,
    document: Document,
    history: History,
    viewer: Option<Box<dyn Viewer>>,
    listener: Option<Listener>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("style", &self.style)
            .field("tracker", &self.tracker)
            .field("document", &self.document)
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .finish_non_exhaustive()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            style: StyleState::new(config.default_style.clone()),
            tracker: InputTracker::with_simplify_tolerance(config.simplify_tolerance),
            document: Document::new(),
            history: History::with_limit(config.history_limit),
            viewer: None,
            listener: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn style_state(&self) -> &StyleState {
        &self.style
    }

    pub fn style(&self) -> &Style {
        self.style.current()
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    pub fn is_drawing(&self) -> bool {
        self.tracker.is_drawing()
    }

    /// The in-progress element built from the live style.
    pub fn preview(&self) -> Option<Element> {
        self.tracker.preview(&self.style)
    }

    /// Install a viewer and paint the current state into it.
    pub fn set_viewer(&mut self, viewer: Box<dyn Viewer>) {
        self.viewer = Some(viewer);
        self.repaint();
    }

    pub fn take_viewer(&mut self) -> Option<Box<dyn Viewer>> {
        self.viewer.take()
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    // --- style state ---

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("tool -> {:?}", tool);
        self.style.set_tool(tool);
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> EditorResult<()> {
        let result = self.style.set_color(color);
        self.after_style_change(result)
    }

    pub fn set_line_width(&mut self, width: f64) -> EditorResult<()> {
        let result = self.style.set_line_width(width);
        self.after_style_change(result)
    }

    pub fn set_font(&mut self, font: impl Into<String>) -> EditorResult<()> {
        let result = self.style.set_font(font);
        self.after_style_change(result)
    }

    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        self.style.set_shape_kind(kind);
        self.repaint_preview();
    }

    pub fn set_fill_shapes(&mut self, fill: bool) {
        self.style.set_fill_shapes(fill);
        self.repaint_preview();
    }

    fn after_style_change(&mut self, result: EditorResult<()>) -> EditorResult<()> {
        if result.is_ok() {
            self.repaint_preview();
        }
        self.recover(result)
    }

    // --- drawing ---

    /// Start an element with the active tool at `point`.
    pub fn begin(&mut self, point: Point) -> EditorResult<()> {
        let result = check_finite(point).map(|()| {
            self.tracker.begin(self.style.active_tool(), point);
        });
        if result.is_ok() {
            self.repaint();
        }
        self.recover(result)
    }

    pub fn extend(&mut self, point: Point) -> EditorResult<()> {
        let result = check_finite(point).and_then(|()| self.tracker.extend(point));
        if result.is_ok() {
            self.repaint();
        }
        self.recover(result)
    }

    /// Set the content of the text being placed.
    pub fn set_text(&mut self, content: impl Into<String>) -> EditorResult<()> {
        let result = self.tracker.set_text(content);
        if result.is_ok() {
            self.repaint();
        }
        self.recover(result)
    }

    /// Finish the in-progress element and append it; returns its index.
    ///
    /// An element that could not be saved (e.g. a radius that overflowed)
    /// is rejected and the interaction stays open.
    pub fn commit(&mut self) -> EditorResult<usize> {
        if let Some(pending) = self.tracker.preview(&self.style) {
            if let Err(reason) = format::validate_element(&pending) {
                let err = EditorError::Edit(format!("cannot commit {}: {}", pending.kind_name(), reason));
                return self.recover(Err(err));
            }
        }
        let result = self.tracker.commit(&self.style);
        let element = self.recover(result)?;
        log::debug!("commit {} {}", element.kind_name(), element.id());
        let index = self.history.record_append(element, &mut self.document)?;
        self.changed(ChangeKind::Append);
        Ok(index)
    }

    pub fn cancel(&mut self) -> EditorResult<()> {
        let result = self.tracker.cancel();
        if result.is_ok() {
            self.repaint();
        }
        self.recover(result)
    }

    /// Translate a pointer event into tracker transitions.
    ///
    /// Returns the index of the element committed by this event, if any.
    /// Moves outside a drawing interaction are ignored. Releasing the text
    /// tool ends placement only; the text is committed with [`commit`](Self::commit).
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EditorResult<Option<usize>> {
        match event {
            PointerEvent::Down { position } => {
                self.begin(position)?;
                Ok(None)
            }
            PointerEvent::Move { position } => {
                if self.tracker.is_drawing() {
                    self.extend(position)?;
                }
                Ok(None)
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => match self.tracker.active_tool() {
                Some(tool) if tool.commits_on_release() => self.commit().map(Some),
                _ => Ok(None),
            },
        }
    }

    // --- history ---

    pub fn undo(&mut self) -> EditorResult<bool> {
        let undone = self.history.undo(&mut self.document)?;
        if undone {
            self.changed(ChangeKind::Undo);
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> EditorResult<bool> {
        let redone = self.history.redo(&mut self.document)?;
        if redone {
            self.changed(ChangeKind::Redo);
        }
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the change `undo` would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.history.peek_undo().map(HistoryEntry::label)
    }

    pub fn redo_label(&self) -> Option<&'static str> {
        self.history.peek_redo().map(HistoryEntry::label)
    }

    /// Remove every element. Undoable. Clearing an empty document does nothing.
    pub fn clear(&mut self) -> EditorResult<()> {
        if self.document.is_empty() {
            return Ok(());
        }
        let entry = HistoryEntry::ReplaceDocument {
            before: self.document.elements().to_vec(),
            after: Vec::new(),
        };
        self.history.record(entry, &mut self.document)?;
        log::info!("cleared document");
        self.changed(ChangeKind::Clear);
        Ok(())
    }

    // --- point editing ---

    /// Replace one point of the stroke at `element`.
    pub fn replace_point(&mut self, element: usize, index: usize, point: Point) -> EditorResult<()> {
        self.edit_points(element, |points| {
            check_finite(point)?;
            let len = points.len();
            let slot = points
                .get_mut(index)
                .ok_or(EditorError::point_index(index, len))?;
            *slot = point;
            Ok(())
        })
    }

    pub fn insert_point_before(
        &mut self,
        element: usize,
        index: usize,
        point: Point,
    ) -> EditorResult<()> {
        self.edit_points(element, |points| {
            check_finite(point)?;
            check_point_index(points, index)?;
            points.insert(index, point);
            Ok(())
        })
    }

    pub fn insert_point_after(
        &mut self,
        element: usize,
        index: usize,
        point: Point,
    ) -> EditorResult<()> {
        self.edit_points(element, |points| {
            check_finite(point)?;
            check_point_index(points, index)?;
            points.insert(index + 1, point);
            Ok(())
        })
    }

    /// Remove one point. A stroke always keeps at least one point.
    pub fn remove_point(&mut self, element: usize, index: usize) -> EditorResult<()> {
        self.edit_points(element, |points| {
            check_point_index(points, index)?;
            if points.len() == 1 {
                return Err(EditorError::Edit(
                    "cannot remove the last point of a stroke".into(),
                ));
            }
            points.remove(index);
            Ok(())
        })
    }

    fn edit_points(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Vec<Point>) -> EditorResult<()>,
    ) -> EditorResult<()> {
        let result = self.try_edit_points(index, edit);
        if result.is_ok() {
            self.changed(ChangeKind::EditPoints);
        }
        self.recover(result)
    }

    fn try_edit_points(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Vec<Point>) -> EditorResult<()>,
    ) -> EditorResult<()> {
        let before = self
            .document
            .element_at(index)
            .cloned()
            .ok_or(EditorError::element_index(index, self.document.len()))?;
        let Element::Stroke(stroke) = &before else {
            return Err(EditorError::Edit(format!(
                "{} elements have no editable points",
                before.kind_name()
            )));
        };
        let mut points = stroke.points().to_vec();
        edit(&mut points)?;
        let after = Element::Stroke(stroke.with_points(points));
        self.history.record(
            HistoryEntry::ReplaceElement {
                index,
                before,
                after,
            },
            &mut self.document,
        )
    }

    // --- ordering ---

    /// Move the element at `from` to index `to`.
    pub fn move_element(&mut self, from: usize, to: usize) -> EditorResult<()> {
        let len = self.document.len();
        if from >= len || to >= len {
            return Err(EditorError::element_index(from.max(to), len));
        }
        if from == to {
            return Ok(());
        }
        self.history
            .record(HistoryEntry::Move { from, to }, &mut self.document)?;
        self.changed(ChangeKind::Reorder);
        Ok(())
    }

    /// Move the `count` elements starting at `start` one step later, or
    /// behind every other element when `to_end` is set. Recorded as a
    /// single undo step.
    pub fn move_range(&mut self, start: usize, count: usize, to_end: bool) -> EditorResult<()> {
        let result = self.try_move_range(start, count, to_end);
        if result.is_ok() {
            self.changed(ChangeKind::Reorder);
        }
        self.recover(result)
    }

    fn try_move_range(&mut self, start: usize, count: usize, to_end: bool) -> EditorResult<()> {
        let len = self.document.len();
        if start >= len {
            return Err(EditorError::element_index(start, len));
        }
        if count == 0 || count > len - start {
            return Err(EditorError::Edit(format!(
                "not enough elements to move {} from index {}",
                count, start
            )));
        }
        let end = start + count;
        if end == len {
            return Err(EditorError::Edit("elements are already at the end".into()));
        }
        let to = if to_end { len - count } else { start + 1 };
        self.history.record(
            HistoryEntry::MoveRange { start, count, to },
            &mut self.document,
        )
    }

    /// Paint the element one step later (closer to the front).
    /// Returns `Ok(false)` if it is already frontmost.
    pub fn bring_forward(&mut self, index: usize) -> EditorResult<bool> {
        let len = self.document.len();
        if index >= len {
            return Err(EditorError::element_index(index, len));
        }
        if index + 1 == len {
            return Ok(false);
        }
        self.move_element(index, index + 1)?;
        Ok(true)
    }

    /// Paint the element one step earlier. Returns `Ok(false)` if it is already at the back.
    pub fn send_backward(&mut self, index: usize) -> EditorResult<bool> {
        if index >= self.document.len() {
            return Err(EditorError::element_index(index, self.document.len()));
        }
        if index == 0 {
            return Ok(false);
        }
        self.move_element(index, index - 1)?;
        Ok(true)
    }

    // --- export / import ---

    pub fn export_bytes(&self) -> EditorResult<Vec<u8>> {
        format::serialize(&self.document)
    }

    pub fn export_data_url(&self) -> EditorResult<String> {
        format::to_data_url(&self.document)
    }

    /// Replace the document with a decoded payload. Undoable.
    ///
    /// On error the document is left untouched.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> EditorResult<()> {
        let imported = format::deserialize(bytes).inspect_err(|err| {
            log::warn!("import failed: {}", err);
        })?;
        self.replace_document(imported)
    }

    pub fn import_data_url(&mut self, url: &str) -> EditorResult<()> {
        let imported = format::from_data_url(url).inspect_err(|err| {
            log::warn!("import failed: {}", err);
        })?;
        self.replace_document(imported)
    }

    fn replace_document(&mut self, imported: Document) -> EditorResult<()> {
        let count = imported.len();
        let entry = HistoryEntry::ReplaceDocument {
            before: self.document.elements().to_vec(),
            after: imported.into_elements(),
        };
        self.history.record(entry, &mut self.document)?;
        log::info!("imported document with {} elements", count);
        self.changed(ChangeKind::Import);
        Ok(())
    }

    // --- hooks ---

    fn changed(&mut self, kind: ChangeKind) {
        let event = EditorEvent::Changed {
            kind,
            len: self.document.len(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        };
        self.emit(&event);
        self.repaint();
    }

    fn emit(&mut self, event: &EditorEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }

    fn repaint(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            let preview = self.tracker.preview(&self.style);
            viewer.present(&Frame {
                document: &self.document,
                preview: preview.as_ref(),
            });
        }
    }

    fn repaint_preview(&mut self) {
        if self.tracker.is_drawing() {
            self.repaint();
        }
    }

    /// Log and report recoverable errors; the result is passed through.
    fn recover<T>(&mut self, result: EditorResult<T>) -> EditorResult<T> {
        if let Err(err) = &result {
            if err.is_recoverable() {
                log::warn!("ignored: {}", err);
                self.emit(&EditorEvent::Notice(err.clone()));
            }
        }
        result
    }
}

fn check_finite(point: Point) -> EditorResult<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(EditorError::Edit(format!("non-finite point ({}, {})", point.x, point.y)))
    }
}

fn check_point_index(points: &[Point], index: usize) -> EditorResult<()> {
    if index < points.len() {
        Ok(())
    } else {
        Err(EditorError::point_index(index, points.len()))
    }
}
