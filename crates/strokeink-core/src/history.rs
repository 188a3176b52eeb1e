//! Undo/redo history of document mutations.

use crate::document::Document;
use crate::elements::Element;
use crate::error::{EditorError, EditorResult};

/// Default maximum number of undo entries to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A recorded document mutation together with everything needed to invert it.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    /// Append at the end; inverted by removing the last element.
    Append(Element),
    /// Swap the whole element list (clear, import).
    ReplaceDocument {
        before: Vec<Element>,
        after: Vec<Element>,
    },
    /// Swap one element in place (point edits).
    ReplaceElement {
        index: usize,
        before: Element,
        after: Element,
    },
    /// Reorder one element.
    Move { from: usize, to: usize },
    /// Reorder a run of `count` consecutive elements.
    MoveRange { start: usize, count: usize, to: usize },
}

impl HistoryEntry {
    /// Apply the forward action.
    fn apply(&self, document: &mut Document) -> EditorResult<()> {
        match self {
            HistoryEntry::Append(element) => {
                document.append(element.clone());
            }
            HistoryEntry::ReplaceDocument { after, .. } => {
                document.replace_all(after.clone());
            }
            HistoryEntry::ReplaceElement { index, after, .. } => {
                document.replace_at(*index, after.clone())?;
            }
            HistoryEntry::Move { from, to } => document.move_element(*from, *to)?,
            HistoryEntry::MoveRange { start, count, to } => {
                document.move_range(*start, *count, *to)?
            }
        }
        Ok(())
    }

    /// Apply the inverse action.
    fn revert(&self, document: &mut Document) -> EditorResult<()> {
        match self {
            HistoryEntry::Append(element) => {
                let last = document
                    .len()
                    .checked_sub(1)
                    .ok_or(EditorError::element_index(0, 0))?;
                if document.element_at(last).map(Element::id) != Some(element.id()) {
                    return Err(EditorError::element_index(last, document.len()));
                }
                document.remove_at(last)?;
            }
            HistoryEntry::ReplaceDocument { before, .. } => {
                document.replace_all(before.clone());
            }
            HistoryEntry::ReplaceElement { index, before, .. } => {
                document.replace_at(*index, before.clone())?;
            }
            HistoryEntry::Move { from, to } => document.move_element(*to, *from)?,
            HistoryEntry::MoveRange { start, count, to } => {
                document.move_range(*to, *count, *start)?
            }
        }
        Ok(())
    }

    /// Human-readable label for UI chrome ("Undo draw").
    pub fn label(&self) -> &'static str {
        match self {
            HistoryEntry::Append(_) => "draw",
            HistoryEntry::ReplaceDocument { .. } => "replace document",
            HistoryEntry::ReplaceElement { .. } => "edit points",
            HistoryEntry::Move { .. } | HistoryEntry::MoveRange { .. } => "reorder",
        }
    }
}

/// Linear undo/redo stacks. Recording a new entry discards the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` undo entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Apply `entry` to the document and record it.
    ///
    /// Nothing is recorded if the entry cannot be applied.
    pub fn record(&mut self, entry: HistoryEntry, document: &mut Document) -> EditorResult<()> {
        entry.apply(document)?;
        self.undo_stack.push(entry);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
        Ok(())
    }

    /// Record the append of a freshly committed element; returns its index.
    pub fn record_append(&mut self, element: Element, document: &mut Document) -> EditorResult<usize> {
        self.record(HistoryEntry::Append(element), document)?;
        Ok(document.len() - 1)
    }

    /// Undo the last change.
    /// Returns `Ok(true)` if undo was performed, `Ok(false)` if there was nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> EditorResult<bool> {
        let Some(entry) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = entry.revert(document) {
            self.undo_stack.push(entry);
            return Err(err);
        }
        self.redo_stack.push(entry);
        Ok(true)
    }

    /// Redo the last undone change.
    /// Returns `Ok(true)` if redo was performed, `Ok(false)` if there was nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> EditorResult<bool> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = entry.apply(document) {
            self.redo_stack.push(entry);
            return Err(err);
        }
        self.undo_stack.push(entry);
        Ok(true)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The entry the next `undo` would revert.
    pub fn peek_undo(&self) -> Option<&HistoryEntry> {
        self.undo_stack.last()
    }

    pub fn peek_redo(&self) -> Option<&HistoryEntry> {
        self.redo_stack.last()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forget all entries.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
