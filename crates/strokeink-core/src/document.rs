//! Ordered document of committed elements.

use crate::elements::Element;
use crate::error::{EditorError, EditorResult};
use kurbo::Rect;

/// A drawing: elements in paint order (back to front).
///
/// Outside this crate the document can only grow by `append`; removal,
/// replacement and reordering go through [`History`](crate::history::History).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element at the end and return its index.
    pub fn append(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn element_at(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    pub(crate) fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub(crate) fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> EditorResult<Element> {
        self.check_index(index)?;
        Ok(self.elements.remove(index))
    }

    /// Swap in a new element at `index`, returning the old one.
    pub(crate) fn replace_at(&mut self, index: usize, element: Element) -> EditorResult<Element> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.elements[index], element))
    }

    /// Move the element at `from` so it ends up at index `to`.
    pub(crate) fn move_element(&mut self, from: usize, to: usize) -> EditorResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        Ok(())
    }

    /// Move the `count` elements starting at `start` so the run begins at `to`.
    pub(crate) fn move_range(&mut self, start: usize, count: usize, to: usize) -> EditorResult<()> {
        let len = self.elements.len();
        let fits = |first: usize| first.checked_add(count).is_some_and(|end| end <= len);
        if count == 0 || !fits(start) {
            return Err(EditorError::element_index(start.saturating_add(count), len));
        }
        if !fits(to) {
            return Err(EditorError::element_index(to.saturating_add(count), len));
        }
        let run: Vec<Element> = self.elements.drain(start..start + count).collect();
        self.elements.splice(to..to, run);
        Ok(())
    }

    pub(crate) fn replace_all(&mut self, elements: Vec<Element>) -> Vec<Element> {
        std::mem::replace(&mut self.elements, elements)
    }

    fn check_index(&self, index: usize) -> EditorResult<()> {
        if index < self.elements.len() {
            Ok(())
        } else {
            Err(EditorError::element_index(index, self.elements.len()))
        }
    }
}
