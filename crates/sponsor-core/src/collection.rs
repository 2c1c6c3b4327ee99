//! # Editable Line-Item Collection
//!
//! Every dashboard form edits an ordered list of rows: in-kind items, event
//! associations, department assignments, accommodation guests and meals.
//! They all share one add / update-field / remove workflow, implemented once
//! here and parameterized by the row type.
//!
//! ## Row Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    EditableList<R> Operations                           │
//! │                                                                         │
//! │  Form Action              Method                 List Change            │
//! │  ───────────              ──────                 ───────────            │
//! │                                                                         │
//! │  Click "Add" ───────────► add_row() ───────────► rows.push(blank)      │
//! │                                                                         │
//! │  Edit a field ──────────► update(i, edit) ─────► rows[i] = new row     │
//! │                           (derived fields are recomputed while the     │
//! │                            replacement is built, then swapped in)      │
//! │                                                                         │
//! │  Click "Remove" ────────► remove(i) ───────────► rows.remove(i)        │
//! │                           (refused at the minimum row count)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::trace;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Row Traits
// =============================================================================

/// A record that can be edited one field at a time.
///
/// `apply_edit` never mutates `self`: it returns the complete replacement
/// row, with any derived values already recomputed, or an error.
pub trait EditableRow: Clone {
    /// A single field change (field plus new value).
    type Edit;

    fn apply_edit(&self, edit: Self::Edit) -> CoreResult<Self>;
}

/// A row that has a sensible empty state for the "Add" button.
pub trait BlankRow: EditableRow {
    fn blank() -> Self;
}

// =============================================================================
// Pure Helpers
// =============================================================================

/// Returns a copy of `rows` with the row at `index` edited.
///
/// The input slice is left untouched. The returned vector never contains a
/// row whose derived fields disagree with its inputs.
pub fn replace_row<R: EditableRow>(rows: &[R], index: usize, edit: R::Edit) -> CoreResult<Vec<R>> {
    let current = rows.get(index).ok_or(CoreError::IndexOutOfRange {
        index,
        len: rows.len(),
    })?;

    let replacement = current.apply_edit(edit)?;

    let mut next = rows.to_vec();
    next[index] = replacement;
    Ok(next)
}

// =============================================================================
// Editable List
// =============================================================================

/// An ordered collection of rows with a minimum size.
///
/// ## Invariants
/// - `rows.len() >= min_rows` at all times
/// - A failed update or remove leaves the list unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct EditableList<R> {
    label: &'static str,
    rows: Vec<R>,
    min_rows: usize,
}

impl<R: BlankRow> EditableList<R> {
    /// Creates a list seeded with `min_rows` blank rows.
    ///
    /// Accommodation guests and meals start with one empty row so the
    /// form always shows at least one input line.
    pub fn new(label: &'static str, min_rows: usize) -> Self {
        EditableList {
            label,
            rows: (0..min_rows).map(|_| R::blank()).collect(),
            min_rows,
        }
    }

    /// Appends a blank row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.push(R::blank())
    }
}

impl<R: EditableRow> EditableList<R> {
    /// Creates an empty list that may shrink to zero rows.
    pub fn empty(label: &'static str) -> Self {
        EditableList {
            label,
            rows: Vec::new(),
            min_rows: 0,
        }
    }

    /// Wraps existing rows (e.g. when editing a saved sponsor).
    pub fn from_rows(label: &'static str, rows: Vec<R>, min_rows: usize) -> CoreResult<Self> {
        if rows.len() < min_rows {
            return Err(CoreError::MinimumRows {
                collection: label,
                min: min_rows,
            });
        }
        Ok(EditableList {
            label,
            rows,
            min_rows,
        })
    }

    /// Appends a row and returns its index.
    pub fn push(&mut self, row: R) -> usize {
        self.rows.push(row);
        trace!(collection = self.label, len = self.rows.len(), "row added");
        self.rows.len() - 1
    }

    /// Applies a field edit to the row at `index`.
    ///
    /// ## Returns
    /// - `Ok(&R)` with the updated row
    /// - `Err(IndexOutOfRange)` if no such row exists
    /// - Any error from the row's own validation
    pub fn update(&mut self, index: usize, edit: R::Edit) -> CoreResult<&R> {
        let len = self.rows.len();
        let current = self
            .rows
            .get(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;

        let replacement = current.apply_edit(edit)?;
        self.rows[index] = replacement;
        trace!(collection = self.label, index, "row updated");
        Ok(&self.rows[index])
    }

    /// Returns a new list with the row at `index` edited, leaving `self` as is.
    pub fn with_update(&self, index: usize, edit: R::Edit) -> CoreResult<Self> {
        Ok(EditableList {
            label: self.label,
            rows: replace_row(&self.rows, index, edit)?,
            min_rows: self.min_rows,
        })
    }

    /// Removes and returns the row at `index`.
    pub fn remove(&mut self, index: usize) -> CoreResult<R> {
        let len = self.rows.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        if len <= self.min_rows {
            return Err(CoreError::MinimumRows {
                collection: self.label,
                min: self.min_rows,
            });
        }

        let removed = self.rows.remove(index);
        trace!(collection = self.label, index, len = len - 1, "row removed");
        Ok(removed)
    }

    /// True when the "Remove" button should be disabled.
    pub fn at_minimum(&self) -> bool {
        self.rows.len() <= self.min_rows
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn min_rows(&self) -> usize {
        self.min_rows
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<'a, R> IntoIterator for &'a EditableList<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
