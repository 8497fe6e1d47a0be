//! Bookkeeping of which guide lines the user has selected.
//!
//! Indices refer to the live (unsorted) line sequences. Removing lines invalidates
//! them; whoever removes lines is responsible for clearing the selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::split::{Axis, Splits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    pub horizontal: BTreeSet<usize>,
    pub vertical: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn axis(&self, axis: Axis) -> &BTreeSet<usize> {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut BTreeSet<usize> {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Selects exactly one line and nothing else.
    pub fn select_only(&mut self, axis: Axis, index: usize) {
        self.clear();
        self.axis_mut(axis).insert(index);
    }

    /// Toggles one line in or out of the selection when `multi` is set,
    /// otherwise behaves like [`SelectionSet::select_only`].
    ///
    /// # Example
    /// ```
    /// use gridcut::{Axis, SelectionSet};
    ///
    /// let mut selection = SelectionSet::default();
    /// selection.toggle(Axis::Vertical, 2, true);
    /// selection.toggle(Axis::Horizontal, 0, true);
    /// selection.toggle(Axis::Vertical, 2, true);
    /// assert!(selection.vertical.is_empty());
    /// assert!(selection.horizontal.contains(&0));
    /// ```
    pub fn toggle(&mut self, axis: Axis, index: usize, multi: bool) {
        if !multi {
            self.select_only(axis, index);
            return;
        }
        let set = self.axis_mut(axis);
        if !set.remove(&index) {
            set.insert(index);
        }
    }

    /// Selects every line on both axes.
    pub fn select_all(&mut self, splits: &Splits) {
        self.horizontal = (0..splits.horizontal.len()).collect();
        self.vertical = (0..splits.vertical.len()).collect();
    }

    /// Selects every line on `axis` and clears the other axis.
    pub fn select_axis(&mut self, axis: Axis, splits: &Splits) {
        self.clear();
        *self.axis_mut(axis) = (0..splits.axis(axis).len()).collect();
    }

    pub fn clear(&mut self) {
        self.horizontal.clear();
        self.vertical.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    pub fn contains(&self, axis: Axis, index: usize) -> bool {
        self.axis(axis).contains(&index)
    }
}
