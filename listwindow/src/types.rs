use core::ops::RangeInclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A contiguous, non-empty range of row indexes. Both ends are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl WindowRange {
    /// Number of rows in the range (always at least one).
    pub fn count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// A row to render: its index and its absolute start offset in the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowEntry {
    pub index: usize,
    /// Start offset in the scroll axis (`index * item_size`).
    pub offset: u64,
}

/// A [`WindowEntry`] paired with the caller's item.
#[derive(Debug, PartialEq, Eq)]
pub struct VisibleEntry<'a, T> {
    pub item: &'a T,
    pub index: usize,
    pub offset: u64,
}

impl<T> Clone for VisibleEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VisibleEntry<'_, T> {}

/// The rows to render for one scroll/viewport configuration.
///
/// `range` is `None` only when the list has no rows. Rows are meant to be positioned
/// absolutely at their offset inside a spacer of `total_size`, so that sibling positions never
/// shift as the window moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub range: Option<WindowRange>,
    pub item_size: u32,
    /// Total scrollable extent (`item_count * item_size`).
    pub total_size: u64,
}

impl WindowState {
    pub(crate) fn empty(item_size: u32) -> Self {
        Self {
            range: None,
            item_size,
            total_size: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    /// Number of rows to render.
    pub fn len(&self) -> usize {
        self.range.map_or(0, |r| r.count())
    }

    pub fn start_index(&self) -> Option<usize> {
        self.range.map(|r| r.start_index)
    }

    pub fn end_index(&self) -> Option<usize> {
        self.range.map(|r| r.end_index)
    }

    pub fn offset_of(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.item_size as u64)
    }

    /// Iterates the rows to render in ascending index order.
    pub fn entries(&self) -> impl Iterator<Item = WindowEntry> + use<> {
        let item_size = self.item_size as u64;
        self.range
            .into_iter()
            .flat_map(|r| r.indexes())
            .map(move |index| WindowEntry {
                index,
                offset: (index as u64).saturating_mul(item_size),
            })
    }

    /// Iterates the rows to render, paired with the caller's items.
    ///
    /// Indexes past the end of `items` are skipped, so a host may pass a collection that was
    /// shortened after the window was computed.
    pub fn visible_entries<'a, T>(
        &self,
        items: &'a [T],
    ) -> impl Iterator<Item = VisibleEntry<'a, T>> + use<'a, T> {
        self.entries().filter_map(move |e| {
            items.get(e.index).map(|item| VisibleEntry {
                item,
                index: e.index,
                offset: e.offset,
            })
        })
    }
}
