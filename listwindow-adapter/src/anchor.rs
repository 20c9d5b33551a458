use core::fmt;

use listwindow::Window;

/// A scroll anchor that can be used to preserve visual position across data changes.
///
/// Typical use cases:
/// - a filter or sort changes which rows exist while the user is mid-list
/// - "load older" prepends in chats/timelines without content jumping
#[derive(Clone, PartialEq, Eq)]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// The distance from the anchor row's start to the viewport's scroll offset.
    pub offset_in_viewport: u64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the first visible row.
///
/// `key_for` maps a row index of the *current* dataset to its key. Returns `None` if nothing
/// is visible.
pub fn capture_first_visible_anchor<K>(
    w: &Window,
    key_for: impl FnOnce(usize) -> K,
) -> Option<ScrollAnchor<K>> {
    let visible = w.visible_range()?;
    let index = visible.start_index;
    let start = w.item_offset(index)?;
    let offset_in_viewport = w.scroll_offset().saturating_sub(start);
    Some(ScrollAnchor {
        key: key_for(index),
        offset_in_viewport,
    })
}

/// Applies a previously captured anchor by adjusting the scroll offset.
///
/// The adapter must provide a `key_to_index` mapping for the *current* dataset.
///
/// Returns `true` when the anchor was successfully applied.
pub fn apply_anchor<K>(
    w: &mut Window,
    anchor: &ScrollAnchor<K>,
    key_to_index: impl FnOnce(&K) -> Option<usize>,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    let Some(start) = w.item_offset(index) else {
        return false;
    };
    let target = start.saturating_add(anchor.offset_in_viewport);
    w.set_scroll_offset_clamped(target);
    true
}
