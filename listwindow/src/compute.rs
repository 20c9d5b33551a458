use crate::{WindowError, WindowRange, WindowState};

/// Computes which rows to render for a fixed-row-size list.
///
/// - `first_visible = floor(scroll_offset / item_size)`
/// - `visible_count = ceil(viewport_size / item_size)`
/// - the range is `first_visible - overscan ..= first_visible + visible_count + overscan`,
///   clamped to `0..item_count`.
///
/// `scroll_offset` past the end of the content (e.g. during a fast resize) is clamped to the
/// maximum scroll offset rather than rejected. A zero `viewport_size` yields the overscan-only
/// window around the first visible row.
///
/// This is a pure function of its inputs: changing `item_count` or `item_size` between calls
/// immediately produces a consistent window.
///
/// Returns [`WindowError::ZeroItemSize`] when `item_size == 0`.
pub fn compute_window(
    item_count: usize,
    item_size: u32,
    viewport_size: u32,
    scroll_offset: u64,
    overscan: usize,
) -> Result<WindowState, WindowError> {
    if item_size == 0 {
        vwarn!(item_count, "compute_window: item_size must be positive");
        return Err(WindowError::ZeroItemSize);
    }
    Ok(window_for(
        item_count,
        item_size,
        viewport_size,
        scroll_offset,
        overscan,
    ))
}

pub(crate) fn total_size(item_count: usize, item_size: u32) -> u64 {
    (item_count as u64).saturating_mul(item_size as u64)
}

pub(crate) fn max_scroll_offset(item_count: usize, item_size: u32, viewport_size: u32) -> u64 {
    total_size(item_count, item_size).saturating_sub(viewport_size as u64)
}

fn first_visible(item_count: usize, item_size: u32, scroll_offset: u64) -> usize {
    let index = usize::try_from(scroll_offset / item_size as u64).unwrap_or(usize::MAX);
    index.min(item_count.saturating_sub(1))
}

/// `compute_window` for an already validated (non-zero) `item_size`.
pub(crate) fn window_for(
    item_count: usize,
    item_size: u32,
    viewport_size: u32,
    scroll_offset: u64,
    overscan: usize,
) -> WindowState {
    debug_assert!(item_size > 0, "item_size must be validated by the caller");
    if item_count == 0 {
        return WindowState::empty(item_size);
    }

    let max_scroll = max_scroll_offset(item_count, item_size, viewport_size);
    let scroll_offset = if scroll_offset > max_scroll {
        vtrace!(scroll_offset, max_scroll, "compute_window: clamped overscrolled offset");
        max_scroll
    } else {
        scroll_offset
    };

    let last = item_count - 1;
    let first = first_visible(item_count, item_size, scroll_offset);
    let visible_count = viewport_size.div_ceil(item_size) as usize;

    let start_index = first.saturating_sub(overscan);
    let end_index = first
        .saturating_add(visible_count)
        .saturating_add(overscan)
        .min(last);

    WindowState {
        range: Some(WindowRange {
            start_index,
            end_index,
        }),
        item_size,
        total_size: total_size(item_count, item_size),
    }
}

/// Rows intersecting `[scroll_offset, scroll_offset + viewport_size)`, without overscan.
pub(crate) fn visible_range_for(
    item_count: usize,
    item_size: u32,
    viewport_size: u32,
    scroll_offset: u64,
) -> Option<WindowRange> {
    if item_count == 0 || viewport_size == 0 || item_size == 0 {
        return None;
    }
    let scroll_offset = scroll_offset.min(max_scroll_offset(item_count, item_size, viewport_size));
    let start_index = first_visible(item_count, item_size, scroll_offset);
    let end_exclusive = scroll_offset.saturating_add(viewport_size as u64);
    let end_index = first_visible(
        item_count,
        item_size,
        end_exclusive.saturating_sub(1).max(scroll_offset),
    );
    Some(WindowRange {
        start_index,
        end_index,
    })
}
