use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;

use crate::compute::{self, window_for};
use crate::{
    Align, FrameState, InitialOffset, ScrollDirection, ScrollState, WindowEntry, WindowError,
    WindowOptions, WindowRange, WindowState,
};

/// A stateful, headless window over a fixed-row-size list.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by providing the viewport size and scroll offsets.
/// - Rendering reads [`Window::state`] (or the zero-allocation `for_each_entry`).
///
/// For smooth scrolling / tweens / anchoring patterns, see the `listwindow-adapter` crate.
#[derive(Clone, Debug)]
pub struct Window {
    options: WindowOptions,
    viewport_size: u32,
    scroll_offset: u64,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    last_scroll_event_ms: Option<u64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

fn validate(options: &WindowOptions) -> Result<(), WindowError> {
    if options.item_size == 0 {
        vwarn!(count = options.count, "Window: item_size must be positive");
        return Err(WindowError::ZeroItemSize);
    }
    Ok(())
}

impl Window {
    /// Creates a new window from options.
    ///
    /// `options.initial_viewport_size` and `options.initial_offset` are applied immediately.
    pub fn new(options: WindowOptions) -> Result<Self, WindowError> {
        validate(&options)?;
        vdebug!(
            count = options.count,
            item_size = options.item_size,
            overscan = options.overscan,
            "Window::new"
        );
        Ok(Self {
            viewport_size: options.initial_viewport_size.unwrap_or_default(),
            scroll_offset: options.initial_offset.resolve(),
            is_scrolling: false,
            scroll_direction: None,
            last_scroll_event_ms: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    /// Replaces the options. Viewport and scroll state are kept.
    ///
    /// Rejects options with a zero `item_size` and keeps the previous options in that case.
    pub fn set_options(&mut self, options: WindowOptions) -> Result<(), WindowError> {
        validate(&options)?;
        self.options = options;
        vtrace!(
            count = self.options.count,
            item_size = self.options.item_size,
            overscan = self.options.overscan,
            "Window::set_options"
        );
        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WindowOptions),
    ) -> Result<(), WindowError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Window, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_initial_offset(&mut self, initial_offset: u64) {
        self.options.initial_offset = InitialOffset::Value(initial_offset);
        self.notify();
    }

    pub fn set_is_scrolling_reset_delay_ms(&mut self, delay_ms: u64) {
        self.options.is_scrolling_reset_delay_ms = delay_ms;
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame an adapter updates the viewport size, scroll offset and
    /// `is_scrolling` together; without batching each setter may trigger `on_change`.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.notify();
    }

    pub fn item_size(&self) -> u32 {
        self.options.item_size
    }

    pub fn set_item_size(&mut self, item_size: u32) -> Result<(), WindowError> {
        if item_size == 0 {
            vwarn!("Window::set_item_size: item_size must be positive");
            return Err(WindowError::ZeroItemSize);
        }
        if self.options.item_size != item_size {
            self.options.item_size = item_size;
            self.notify();
        }
        Ok(())
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Resets `is_scrolling` once `is_scrolling_reset_delay_ms` has elapsed since the last
    /// scroll event. Call this from your frame loop / timer.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll offset update from your UI layer (e.g. wheel/drag), and marks the
    /// window as scrolling.
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        vtrace!(offset, now_ms, "apply_scroll_event");
        self.batch_update(|w| {
            w.set_scroll_offset(offset);
            w.notify_scroll_event(now_ms);
        });
    }

    /// Same as `apply_scroll_event`, but clamps the offset.
    pub fn apply_scroll_event_clamped(&mut self, offset: u64, now_ms: u64) {
        vtrace!(offset, now_ms, "apply_scroll_event_clamped");
        self.batch_update(|w| {
            w.set_scroll_offset_clamped(offset);
            w.notify_scroll_event(now_ms);
        });
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|w| {
            w.set_viewport_size(viewport_size);
            w.set_scroll_offset(scroll_offset);
        });
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|w| {
            w.set_viewport_size(viewport_size);
            w.set_scroll_offset_clamped(scroll_offset);
        });
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
            is_scrolling: self.is_scrolling,
        }
    }

    /// Returns a combined snapshot of viewport size + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport_size: self.viewport_size,
            scroll: self.scroll_state(),
        }
    }

    /// Restores both viewport + scroll state from a previously captured snapshot.
    ///
    /// When `frame.scroll.is_scrolling` is `true`, this updates the internal scrolling timers
    /// as if a scroll event happened at `now_ms`.
    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        self.batch_update(|w| {
            w.set_viewport_size(frame.viewport_size);
            w.set_scroll_offset_clamped(frame.scroll.offset);
            if frame.scroll.is_scrolling {
                w.notify_scroll_event(now_ms);
            } else {
                w.set_is_scrolling(false);
            }
        });
    }

    pub fn total_size(&self) -> u64 {
        compute::total_size(self.options.count, self.options.item_size)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        compute::max_scroll_offset(
            self.options.count,
            self.options.item_size,
            self.viewport_size,
        )
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The rows to render for the current viewport and scroll offset, overscan included.
    pub fn state(&self) -> WindowState {
        self.state_for(self.scroll_offset, self.viewport_size)
    }

    /// Same as [`Self::state`] for an arbitrary scroll offset / viewport size.
    pub fn state_for(&self, scroll_offset: u64, viewport_size: u32) -> WindowState {
        window_for(
            self.options.count,
            self.options.item_size,
            viewport_size,
            scroll_offset,
            self.options.overscan,
        )
    }

    /// Rows intersecting the viewport, without overscan.
    ///
    /// Returns `None` when the list is empty or the viewport has no size.
    pub fn visible_range(&self) -> Option<WindowRange> {
        compute::visible_range_for(
            self.options.count,
            self.options.item_size,
            self.viewport_size,
            self.scroll_offset,
        )
    }

    pub fn for_each_entry(&self, mut f: impl FnMut(WindowEntry)) {
        for entry in self.state().entries() {
            f(entry);
        }
    }

    /// Collects the rows to render into `out` (clears `out` first).
    ///
    /// For maximum performance, prefer `for_each_entry` and reuse a scratch buffer.
    pub fn collect_entries(&self, out: &mut Vec<WindowEntry>) {
        out.clear();
        self.for_each_entry(|e| out.push(e));
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if offset >= self.total_size() {
            return None;
        }
        usize::try_from(offset / self.options.item_size as u64).ok()
    }

    pub fn item_offset(&self, index: usize) -> Option<u64> {
        (index < self.options.count)
            .then(|| (index as u64).saturating_mul(self.options.item_size as u64))
    }

    pub fn item_end(&self, index: usize) -> Option<u64> {
        let start = self.item_offset(index)?;
        Some(start.saturating_add(self.options.item_size as u64))
    }

    /// Programmatically scrolls to an index (no animation).
    ///
    /// This does **not** mark the window as "scrolling". Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let count = self.options.count;
        if count == 0 {
            return 0;
        }
        let index = index.min(count - 1);
        let size = self.options.item_size as u64;
        let start = (index as u64).saturating_mul(size);
        let end = start.saturating_add(size);
        let view = self.viewport_size as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }
}
