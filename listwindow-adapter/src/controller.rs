use listwindow::{Align, Window, WindowError, WindowOptions, WindowState};

use crate::{Easing, ScrollAnchor, Tween, apply_anchor, capture_first_visible_anchor};

/// A framework-neutral controller that wraps a [`listwindow::Window`] and provides common
/// adapter workflows (anchoring, tween-driven scrolling).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick (for tween scrolling and `is_scrolling` debouncing)
///
/// For UI scroll containers, use the offset returned from `tick()` to set the real scroll
/// position while keeping the window state in sync.
#[derive(Clone, Debug)]
pub struct ScrollController {
    w: Window,
    tween: Option<Tween>,
}

impl ScrollController {
    pub fn new(options: WindowOptions) -> Result<Self, WindowError> {
        Ok(Self::from_window(Window::new(options)?))
    }

    pub fn from_window(w: Window) -> Self {
        Self { w, tween: None }
    }

    pub fn window(&self) -> &Window {
        &self.w
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.w
    }

    pub fn into_window(self) -> Window {
        self.w
    }

    /// The rows to render right now.
    pub fn state(&self) -> WindowState {
        self.w.state()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_viewport_size(&mut self, viewport_size: u32) {
        self.w.set_viewport_size(viewport_size);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.cancel_animation();
        self.w.apply_scroll_event(scroll_offset, now_ms);
    }

    /// Advances the controller.
    ///
    /// - If a tween is active, updates `scroll_offset` and returns the new offset.
    /// - Otherwise, runs `is_scrolling` debouncing and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let Some(tween) = self.tween else {
            self.w.update_scrolling(now_ms);
            return None;
        };

        let off = tween.sample(now_ms);
        self.w.apply_scroll_event_clamped(off, now_ms);

        if tween.is_done(now_ms) {
            self.tween = None;
            self.w.set_is_scrolling(false);
        }

        Some(self.w.scroll_offset())
    }

    /// Computes and applies a scroll-to-index immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align, now_ms: u64) -> u64 {
        self.cancel_animation();
        let off = self.w.scroll_to_index_offset(index, align);
        self.w.apply_scroll_event_clamped(off, now_ms);
        self.w.scroll_offset()
    }

    /// Applies a scroll-to-offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: u64, now_ms: u64) -> u64 {
        self.cancel_animation();
        self.w.apply_scroll_event_clamped(offset, now_ms);
        self.w.scroll_offset()
    }

    /// Starts a tween to an index. Returns the clamped target offset.
    pub fn start_tween_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> u64 {
        let to = self.w.scroll_to_index_offset(index, align);
        self.start_tween_to_offset(to, now_ms, duration_ms, easing)
    }

    /// Starts a tween to an offset. Returns the clamped target offset.
    ///
    /// An active tween is retargeted from its current position.
    pub fn start_tween_to_offset(
        &mut self,
        offset: u64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> u64 {
        let to = self.w.clamp_scroll_offset(offset);
        match &mut self.tween {
            Some(tween) if tween.easing == easing => tween.retarget(now_ms, to, duration_ms),
            _ => {
                let from = self.w.scroll_offset();
                self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
            }
        }
        to
    }

    /// Captures an anchor for the first visible row; see [`capture_first_visible_anchor`].
    pub fn capture_first_visible_anchor<K>(
        &self,
        key_for: impl FnOnce(usize) -> K,
    ) -> Option<ScrollAnchor<K>> {
        capture_first_visible_anchor(&self.w, key_for)
    }

    /// Applies a previously captured anchor by adjusting the scroll offset.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor<K>(
        &mut self,
        anchor: &ScrollAnchor<K>,
        key_to_index: impl FnOnce(&K) -> Option<usize>,
    ) -> bool {
        self.cancel_animation();
        apply_anchor(&mut self.w, anchor, key_to_index)
    }
}
