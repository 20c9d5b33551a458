use alloc::sync::Arc;

use crate::window::Window;

/// A callback fired when a window state update occurs.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&Window, bool) + Send + Sync>;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called by `Window::new`).
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::Window`].
///
/// Cheap to clone: callbacks are stored in `Arc`s so adapters can tweak a field and call
/// `Window::set_options`.
#[derive(Clone)]
pub struct WindowOptions {
    pub count: usize,
    /// Row size in the scroll axis. Must be positive.
    pub item_size: u32,
    /// Extra rows rendered beyond the viewport on each side.
    pub overscan: usize,

    /// The initial viewport size in the scroll axis.
    pub initial_viewport_size: Option<u32>,

    /// Initial scroll offset.
    pub initial_offset: InitialOffset,

    /// Optional callback fired when the window's state changes.
    pub on_change: Option<OnChangeCallback>,

    /// Debounce duration for resetting `is_scrolling` after the last scroll event.
    pub is_scrolling_reset_delay_ms: u64,
}

impl WindowOptions {
    /// Creates options for `count` rows of `item_size` each.
    pub fn new(count: usize, item_size: u32) -> Self {
        Self {
            count,
            item_size,
            overscan: 1,
            initial_viewport_size: None,
            initial_offset: InitialOffset::default(),
            on_change: None,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_viewport_size(mut self, viewport_size: Option<u32>) -> Self {
        self.initial_viewport_size = viewport_size;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Window, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("count", &self.count)
            .field("item_size", &self.item_size)
            .field("overscan", &self.overscan)
            .field("initial_viewport_size", &self.initial_viewport_size)
            .field("initial_offset", &self.initial_offset)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
