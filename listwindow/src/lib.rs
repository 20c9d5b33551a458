//! Headless windowing for virtualized lists with fixed-size rows.
//!
//! For adapter-level utilities (enter/exit membership tracking, tweens, anchoring), see the
//! `listwindow-adapter` crate.
//!
//! This crate answers one question at interactive frame rates: given a row count, a fixed row
//! size, the viewport size, the scroll offset and an overscan margin, which rows must be
//! rendered and where do they go?
//!
//! - [`compute_window`] is the pure form. It keeps no state and can be called from any
//!   scroll/resize handler.
//! - [`Window`] is a small stateful controller for adapters that prefer to feed events
//!   (viewport size, scroll offsets) and read back a [`WindowState`].
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size (height/width)
//! - scroll offset
//! - a spacer of [`WindowState::total_size`] and absolute positioning of each row at its offset
//!
//! ```
//! use listwindow::compute_window;
//!
//! let state = compute_window(1000, 50, 400, 1230, 2).unwrap();
//! assert_eq!(state.start_index(), Some(22));
//! assert_eq!(state.end_index(), Some(34));
//! assert_eq!(state.entries().next().map(|e| e.offset), Some(1100));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod compute;
mod error;
mod options;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use compute::compute_window;
pub use error::WindowError;
pub use options::{InitialOffset, OnChangeCallback, WindowOptions};
pub use state::{FrameState, ScrollState};
pub use types::{
    Align, ScrollDirection, VisibleEntry, WindowEntry, WindowRange, WindowState,
};
pub use window::Window;
