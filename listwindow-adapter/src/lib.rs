//! Adapter utilities for the `listwindow` crate.
//!
//! The `listwindow` crate is UI-agnostic and focuses on the windowing math. This crate provides
//! small, framework-neutral helpers commonly needed by list widgets:
//!
//! - Enter/exit membership tracking for animated lists ([`ListMembershipTracker`])
//! - A deadline-ordered timer queue driven by the host's clock ([`TimerQueue`])
//! - Tween samplers for adapter-driven animation ([`Tween`], [`Easing`])
//! - Tween-based smooth scrolling over a [`listwindow::Window`] ([`ScrollController`])
//! - Scroll anchoring across collection changes ([`ScrollAnchor`])
//!
//! Nothing here reads a clock or spawns work. Hosts pass `now_ms` explicitly, call `tick`
//! from their frame loop or timer, and call [`ListMembershipTracker::frame_committed`] after
//! each painted frame.
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod error;
mod key;
mod presence;
mod timers;
mod tween;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use controller::ScrollController;
pub use error::PresenceError;
pub use key::{ItemKey, Keyed};
pub use presence::{DisplayEntry, LifecycleState, ListMembershipTracker, PresenceOptions};
pub use timers::{TimerId, TimerQueue};
pub use tween::{Easing, Tween};
