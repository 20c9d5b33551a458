/// Linear `0.0..=1.0` progress of a `duration_ms` span that started at `start_ms`.
pub(crate) fn linear_progress(start_ms: u64, duration_ms: u64, now_ms: u64) -> f32 {
    let elapsed = now_ms.saturating_sub(start_ms);
    (elapsed as f32 / duration_ms.max(1) as f32).clamp(0.0, 1.0)
}

/// An eased interpolation between two offsets over a span of host time.
///
/// Used for smooth scrolling by [`crate::ScrollController`]. The host samples it once per
/// frame and stops when [`Tween::is_done`] reports `true`; the final sample is exactly `to`.
///
/// The delta is interpolated in `f64`, so offsets far beyond `f32` precision (millions of
/// rows) still land on whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: u64,
    pub to: u64,
    pub start_ms: u64,
    /// Always at least 1.
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: u64, to: u64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.end_ms().saturating_sub(now_ms)
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        self.easing
            .sample(linear_progress(self.start_ms, self.duration_ms, now_ms))
    }

    pub fn sample(&self, now_ms: u64) -> u64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let eased = f64::from(self.progress(now_ms));
        let step = |delta: u64| ((delta as f64) * eased) as u64;
        if self.to >= self.from {
            self.from + step(self.to - self.from).min(self.to - self.from)
        } else {
            self.from - step(self.from - self.to).min(self.from - self.to)
        }
    }

    /// Restarts toward `new_to` from wherever the tween is at `now_ms`.
    pub fn retarget(&mut self, now_ms: u64, new_to: u64, duration_ms: u64) {
        *self = Self::new(
            self.sample(now_ms),
            new_to,
            now_ms,
            duration_ms,
            self.easing,
        );
    }
}

/// Easing curves mapping linear progress to eased progress. Every curve maps 0 to 0 and
/// 1 to 1; input outside `0.0..=1.0` is clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    SmoothStep,
    EaseInOutCubic,
    /// Fast start, slow finish. Suits exit fades.
    EaseOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let cube = |x: f32| x * x * x;
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic if t < 0.5 => 4.0 * cube(t),
            Self::EaseInOutCubic => 1.0 - cube(2.0 - 2.0 * t) / 2.0,
            Self::EaseOutCubic => 1.0 - cube(1.0 - t),
        }
    }
}
