use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

static INITIAL_OFFSET_PROVIDER_CALLED: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn counting_window(options: WindowOptions) -> (Window, Arc<AtomicUsize>) {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let w = Window::new(options.with_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &Window, _: bool| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    })))
    .unwrap();
    (w, calls)
}

#[test]
fn concrete_window_matches_hand_computation() {
    let state = compute_window(1000, 50, 400, 1230, 2).unwrap();
    assert_eq!(
        state.range,
        Some(WindowRange {
            start_index: 22,
            end_index: 34
        })
    );
    assert_eq!(state.len(), 13);
    assert_eq!(state.total_size, 50_000);

    let entries: Vec<WindowEntry> = state.entries().collect();
    assert_eq!(entries.len(), 13);
    assert_eq!(
        entries.first(),
        Some(&WindowEntry {
            index: 22,
            offset: 1100
        })
    );
    assert_eq!(
        entries.last(),
        Some(&WindowEntry {
            index: 34,
            offset: 1700
        })
    );
    for pair in entries.windows(2) {
        assert_eq!(pair[1].index, pair[0].index + 1);
        assert_eq!(pair[1].offset - pair[0].offset, 50);
    }
}

#[test]
fn empty_list_has_no_range_and_zero_extent() {
    let state = compute_window(0, 20, 100, 500, 3).unwrap();
    assert!(state.is_empty());
    assert_eq!(state.len(), 0);
    assert_eq!(state.total_size, 0);
    assert_eq!(state.start_index(), None);
    assert_eq!(state.entries().count(), 0);
}

#[test]
fn zero_item_size_is_rejected() {
    assert_eq!(
        compute_window(10, 0, 100, 0, 1),
        Err(WindowError::ZeroItemSize)
    );
    assert_eq!(
        Window::new(WindowOptions::new(10, 0)).err(),
        Some(WindowError::ZeroItemSize)
    );
}

#[test]
fn overscan_larger_than_count_is_clamped() {
    let state = compute_window(5, 10, 20, 10, 100).unwrap();
    assert_eq!(
        state.range,
        Some(WindowRange {
            start_index: 0,
            end_index: 4
        })
    );
}

#[test]
fn overscrolled_offset_is_clamped_to_last_page() {
    // 100 rows of 10, viewport 50 => max scroll 950 (first visible 95).
    let clamped = compute_window(100, 10, 50, 950, 0).unwrap();
    let overscrolled = compute_window(100, 10, 50, u64::MAX, 0).unwrap();
    assert_eq!(clamped, overscrolled);
    assert_eq!(overscrolled.start_index(), Some(95));
    assert_eq!(overscrolled.end_index(), Some(99));
}

#[test]
fn content_shorter_than_viewport_renders_everything() {
    let state = compute_window(3, 10, 500, 40, 0).unwrap();
    assert_eq!(state.start_index(), Some(0));
    assert_eq!(state.end_index(), Some(2));
}

#[test]
fn zero_viewport_yields_overscan_only_window() {
    let state = compute_window(100, 10, 0, 200, 2).unwrap();
    assert_eq!(state.start_index(), Some(18));
    assert_eq!(state.end_index(), Some(22));
}

#[test]
fn changing_item_size_between_calls_is_consistent() {
    let a = compute_window(100, 10, 50, 300, 1).unwrap();
    let b = compute_window(100, 20, 50, 300, 1).unwrap();
    assert_eq!(a.start_index(), Some(29));
    assert_eq!(b.start_index(), Some(14));
    assert_eq!(b.entries().next().map(|e| e.offset), Some(280));
}

#[test]
fn visible_entries_pair_rows_with_items() {
    let items: Vec<u32> = (0..10).map(|i| i * 100).collect();
    let state = compute_window(items.len(), 2, 4, 6, 1).unwrap();
    let visible: Vec<(usize, u32, u64)> = state
        .visible_entries(&items)
        .map(|e| (e.index, *e.item, e.offset))
        .collect();
    assert_eq!(
        visible,
        [
            (2, 200, 4),
            (3, 300, 6),
            (4, 400, 8),
            (5, 500, 10),
            (6, 600, 12)
        ]
    );

    // A collection shortened after the window was computed is not over-indexed.
    let shorter = &items[..4];
    assert_eq!(state.visible_entries(shorter).count(), 2);
}

#[test]
fn property_window_covers_viewport_plus_overscan() {
    for seed in [1u64, 7, 42, 1337, 2025] {
        let mut rng = Lcg::new(seed);
        for _ in 0..200 {
            let count = rng.gen_range_usize(1, 500);
            let item_size = rng.gen_range_u32(1, 40);
            let viewport = rng.gen_range_u32(1, 400);
            let overscan = rng.gen_range_usize(0, 8);
            let scroll = rng.gen_range_u64(0, (count as u64) * (item_size as u64) + 200);

            let state = compute_window(count, item_size, viewport, scroll, overscan).unwrap();
            let range = state.range.unwrap();
            assert!(range.start_index <= range.end_index);
            assert!(range.end_index < count);

            let total = count as u64 * item_size as u64;
            let clamped = scroll.min(total.saturating_sub(viewport as u64));
            let view_end = clamped + viewport as u64;

            let mut first_partial = None;
            let mut last_partial = None;
            for i in 0..count {
                let start = i as u64 * item_size as u64;
                let end = start + item_size as u64;
                if end > clamped && start < view_end {
                    assert!(
                        range.contains(i),
                        "row {i} visible but not rendered (seed={seed})"
                    );
                    first_partial.get_or_insert(i);
                    last_partial = Some(i);
                }
            }

            let first = first_partial.unwrap();
            let last = last_partial.unwrap();
            assert_eq!(range.start_index, first.saturating_sub(overscan));
            assert!(range.end_index >= (last + overscan).min(count - 1));
        }
    }
}

#[test]
fn property_window_is_monotonic_in_scroll_offset() {
    for seed in [3u64, 99, 4242] {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 300);
        let item_size = rng.gen_range_u32(1, 30);
        let viewport = rng.gen_range_u32(0, 200);
        let overscan = rng.gen_range_usize(0, 5);

        let mut prev = compute_window(count, item_size, viewport, 0, overscan).unwrap();
        let mut scroll = 0u64;
        for _ in 0..300 {
            scroll += rng.gen_range_u64(0, 25);
            let next = compute_window(count, item_size, viewport, scroll, overscan).unwrap();
            assert!(next.start_index() >= prev.start_index());
            assert!(next.end_index() >= prev.end_index());
            prev = next;
        }
    }
}

#[test]
fn window_state_matches_compute_window() {
    let mut w = Window::new(WindowOptions::new(1000, 50).with_overscan(2)).unwrap();
    w.set_viewport_and_scroll(400, 1230);
    assert_eq!(w.state(), compute_window(1000, 50, 400, 1230, 2).unwrap());
    assert_eq!(w.total_size(), 50_000);
    assert_eq!(
        w.visible_range(),
        Some(WindowRange {
            start_index: 24,
            end_index: 32
        })
    );
}

#[test]
fn set_item_size_rejects_zero_and_keeps_previous() {
    let mut w = Window::new(WindowOptions::new(10, 4)).unwrap();
    assert_eq!(w.set_item_size(0), Err(WindowError::ZeroItemSize));
    assert_eq!(w.item_size(), 4);
    assert_eq!(
        w.update_options(|o| o.item_size = 0),
        Err(WindowError::ZeroItemSize)
    );
    assert_eq!(w.item_size(), 4);

    w.set_item_size(8).unwrap();
    assert_eq!(w.total_size(), 80);
}

#[test]
fn index_and_offset_queries() {
    let mut w = Window::new(WindowOptions::new(10, 3)).unwrap();
    w.set_viewport_size(6);
    assert_eq!(w.index_at_offset(0), Some(0));
    assert_eq!(w.index_at_offset(5), Some(1));
    assert_eq!(w.index_at_offset(29), Some(9));
    assert_eq!(w.index_at_offset(30), None);
    assert_eq!(w.item_offset(4), Some(12));
    assert_eq!(w.item_end(4), Some(15));
    assert_eq!(w.item_offset(10), None);
}

#[test]
fn scroll_to_index_offset_aligns() {
    let mut w = Window::new(WindowOptions::new(100, 10)).unwrap();
    w.set_viewport_size(50);

    assert_eq!(w.scroll_to_index_offset(20, Align::Start), 200);
    assert_eq!(w.scroll_to_index_offset(20, Align::End), 160);
    assert_eq!(w.scroll_to_index_offset(20, Align::Center), 180);
    // Clamped to the last page.
    assert_eq!(w.scroll_to_index_offset(99, Align::Start), 950);
    assert_eq!(w.scroll_to_index_offset(1_000, Align::Start), 950);
}

#[test]
fn align_auto_keeps_offset_when_fully_visible() {
    let mut w = Window::new(WindowOptions::new(100, 10)).unwrap();
    w.set_viewport_and_scroll(50, 100);

    assert_eq!(w.scroll_to_index_offset(12, Align::Auto), 100);
    assert_eq!(w.scroll_to_index_offset(5, Align::Auto), 50);
    assert_eq!(w.scroll_to_index_offset(20, Align::Auto), 160);
}

#[test]
fn scroll_to_index_sets_offset_without_scrolling() {
    let mut w = Window::new(WindowOptions::new(100, 1)).unwrap();
    w.set_viewport_size(10);
    assert!(!w.is_scrolling());

    let expected = w.scroll_to_index_offset(50, Align::Start);
    let applied = w.scroll_to_index(50, Align::Start);
    assert_eq!(applied, expected);
    assert_eq!(w.scroll_offset(), expected);
    assert!(!w.is_scrolling());
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Forward));
}

#[test]
fn is_scrolling_resets_after_delay() {
    let mut w =
        Window::new(WindowOptions::new(100, 1).with_is_scrolling_reset_delay_ms(100)).unwrap();
    w.set_viewport_size(10);
    w.apply_scroll_event(5, 1_000);
    assert!(w.is_scrolling());

    w.update_scrolling(1_050);
    assert!(w.is_scrolling());

    w.update_scrolling(1_100);
    assert!(!w.is_scrolling());
    assert_eq!(w.scroll_direction(), None);
}

#[test]
fn apply_scroll_event_clamped_clamps_offset() {
    let mut w = Window::new(WindowOptions::new(10, 1)).unwrap();
    w.set_viewport_size(3);
    w.apply_scroll_event_clamped(u64::MAX, 0);
    assert_eq!(w.scroll_offset(), w.max_scroll_offset());
    assert_eq!(w.scroll_offset(), 7);
}

#[test]
fn batch_update_coalesces_on_change() {
    let (mut w, calls) = counting_window(WindowOptions::new(10, 1));

    w.batch_update(|w| {
        w.set_viewport_size(10);
        w.set_scroll_offset(5);
        w.set_overscan(4);
    });

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn batch_update_is_nestable() {
    let (mut w, calls) = counting_window(WindowOptions::new(10, 1));

    w.batch_update(|w| {
        w.set_viewport_size(10);
        w.batch_update(|w| {
            w.set_scroll_offset(5);
            w.set_count(20);
        });
    });

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn no_op_setters_do_not_notify() {
    let (mut w, calls) = counting_window(WindowOptions::new(10, 1));

    w.set_viewport_size(5);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    w.set_viewport_size(5);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    w.set_scroll_offset(3);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    w.set_scroll_offset(3);
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    w.set_item_size(1).unwrap();
    w.set_count(10);
    w.set_overscan(1);
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    w.set_viewport_and_scroll_clamped(5, 3);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn apply_scroll_event_notifies_once_with_scrolling_flag() {
    let seen = Arc::new(AtomicUsize::new(0));
    let mut w = Window::new(WindowOptions::new(100, 1).with_on_change(Some({
        let seen = Arc::clone(&seen);
        move |w: &Window, is_scrolling: bool| {
            assert!(is_scrolling);
            assert_eq!(w.scroll_offset(), 5);
            seen.fetch_add(1, Ordering::Relaxed);
        }
    })))
    .unwrap();

    w.apply_scroll_event(5, 0);
    assert_eq!(seen.load(Ordering::Relaxed), 1);
}

#[test]
fn initial_offset_provider_is_used() {
    INITIAL_OFFSET_PROVIDER_CALLED.store(0, Ordering::Relaxed);
    let opts = WindowOptions::new(100, 1)
        .with_initial_viewport_size(Some(10))
        .with_initial_offset(InitialOffset::Provider(Arc::new(|| {
            INITIAL_OFFSET_PROVIDER_CALLED.fetch_add(1, Ordering::Relaxed);
            42
        })));
    let w = Window::new(opts).unwrap();
    assert_eq!(w.scroll_offset(), 42);
    assert_eq!(w.viewport_size(), 10);
    assert!(INITIAL_OFFSET_PROVIDER_CALLED.load(Ordering::Relaxed) >= 1);
}

#[test]
fn frame_state_can_roundtrip() {
    let mut w1 = Window::new(WindowOptions::new(100, 1)).unwrap();
    w1.set_viewport_size(10);
    w1.apply_scroll_event_clamped(42, 100);
    w1.set_is_scrolling(false);

    let state = w1.frame_state();

    let mut w2 = Window::new(WindowOptions::new(100, 1)).unwrap();
    w2.restore_frame_state(state, 200);

    assert_eq!(w2.viewport_size(), 10);
    assert_eq!(w2.scroll_offset(), 42);
    assert!(!w2.is_scrolling());
    assert_eq!(w2.frame_state(), state);
}

#[test]
fn restore_frame_state_can_resume_scrolling() {
    let mut w = Window::new(WindowOptions::new(100, 1)).unwrap();
    w.restore_frame_state(
        FrameState {
            viewport_size: 10,
            scroll: ScrollState {
                offset: 20,
                is_scrolling: true,
            },
        },
        500,
    );
    assert!(w.is_scrolling());
    w.update_scrolling(500 + w.options().is_scrolling_reset_delay_ms);
    assert!(!w.is_scrolling());
}

#[test]
fn collect_entries_matches_for_each() {
    let mut w = Window::new(WindowOptions::new(100, 1)).unwrap();
    w.set_viewport_size(10);
    w.set_scroll_offset(50);

    let mut a = Vec::new();
    w.collect_entries(&mut a);

    let mut b = Vec::new();
    w.for_each_entry(|e| b.push(e));

    assert_eq!(a, b);
    assert_eq!(a.first().map(|e| e.index), Some(49));
    assert_eq!(a.last().map(|e| e.index), Some(61));
}

#[test]
fn shrinking_count_keeps_state_consistent() {
    let mut w = Window::new(WindowOptions::new(1000, 10)).unwrap();
    w.set_viewport_and_scroll(100, 5_000);
    assert_eq!(w.state().start_index(), Some(499));

    // The stored offset is now past the content; the window clamps without mutating it.
    w.set_count(20);
    let state = w.state();
    assert_eq!(state.end_index(), Some(19));
    assert_eq!(state.start_index(), Some(9));
    assert_eq!(w.scroll_offset(), 5_000);

    w.set_count(0);
    assert!(w.state().is_empty());
    assert_eq!(w.visible_range(), None);
}
