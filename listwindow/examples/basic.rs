// Example: one-shot window computation and the stateful `Window` controller.
use listwindow::{Align, Window, WindowOptions, compute_window};

fn main() {
    let state = compute_window(1_000, 50, 400, 1_230, 2).expect("item size is non-zero");
    println!("range={:?} total_size={}", state.range, state.total_size);
    for e in state.entries().take(3) {
        println!("  row {} at y={}", e.index, e.offset);
    }

    let mut w = Window::new(WindowOptions::new(1_000_000, 1).with_overscan(2))
        .expect("item size is non-zero");
    w.set_viewport_and_scroll(10, 123_456);

    let mut entries = Vec::new();
    w.collect_entries(&mut entries);
    println!("total_size={}", w.total_size());
    println!("visible_range={:?}", w.visible_range());
    println!("first_rendered={:?}", entries.first());

    let off = w.scroll_to_index_offset(999_999, Align::End);
    w.set_scroll_offset_clamped(off);
    println!("after scroll_to_index: offset={}", w.scroll_offset());
}
