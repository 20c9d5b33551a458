use listwindow_adapter::{Easing, ScrollController};

fn main() {
    // Example: a controller driving tween scrolling without holding any UI objects.
    //
    // An adapter would:
    // - start a tween (e.g. in response to a "scroll to index" command)
    // - call tick(now_ms) in a frame loop / timer
    // - apply the returned offset to the real scroll container (if any)
    // - render using the window state
    let mut c = ScrollController::new(listwindow::WindowOptions::new(10_000, 1))
        .expect("item size is non-zero");
    c.on_viewport_size(20);

    let target = c.start_tween_to_index(
        2_000,
        listwindow::Align::Center,
        0,
        240,
        Easing::SmoothStep,
    );
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    while c.is_animating() {
        now_ms += 16;
        if let Some(off) = c.tick(now_ms) {
            if now_ms.is_multiple_of(80) {
                println!("t={now_ms}ms offset={off} range={:?}", c.state().range);
            }
        }
    }
    println!(
        "done at t={now_ms}ms offset={}",
        c.window().scroll_offset()
    );
}
