use listwindow_adapter::{Keyed, LifecycleState, ListMembershipTracker, ScrollController};

#[derive(Clone, Debug)]
struct Message {
    id: u64,
    text: String,
}

impl Keyed for Message {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

fn render(tracker: &ListMembershipTracker<u64, Message>, c: &ScrollController, now_ms: u64) {
    let rows = tracker.entries();
    for entry in c.state().visible_entries(rows) {
        let e = entry.item;
        let marker = match e.state {
            LifecycleState::Entering => "+",
            LifecycleState::Present => " ",
            LifecycleState::Exiting => "-",
        };
        let fade = tracker
            .exit_progress(&e.key, now_ms)
            .map(|p| format!(" (fade {:.0}%)", p * 100.0))
            .unwrap_or_default();
        println!("{marker} y={:>3} #{} {}{fade}", entry.offset, e.key, e.data.text);
    }
    println!();
}

fn main() {
    // Example: a filtered list where removed rows fade out before they leave the display list,
    // while a scroll anchor keeps the first visible row in place.
    let all: Vec<Message> = (0..40u64)
        .map(|id| Message {
            id,
            text: format!("message {id}"),
        })
        .collect();

    let mut tracker = ListMembershipTracker::new();
    let mut c = ScrollController::new(listwindow::WindowOptions::new(0, 2).with_overscan(0))
        .expect("item size is non-zero");
    c.on_viewport_size(12);

    let mut now_ms = 0u64;
    let rows = tracker
        .update_keyed(all.iter().cloned(), 200, now_ms)
        .expect("keys are unique");
    c.window_mut().set_count(rows.len());
    c.scroll_to_offset(42, now_ms);
    tracker.frame_committed();
    render(&tracker, &c, now_ms);

    // Keep multiples of three only.
    now_ms += 16;
    let anchor = c.capture_first_visible_anchor(|i| tracker.entries()[i].key);
    let rows = tracker
        .update_keyed(all.iter().filter(|m| m.id % 3 == 0).cloned(), 200, now_ms)
        .expect("keys are unique");
    c.window_mut().set_count(rows.len());
    if let Some(anchor) = anchor {
        let entries = tracker.entries();
        c.apply_anchor(&anchor, |k| entries.iter().position(|e| e.key == *k));
    }

    while tracker.pending_removal_count() > 0 {
        render(&tracker, &c, now_ms);
        tracker.frame_committed();
        now_ms += 64;
        if tracker.tick(now_ms) > 0 {
            c.window_mut().set_count(tracker.len());
        }
    }
    render(&tracker, &c, now_ms);
    tracker.dispose();
}
