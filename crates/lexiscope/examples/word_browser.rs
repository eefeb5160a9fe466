//! Word Lookup Browser Walkthrough
//!
//! Simulates the windowing flow of an incremental vocabulary search: a
//! query narrows a candidate list with every keystroke, the viewport
//! virtualizes the results, and scrolling only ever materializes a
//! padded band of rows.
//!
//! Run: `cargo run -p lexiscope --example word_browser`

use std::rc::Rc;

use lexiscope::prelude::*;

/// Candidate entries for a query: longer queries match fewer words.
fn matches_for(query: &str) -> Vec<String> {
    let count = (600 / query.len()).max(1);
    (0..count).map(|i| format!("{query} candidate {i}")).collect()
}

fn print_window(label: &str, controller: &ViewportController<String>) {
    let state = controller.current_window();
    let slice = controller.visible_items();
    println!(
        "{label:<22} rows {:>4}..{:<4} of {:<4} ({} materialized, spacer {:>6.0} px, translate {:>6.0} px)",
        state.start_index,
        state.end_index(),
        controller.store().len(),
        slice.len(),
        state.total_height,
        state.translate_offset,
    );
}

fn main() {
    let surface = Rc::new(MemorySurface::with_height(640.0));
    let clock = Rc::new(ManualFrameClock::new());
    let store = Rc::new(ItemStore::from_items(matches_for("w")));
    let controller = Rc::new(ViewportController::new(
        WindowParams::default(),
        surface.clone(),
        store,
        clock.clone(),
    ));
    let binding = DataBinding::connect(controller.clone());

    print_window("mount", &controller);

    // A burst of wheel events lands as a single recompute on the next frame.
    for offset in [400.0, 2200.0, 9000.0] {
        surface.set_scroll_offset(offset);
        controller.on_scroll(offset);
    }
    clock.advance();
    print_window("after scroll burst", &controller);
    println!(
        "  ({} wheel events were coalesced away)",
        controller.coalesced_scrolls()
    );

    // Each keystroke narrows the result set. Every swap snaps the
    // viewport back to the top of the new collection.
    for query in ["wo", "wor", "worri", "worrisome"] {
        binding.replace_items(matches_for(query));
        print_window(&format!("query \"{query}\""), &controller);
    }

    // The host growing the pane widens the band without moving it.
    surface.set_viewport_height(960.0);
    controller.on_resize();
    print_window("after resize", &controller);
}
