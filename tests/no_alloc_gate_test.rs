use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_candy::core::{
    OrderingConfig, OrderingGame, OrderingSnapshot, Session, SessionConfig, SessionSnapshot,
};
use tui_candy::types::{Move, Position};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

fn exercise(
    session: &mut Session,
    snap: &mut SessionSnapshot,
    ordering: &mut OrderingGame,
    ordering_snap: &mut OrderingSnapshot,
) {
    // Try every horizontal and vertical swap: rejected ones revert, committed
    // ones drive the cascade, gravity and refill paths.
    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Position::new(row, col);
            for to in [from.offset(0, 1), from.offset(1, 0)].into_iter().flatten() {
                let _ = session.attempt_swap(Move::new(from, to));
                let _ = session.tick(16);
                session.snapshot_into(snap);
            }
        }
    }

    // Selection flow.
    for _ in 0..50 {
        let _ = session.select_cell(Position::new(3, 3));
        let _ = session.select_cell(Position::new(3, 3));
    }

    // Full ordering game, restarted a few times.
    for _ in 0..3 {
        while !ordering.is_ended() {
            for slot in 0..4u8 {
                let _ = ordering.pick(slot);
            }
            let _ = ordering.check();
            let _ = ordering.next_round();
            ordering.snapshot_into(ordering_snap);
        }
        ordering.restart();
    }

    session.restart();
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut session = Session::new(SessionConfig {
        moves: 1_000,
        seed: 7,
        ..SessionConfig::default()
    });
    session.start();
    let mut snap = SessionSnapshot::default();

    let mut ordering = OrderingGame::new(OrderingConfig::default());
    ordering.start();
    let mut ordering_snap = OrderingSnapshot::default();

    // Warm-up on copies.
    exercise(
        &mut session.clone(),
        &mut snap,
        &mut ordering.clone(),
        &mut ordering_snap,
    );

    let allocs = with_alloc_counting(|| {
        exercise(&mut session, &mut snap, &mut ordering, &mut ordering_snap);
    });

    assert!(allocs == 0);
}
