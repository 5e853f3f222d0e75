//! Test helper functions for building wheels and driving spins.

use sector::{Candidate, RosterState};

use crate::clock::ManualClock;
use crate::config::WheelConfig;
use crate::spin::SpinEvent;
use crate::wheel::Wheel;

/// Frame interval of a 60 fps renderer (ms).
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Route `tracing` output through the test harness.
///
/// Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Roster Setup
// =============================================================================

/// Four candidates with distinct scores; `dee` has the lowest score.
pub fn class_roster() -> RosterState {
    RosterState::new(vec![
        Candidate::new("ada", 2.0),
        Candidate::new("bob", 5.0),
        Candidate::new("cyd", 1.0),
        Candidate::new("dee", 0.0),
    ])
    .unwrap()
}

/// A wheel over [`class_roster`] with default configuration.
pub fn class_wheel(seed: u64) -> Wheel {
    init_tracing();
    Wheel::new(class_roster(), WheelConfig::default(), seed).unwrap()
}

/// A 60 fps clock starting at `start_ms`.
pub fn frame_clock(start_ms: f64) -> ManualClock {
    ManualClock::fixed_step(start_ms, FRAME_MS)
}

// =============================================================================
// Drive Loops
// =============================================================================

/// Run a free spin to completion and collect every event.
pub fn spin_to_end(wheel: &mut Wheel, clock: ManualClock) -> Vec<SpinEvent> {
    wheel
        .spin(clock)
        .unwrap()
        .expect("wheel should be idle")
        .collect()
}

/// The `Finished` event of a spin, which must be last.
pub fn finished(events: &[SpinEvent]) -> &SpinEvent {
    let last = events.last().expect("spin produced no events");
    assert!(matches!(last, SpinEvent::Finished { .. }));
    last
}
