use std::sync::Mutex;

use cssclock_proto::ports::wall_clock::{WallClock, WallTime};
use tokio::time::Instant;

/// Wall clock frozen at a settable time.
#[derive(Debug)]
pub struct FixedWallClock {
    time: Mutex<WallTime>,
}

impl FixedWallClock {
    pub fn new(time: WallTime) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    pub fn set(&self, time: WallTime) {
        if let Ok(mut guard) = self.time.lock() {
            *guard = time;
        }
    }
}

impl WallClock for FixedWallClock {
    fn now(&self) -> WallTime {
        self.time
            .lock()
            .map(|guard| *guard)
            .unwrap_or(WallTime::MIDNIGHT)
    }
}

/// Wall clock driven by tokio's clock, so it advances together with
/// `tokio::time::advance` in paused tests.
#[derive(Debug)]
pub struct PausedWallClock {
    origin: Instant,
    start: WallTime,
}

impl PausedWallClock {
    pub fn starting_at(start: WallTime) -> Self {
        Self {
            origin: Instant::now(),
            start,
        }
    }
}

impl WallClock for PausedWallClock {
    fn now(&self) -> WallTime {
        let elapsed = u32::try_from(self.origin.elapsed().as_secs()).unwrap_or(u32::MAX);
        WallTime::from_seconds_of_day(self.start.seconds_of_day().wrapping_add(elapsed))
    }
}
