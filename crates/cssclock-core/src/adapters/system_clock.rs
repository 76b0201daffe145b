use chrono::{Local, Timelike};
use cssclock_proto::ports::wall_clock::{WallClock, WallTime};

/// [`WallClock`] backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> WallTime {
        WallTime::from_seconds_of_day(Local::now().num_seconds_from_midnight())
    }
}
