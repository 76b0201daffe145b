//! Port definitions shared by the clock adapters.
//!
//! The widget reads time only through [`wall_clock::WallClock`], so tests and
//! alternative time sources can be plugged in without touching the system
//! clock.

pub mod wall_clock;
