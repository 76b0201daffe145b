//! Mapping from a sampled wall time to hand rotations.
//!
//! Every function here is pure: the same [`WallTime`] always yields the same
//! angles, and nothing depends on a previously applied rotation.

use std::fmt;

use cssclock_proto::{config::HourHandMode, ports::wall_clock::WallTime};

pub const DEGREES_PER_HOUR: f32 = 30.0;
pub const DEGREES_PER_MINUTE: f32 = 6.0;
pub const DEGREES_PER_SECOND: f32 = 6.0;

/// Hour-hand creep per elapsed minute.
pub const HOUR_CREEP_PER_MINUTE: f32 = 0.5;

/// The quantized hour hand only lands on multiples of this step.
pub const HOUR_STEP: f32 = 6.0;

/// Clockwise rotation from the 12 o'clock reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Degrees(pub f32);

impl Degrees {
    pub const ZERO: Self = Self(0.0);

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

/// Fold a 24-hour value onto the dial.
///
/// Only hours past noon are shifted, so both 0 and 12 survive unchanged.
///
/// # Examples
///
/// ```
/// use cssclock_core::modules::clock::angles::fold_hour;
///
/// assert_eq!(fold_hour(15), 3);
/// assert_eq!(fold_hour(12), 12);
/// assert_eq!(fold_hour(0), 0);
/// ```
pub const fn fold_hour(hour: u8) -> u8 {
    if hour > 12 { hour - 12 } else { hour }
}

pub fn second_angle(second: u8) -> Degrees {
    Degrees(f32::from(second) * DEGREES_PER_SECOND)
}

pub fn minute_angle(minute: u8) -> Degrees {
    Degrees(f32::from(minute) * DEGREES_PER_MINUTE)
}

/// Hour-hand angle for an already folded hour.
///
/// In [`HourHandMode::Quantized`] the half-degree-per-minute creep is rounded
/// down to [`HOUR_STEP`], so the hand advances once every 12 minutes.
pub fn hour_angle(folded_hour: u8, minute: u8, mode: HourHandMode) -> Degrees {
    let base = f32::from(folded_hour) * DEGREES_PER_HOUR;

    match mode {
        HourHandMode::Whole => Degrees(base),
        HourHandMode::Quantized => {
            let creep = f32::from(minute) * HOUR_CREEP_PER_MINUTE;
            Degrees(base + creep - creep % HOUR_STEP)
        }
    }
}

/// Rotations of the three moving layers for one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandAngles {
    pub hours: Degrees,
    pub minutes: Degrees,
    pub seconds: Degrees,
}

impl HandAngles {
    pub fn from_time(time: WallTime, mode: HourHandMode) -> Self {
        Self {
            hours: hour_angle(fold_hour(time.hour()), time.minute(), mode),
            minutes: minute_angle(time.minute()),
            seconds: second_angle(time.second()),
        }
    }
}
