use std::fmt;

use masterror::Error;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Error returned when a [`WallTime`] component is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WallTimeError {
    #[error("hour {value} is outside 0..=23")]
    Hour { value: u8 },
    #[error("minute {value} is outside 0..=59")]
    Minute { value: u8 },
    #[error("second {value} is outside 0..=59")]
    Second { value: u8 },
}

/// Local time of day sampled from a [`WallClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl WallTime {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Build a time of day from its components.
    ///
    /// # Errors
    ///
    /// Returns [`WallTimeError`] naming the first component outside its range.
    ///
    /// # Examples
    ///
    /// ```
    /// use cssclock_proto::ports::wall_clock::WallTime;
    ///
    /// let time = WallTime::new(3, 15, 30).expect("valid time");
    /// assert_eq!(time.to_string(), "03:15:30");
    /// assert!(WallTime::new(24, 0, 0).is_err());
    /// ```
    pub const fn new(hour: u8, minute: u8, second: u8) -> Result<Self, WallTimeError> {
        if hour > 23 {
            return Err(WallTimeError::Hour { value: hour });
        }
        if minute > 59 {
            return Err(WallTimeError::Minute { value: minute });
        }
        if second > 59 {
            return Err(WallTimeError::Second { value: second });
        }

        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Time of day `seconds` after midnight, wrapping at 24 hours.
    pub const fn from_seconds_of_day(seconds: u32) -> Self {
        let seconds = seconds % SECONDS_PER_DAY;

        Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn seconds_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Source of the current local wall-clock time.
///
/// Implementations must return the absolute time on every call; callers never
/// derive the next reading from a previous one.
pub trait WallClock: fmt::Debug + Send + Sync {
    fn now(&self) -> WallTime;
}
