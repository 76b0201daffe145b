use std::path::{Path, PathBuf};

use serde::Deserialize;

mod validation;

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/cssclock/config.toml";

/// Formula used to turn the sampled hour and minute into the hour-hand angle.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum HourHandMode {
    /// 30° per hour plus half a degree per minute, snapped down to 6° steps.
    #[default]
    Quantized,
    /// 30° per hour, the hand jumps only on the hour.
    Whole,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    #[serde(default = "default_background_image", alias = "backgroundImage")]
    pub background_image: String,
    #[serde(default = "default_hours_image", alias = "hoursImage")]
    pub hours_image: String,
    #[serde(default = "default_minutes_image", alias = "minutesImage")]
    pub minutes_image: String,
    #[serde(default = "default_seconds_image", alias = "secondsImage")]
    pub seconds_image: String,
    /// Edge length of every layer in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Directory prefix joined with each image file name.
    #[serde(default = "default_image_path", alias = "imagePath")]
    pub image_path: String,
    #[serde(default, alias = "hourHand")]
    pub hour_hand: HourHandMode,
}

impl ClockConfig {
    /// Directory the layer images are resolved against.
    pub fn image_dir(&self) -> &Path {
        Path::new(&self.image_path)
    }

    /// Join the image directory with `file_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cssclock_proto::config::ClockConfig;
    /// use std::path::Path;
    ///
    /// let config = ClockConfig::default();
    /// assert_eq!(
    ///     config.resolve_image(&config.hours_image),
    ///     Path::new("images/clock-hours.png")
    /// );
    /// ```
    pub fn resolve_image(&self, file_name: &str) -> PathBuf {
        self.image_dir().join(file_name)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            background_image: default_background_image(),
            hours_image: default_hours_image(),
            minutes_image: default_minutes_image(),
            seconds_image: default_seconds_image(),
            size: default_size(),
            image_path: default_image_path(),
            hour_hand: HourHandMode::default(),
        }
    }
}

fn default_background_image() -> String {
    "clock-background.png".to_owned()
}

fn default_hours_image() -> String {
    "clock-hours.png".to_owned()
}

fn default_minutes_image() -> String {
    "clock-minutes.png".to_owned()
}

fn default_seconds_image() -> String {
    "clock-seconds.png".to_owned()
}

fn default_size() -> u32 {
    256
}

fn default_image_path() -> String {
    "images".to_owned()
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    /// Space around the clock face in logical pixels.
    #[serde(default)]
    pub padding: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            padding: 0,
        }
    }
}

fn default_window_title() -> String {
    "cssclock".to_owned()
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            clock: ClockConfig::default(),
            window: WindowConfig::default(),
        }
    }
}
